//! Field filters.
//!
//! A [`Filter`] is what a `name:word` term resolves `name` to: a set of
//! aliases plus a way of reading one value out of a record. Every filter
//! compares that value against the user's word with [`compare`].

use std::fmt;

use crate::env::SearchEnv;
use crate::op::Op;
use crate::record::Record;
use crate::value::Value;

/// Computes a filter value from a record.
pub type Extractor = for<'a> fn(&'a dyn Record) -> Value<'a>;

/// Where a filter reads its value from.
#[derive(Clone)]
pub enum Source {
    /// A named record field, read verbatim.
    Field(String),
    /// A derived value.
    Computed(Extractor),
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Source::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Source::Field(a), Source::Field(b)) => a == b,
            (Source::Computed(a), Source::Computed(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

/// An immutable filter descriptor.
///
/// # Example
///
/// ```
/// use wyvern_query::{Card, Filter, Op, SearchEnv};
///
/// let rarity = Filter::field(["r", "rarity"], "rarity");
/// let card = Card::new().with("rarity", "Rare");
///
/// assert!(rarity.matches(&SearchEnv::default(), &card, Op::Eq, "rare"));
/// assert!(!rarity.matches(&SearchEnv::default(), &Card::new(), Op::Ne, "rare"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    aliases: Vec<String>,
    source: Source,
}

impl Filter {
    /// Creates a filter that reads `field` from the record.
    pub fn field<I, S>(aliases: I, field: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter {
            aliases: aliases.into_iter().map(Into::into).collect(),
            source: Source::Field(field.into()),
        }
    }

    /// Creates a filter whose value is computed from the whole record.
    pub fn computed<I, S>(aliases: I, extract: Extractor) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter {
            aliases: aliases.into_iter().map(Into::into).collect(),
            source: Source::Computed(extract),
        }
    }

    /// The names this filter answers to in a query.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The primary (first) alias, used when displaying terms.
    pub fn name(&self) -> &str {
        self.aliases.first().map_or("", String::as_str)
    }

    /// Where this filter reads its value from.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Extracts this filter's value from a record.
    pub fn value<'r>(&self, record: &'r dyn Record) -> Value<'r> {
        match &self.source {
            Source::Field(field) => record.field(field),
            Source::Computed(extract) => extract(record),
        }
    }

    /// Tests a record against `op word`.
    ///
    /// The environment is not consulted by field filters; it is part of the
    /// signature so filters that depend on the whole result set can exist.
    pub fn matches(&self, _env: &SearchEnv, record: &dyn Record, op: Op, word: &str) -> bool {
        compare(self.value(record), op, word)
    }
}

/// Compares an extracted value with the user's word.
///
/// - An absent value never matches, whatever the operator.
/// - Strings compare case-insensitively; `:` is substring containment.
/// - Numbers parse the word as `f64` first; a word that does not parse never
///   matches. `:` is equality.
/// - The word is the left operand of the ordering operators: `power>3` holds
///   when `3 > power`.
pub fn compare(value: Value<'_>, op: Op, word: &str) -> bool {
    match value {
        Value::None => false,
        Value::String(s) => compare_str(s, op, word),
        Value::Number(n) => compare_number(n, op, word),
    }
}

fn compare_str(value: &str, op: Op, word: &str) -> bool {
    let value = value.to_lowercase();
    let word = word.to_lowercase();
    match op {
        Op::Has => value.contains(&word),
        _ => op.eval_ordering(word.cmp(&value)),
    }
}

fn compare_number(value: f64, op: Op, word: &str) -> bool {
    let Ok(word) = word.trim().parse::<f64>() else {
        return false;
    };
    match word.partial_cmp(&value) {
        Some(ordering) => op.eval_ordering(ordering),
        // NaN is unequal to everything
        None => op == Op::Ne,
    }
}
