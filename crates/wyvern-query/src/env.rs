//! Search environment.
//!
//! A [`SearchEnv`] carries the presentation preferences of a search (sort
//! keys, grouping fields, de-duplication mode) and is passed to every match.
//! [`SearchEnv::filter`] is the evaluation entry point; the remaining methods
//! post-process its output for display.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::ordering::{compare_records, Dir, SortOrder};
use crate::record::Record;
use crate::term::Term;

/// How many rows a card with several printings produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unique {
    /// One row per card name.
    Cards,
    /// Every printing is its own row.
    #[default]
    Printings,
}

impl Unique {
    /// Returns the display name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Unique::Cards => "cards",
            Unique::Printings => "printings",
        }
    }
}

impl std::fmt::Display for Unique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Context threaded through every match.
///
/// # Example
///
/// ```
/// use wyvern_query::{parse, Card, FilterRegistry, SearchEnv};
///
/// let cards = vec![
///     Card::new().with("name", "Red Dragon").with("rarity", "rare"),
///     Card::new().with("name", "Phoenix").with("rarity", "rare"),
///     Card::new().with("name", "Blue Dragon").with("rarity", "common"),
/// ];
///
/// let registry = FilterRegistry::builtin();
/// let term = parse("dragon r:rare", &registry);
/// let found = SearchEnv::default().filter(&cards, &term).unwrap();
///
/// assert_eq!(found, vec![&cards[0]]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchEnv {
    /// Sort keys, most significant first.
    pub sorting: Vec<SortOrder>,
    /// Fields to group results by, outermost first.
    pub grouping: Vec<String>,
    /// De-duplication mode.
    pub unique: Unique,
}

/// Records sharing the same values for every grouping field.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a, R> {
    /// Case-folded grouping values; `None` where the field is absent.
    pub key: Vec<Option<String>>,
    /// Members, in result order.
    pub records: Vec<&'a R>,
}

impl SearchEnv {
    /// Creates an environment with default preferences.
    pub fn new() -> Self {
        SearchEnv::default()
    }

    /// Adds a sort key.
    pub fn sort_by(mut self, field: impl Into<String>, dir: Dir) -> Self {
        self.sorting.push(SortOrder::new(field, dir));
        self
    }

    /// Adds a grouping field.
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.grouping.push(field.into());
        self
    }

    /// Sets the de-duplication mode.
    pub fn unique(mut self, unique: Unique) -> Self {
        self.unique = unique;
        self
    }

    /// Returns the records matching `term`, in input order.
    ///
    /// Fails on the first record whose evaluation fails.
    pub fn filter<'a, R, I>(&self, records: I, term: &Term<'_>) -> Result<Vec<&'a R>>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut matched = Vec::new();
        for record in records {
            if term.matches(self, record)? {
                matched.push(record);
            }
        }
        Ok(matched)
    }

    /// Applies the de-duplication mode.
    ///
    /// In [`Unique::Cards`] mode the first record of each case-folded
    /// display name is kept. Records without a name are never merged.
    pub fn dedupe<'a, R: Record>(&self, records: Vec<&'a R>) -> Vec<&'a R> {
        match self.unique {
            Unique::Printings => records,
            Unique::Cards => {
                let mut seen = HashSet::new();
                records
                    .into_iter()
                    .filter(|record| match record.display_name().key() {
                        Some(name) => seen.insert(name),
                        None => true,
                    })
                    .collect()
            }
        }
    }

    /// Sorts records by the sort keys. The sort is stable, so records that
    /// compare equal keep their order.
    pub fn sort<R: Record>(&self, records: &mut [&R]) {
        if self.sorting.is_empty() {
            return;
        }
        records.sort_by(|a, b| compare_records(*a, *b, &self.sorting));
    }

    /// Partitions records by the grouping fields.
    ///
    /// Groups appear in order of their first member. Without grouping fields
    /// everything lands in a single group (none for an empty input).
    pub fn group<'a, R: Record>(&self, records: Vec<&'a R>) -> Vec<Group<'a, R>> {
        let mut groups: Vec<Group<'a, R>> = Vec::new();
        let mut index: HashMap<Vec<Option<String>>, usize> = HashMap::new();

        for record in records {
            let key: Vec<Option<String>> = self
                .grouping
                .iter()
                .map(|field| record.field(field).key())
                .collect();
            match index.get(&key) {
                Some(&i) => groups[i].records.push(record),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        records: vec![record],
                    });
                }
            }
        }
        groups
    }

    /// Filters, de-duplicates and sorts, in that order.
    pub fn search<'a, R, I>(&self, records: I, term: &Term<'_>) -> Result<Vec<&'a R>>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut results = self.dedupe(self.filter(records, term)?);
        self.sort(&mut results);
        tracing::debug!(
            matched = results.len(),
            unique = %self.unique,
            "search finished"
        );
        Ok(results)
    }
}
