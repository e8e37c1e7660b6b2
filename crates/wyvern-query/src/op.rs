//! Comparison operators for filter terms.
//!
//! The tokenizer collects operator characters into a raw token; [`Op`] is the
//! closed set of tokens that carry a meaning. Anything else is reported as
//! [`SearchError::UnsupportedOperator`] when the term is evaluated.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::SearchError;

/// Comparison operator for a filter term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `:` - substring containment for strings, equality for numbers.
    Has,
    /// `=` - exact equality.
    Eq,
    /// `!=` - not equal.
    Ne,
    /// `>` - greater than.
    Gt,
    /// `>=` - greater than or equal.
    Gte,
    /// `<` - less than.
    Lt,
    /// `<=` - less than or equal.
    Lte,
}

impl Op {
    /// All operators, in the order they are documented.
    pub const ALL: [Op; 7] = [Op::Has, Op::Eq, Op::Ne, Op::Gt, Op::Gte, Op::Lt, Op::Lte];

    /// Evaluates a comparison given the ordering of `value` relative to the
    /// user's word.
    ///
    /// `Has` on an ordering means equality; substring containment is handled
    /// by the string comparator before it gets here.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Has | Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }

    /// Returns the query syntax of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Has => ":",
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl FromStr for Op {
    type Err = SearchError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            ":" => Ok(Op::Has),
            "=" => Ok(Op::Eq),
            "!=" => Ok(Op::Ne),
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Gte),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Lte),
            other => Err(SearchError::UnsupportedOperator {
                op: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
