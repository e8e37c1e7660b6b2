//! Ordering types for result sorting.
//!
//! Provides [`Dir`] for sort direction and [`SortOrder`] for field-based
//! ordering. Filtering never reorders; these are applied afterwards by
//! [`SearchEnv::sort`](crate::SearchEnv::sort).

use std::cmp::Ordering;
use std::str::FromStr;

use crate::record::Record;
use crate::value::{compare_values, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sort key: a record field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl SortOrder {
    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortOrder {
            field: field.into(),
            dir,
        }
    }

    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortOrder::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortOrder::new(field, Dir::Desc)
    }

    /// Compares two values according to this ordering.
    ///
    /// Absent values sort last in either direction. Returns `None` if the
    /// values cannot be compared (type mismatch or NaN).
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        match (a, b) {
            (Value::None, _) | (_, Value::None) => compare_values(a, b),
            _ => compare_values(a, b).map(|ordering| self.dir.apply(ordering)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    /// Parses `field`, `field:asc` or `field:desc`. Any other suffix is part
    /// of the field name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.rsplit_once(':') {
            Some((field, "asc")) => SortOrder::asc(field),
            Some((field, "desc")) => SortOrder::desc(field),
            _ => SortOrder::asc(s),
        })
    }
}

/// Compares two records using a list of sort keys.
///
/// Uses the first key as the primary sort key, the second to break ties, etc.
/// Keys that cannot be compared count as equal.
pub fn compare_records(a: &dyn Record, b: &dyn Record, sorting: &[SortOrder]) -> Ordering {
    for order in sorting {
        let val_a = a.field(&order.field);
        let val_b = b.field(&order.field);

        if let Some(ordering) = order.compare(&val_a, &val_b) {
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
    }
    Ordering::Equal
}
