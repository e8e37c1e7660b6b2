//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents a field read from a record at evaluation time.
//! Records only ever hold strings or numbers; everything else is absent.

use std::cmp::Ordering;

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use wyvern_query::Value;
///
/// struct Card {
///     name: String,
///     power: u8,
/// }
///
/// fn read<'a>(card: &'a Card, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&card.name),
///         "power" => Value::Number(card.power as f64),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(f64),
    /// Field not present.
    ///
    /// Distinct from `String("")`: an empty string is a value and can match.
    None,
}

impl<'a> Value<'a> {
    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Case-folded key used for grouping and de-duplication.
    ///
    /// Returns `None` for absent values so callers can keep them apart from
    /// the empty string.
    pub fn key(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.to_lowercase()),
            Value::Number(n) => Some(n.to_string()),
            Value::None => None,
        }
    }
}

/// Compares two values of the same kind.
///
/// Strings compare case-insensitively. Absent values sort after present ones.
/// Returns `None` on a type mismatch or a NaN comparison.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.to_lowercase().cmp(&b.to_lowercase())),
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}
