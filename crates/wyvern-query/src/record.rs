//! Record access.
//!
//! The query engine never owns card data. It reads fields through the
//! [`Record`] trait, which any store can implement for its own types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::value::Value;

/// Field name holding the display name matched by bare words.
pub const NAME_FIELD: &str = "name";

/// Trait for types that can be searched.
///
/// # Manual Implementation
///
/// ```
/// use wyvern_query::{Record, Value};
///
/// struct Card {
///     name: String,
///     rarity: Option<String>,
/// }
///
/// impl Record for Card {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "name" => Value::String(&self.name),
///             "rarity" => self.rarity.as_deref().into(),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::None`] if the record does
    /// not carry it.
    fn field(&self, name: &str) -> Value<'_>;

    /// The display name that bare words are matched against.
    fn display_name(&self) -> Value<'_> {
        self.field(NAME_FIELD)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }

    fn display_name(&self) -> Value<'_> {
        (**self).display_name()
    }
}

impl Record for Map<String, Json> {
    fn field(&self, name: &str) -> Value<'_> {
        json_value(self.get(name))
    }
}

/// Maps a JSON field onto a query value.
///
/// Only strings and numbers are values; every other JSON kind is absent.
fn json_value(value: Option<&Json>) -> Value<'_> {
    match value {
        Some(Json::String(s)) => Value::String(s),
        Some(Json::Number(n)) => n.as_f64().map_or(Value::None, Value::Number),
        _ => Value::None,
    }
}

/// A card as stored in the card database: an open JSON object.
///
/// # Example
///
/// ```
/// use wyvern_query::{Card, Record, Value};
///
/// let card: Card = serde_json::from_str(r#"{"name": "Red Dragon", "power": 5}"#).unwrap();
/// assert_eq!(card.field("name"), Value::String("Red Dragon"));
/// assert_eq!(card.field("power"), Value::Number(5.0));
/// assert_eq!(card.field("rarity"), Value::None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card {
    fields: Map<String, Json>,
}

impl Card {
    /// Creates an empty card.
    pub fn new() -> Self {
        Card::default()
    }

    /// Sets a field, returning the card for chaining.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Json>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the underlying JSON object.
    pub fn fields(&self) -> &Map<String, Json> {
        &self.fields
    }
}

impl From<Map<String, Json>> for Card {
    fn from(fields: Map<String, Json>) -> Self {
        Card { fields }
    }
}

impl Record for Card {
    fn field(&self, name: &str) -> Value<'_> {
        self.fields.field(name)
    }
}
