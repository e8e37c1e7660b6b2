//! Wyvern query - compiles single-line card searches into predicates.
//!
//! A query such as `rarity:rare s:"Core Set" !dragon | terrain` is parsed into
//! a tree of [`Term`]s and evaluated against any collection of [`Record`]s.
//!
//! - Bare words match the card name, ignoring case
//! - `alias op word` terms dispatch to a [`Filter`] looked up in a
//!   [`FilterRegistry`]
//! - `!` negates, `|` combines two terms, `( )` groups, `"` quotes
//!
//! # Quick Start
//!
//! ```rust
//! use wyvern_query::{parse, Card, FilterRegistry, SearchEnv};
//!
//! let cards = vec![
//!     Card::new().with("name", "Red Dragon").with("set", "Core Set").with("rarity", "rare"),
//!     Card::new().with("name", "Terrain").with("set", "Core Set").with("rarity", "common"),
//!     Card::new().with("name", "Gold Dragon").with("set", "Promos").with("rarity", "promo"),
//! ];
//!
//! let registry = FilterRegistry::builtin();
//! let term = parse(r#"s:"core set" dragon | terrain"#, &registry);
//!
//! let found = SearchEnv::default().filter(&cards, &term).unwrap();
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[0], &cards[0]);
//! assert_eq!(found[1], &cards[1]);
//! ```
//!
//! # Query Semantics
//!
//! The parse result is always a group, the implicit AND of everything typed at
//! the top level. `|` binds the term just completed to the one before it:
//!
//! ```text
//! a b | c d   =>   a AND (b OR c) AND d
//! a | b | c   =>   (a OR b) OR c
//! ```
//!
//! # Operators
//!
//! | Operator | String field | Number field |
//! |----------|--------------|--------------|
//! | `:` | contains | equals |
//! | `=` | equals | equals |
//! | `!=` | not equal | not equal |
//! | `>` `>=` `<` `<=` | lexicographic | numeric |
//!
//! String comparisons ignore case. A word that is not a number never matches
//! a number field, and a record without the field never matches at all.

mod env;
mod error;
mod filter;
mod op;
mod ordering;
mod parser;
mod record;
mod registry;
mod term;
mod value;

// Re-export public API
pub use env::{Group, SearchEnv, Unique};
pub use error::{Result, SearchError};
pub use filter::{compare, Extractor, Filter, Source};
pub use op::Op;
pub use ordering::{compare_records, Dir, SortOrder};
pub use parser::{parse, parse_strict};
pub use record::{Card, Record, NAME_FIELD};
pub use registry::FilterRegistry;
pub use term::{FilterTerm, Term};
pub use value::{compare_values, Value};
