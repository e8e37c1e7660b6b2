//! Error types for the query crate.

use thiserror::Error;

/// Errors that can occur when parsing or evaluating queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A filter term names an alias that no registered filter claims.
    #[error("unknown filter '{alias}'")]
    UnknownFilter { alias: String },

    /// The operator token of a filter term is not one of the supported
    /// operators.
    #[error("operator '{op}' is not supported")]
    UnsupportedOperator { op: String },

    /// Strict parsing rejected the query.
    #[error("syntax error at character {position}: {message}")]
    Syntax { position: usize, message: String },
}

impl SearchError {
    /// Creates a syntax error at a character offset.
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        SearchError::Syntax {
            position,
            message: message.into(),
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, SearchError>;
