//! Errors raised while building a run from a document.

use thiserror::Error;

/// Reasons a game list cannot be turned into a run.
///
/// Malformed times and dates are not errors: they load as unset values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
    /// A game record has no name.
    #[error("game at position {position} has an empty name")]
    EmptyGameName { position: usize },

    /// Two games share a name.
    #[error("duplicate game name: {name}")]
    DuplicateGame { name: String },
}
