//! Error types for the lexer crate.

use thiserror::Error;

/// Convenience type alias for Results using [`LexError`].
pub type Result<T, E = LexError> = std::result::Result<T, E>;

/// Errors produced while parsing command-line fragments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LexError {
    /// The text is not a decimal 64-bit identifier.
    #[error("invalid snowflake: {0:?}")]
    InvalidSnowflake(String),

    /// The text is not one of the recognised mention forms.
    #[error("invalid mention: {0:?}")]
    InvalidMention(String),
}
