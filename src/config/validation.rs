//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::{Config, PrefixMode};
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("prefix.value must not be empty in static mode")]
    EmptyStaticPrefix,
    #[error("prefix.value must not contain whitespace, got {0:?}")]
    PrefixWhitespace(String),
    #[error("prefix.mode = \"mention_only\" requires prefix.mention = true")]
    UnreachableCommands,
    #[error("typo.min_similarity must be in (0, 1], got {0}")]
    InvalidSimilarity(f64),
    #[error("typo.timeout_secs must be positive")]
    ZeroTypoTimeout,
    #[error("help.name must not be empty")]
    EmptyHelpName,
    #[error("help name or alias {0:?} contains whitespace")]
    HelpNameWhitespace(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let prefix = &config.prefix;
    if prefix.mode == PrefixMode::Static {
        if prefix.value.is_empty() {
            errors.push(ValidationError::EmptyStaticPrefix);
        } else if prefix.value.chars().any(char::is_whitespace) {
            errors.push(ValidationError::PrefixWhitespace(prefix.value.clone()));
        }
    }
    if prefix.mode == PrefixMode::MentionOnly && !prefix.mention {
        errors.push(ValidationError::UnreachableCommands);
    }

    let similarity = config.typo.min_similarity;
    if !(similarity > 0.0 && similarity <= 1.0) {
        errors.push(ValidationError::InvalidSimilarity(similarity));
    }
    if config.typo.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTypoTimeout);
    }

    if config.help.enabled {
        if config.help.name.is_empty() {
            errors.push(ValidationError::EmptyHelpName);
        }
        for name in std::iter::once(&config.help.name).chain(&config.help.aliases) {
            if name.chars().any(char::is_whitespace) {
                errors.push(ValidationError::HelpNameWhitespace(name.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
