//! Unified error handling for harmony-router.
//!
//! The taxonomy separates failures by who deals with them:
//!
//! - [`ConvertError::Mismatch`] stays inside candidate resolution: the
//!   next variant is tried.
//! - [`HandlerError::Signal`] is shown to the user through the error-signal
//!   hook.
//! - [`RegistrationError`] rejects a command at registration time.
//! - [`HandlerError::Internal`], [`ConvertError::Fault`] and
//!   [`PlatformError`] are faults routed to the uncaught-error hook.

use thiserror::Error;

// ============================================================================
// Conversion Errors (argument converters)
// ============================================================================

/// Result of a failed argument conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The token does not fit the target type. The candidate is abandoned
    /// and resolution continues with the next one.
    #[error("argument mismatch: {0}")]
    Mismatch(String),

    /// Conversion could not be attempted (e.g. a platform lookup failed).
    #[error("converter fault: {0}")]
    Fault(#[from] anyhow::Error),
}

impl ConvertError {
    /// Build a recoverable mismatch.
    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::Mismatch(reason.into())
    }

    /// Whether resolution may continue with another candidate.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }

    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Mismatch(_) => "mismatch",
            Self::Fault(_) => "converter_fault",
        }
    }
}

impl From<PlatformError> for ConvertError {
    fn from(err: PlatformError) -> Self {
        Self::Fault(err.into())
    }
}

// ============================================================================
// Handler Errors (command bodies)
// ============================================================================

/// Errors a command handler can return.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Deliberate, user-facing rejection. A `None` message is acknowledged
    /// without text (by default a reaction on the invoking message).
    #[error("{}", .message.as_deref().unwrap_or("command rejected"))]
    Signal { message: Option<String> },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HandlerError {
    /// A user-facing rejection with text.
    pub fn signal(message: impl Into<String>) -> Self {
        Self::Signal {
            message: Some(message.into()),
        }
    }

    /// A user-facing rejection without text.
    pub fn silent() -> Self {
        Self::Signal { message: None }
    }

    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Signal { .. } => "signal",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<PlatformError> for HandlerError {
    fn from(err: PlatformError) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type for command handlers.
pub type HandlerResult<T = crate::output::CommandOutput> = Result<T, HandlerError>;

// ============================================================================
// Registration Errors
// ============================================================================

/// Reasons a command cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("command name must not be empty")]
    EmptyName,

    #[error("command name or alias {0:?} contains whitespace")]
    InvalidName(String),

    #[error("command {0:?} declares no variants")]
    NoVariants(String),

    #[error("command {command:?}, variant {variant}: no converter registered for {type_name}")]
    UnregisteredType {
        command: String,
        variant: usize,
        type_name: &'static str,
    },
}

impl RegistrationError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::InvalidName(_) => "invalid_name",
            Self::NoVariants(_) => "no_variants",
            Self::UnregisteredType { .. } => "unregistered_type",
        }
    }
}

// ============================================================================
// Platform Errors (external collaborator)
// ============================================================================

/// Failures reported by the chat platform collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("platform request failed: {0}")]
    Request(String),

    #[error("platform unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ConvertError::mismatch("nope").error_code(), "mismatch");
        assert_eq!(HandlerError::silent().error_code(), "signal");
        assert_eq!(
            HandlerError::Internal(anyhow::anyhow!("boom")).error_code(),
            "internal_error"
        );
        assert_eq!(RegistrationError::EmptyName.error_code(), "empty_name");
    }

    #[test]
    fn test_only_mismatch_is_recoverable() {
        assert!(ConvertError::mismatch("x").is_recoverable());
        assert!(!ConvertError::from(PlatformError::Unavailable).is_recoverable());
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(HandlerError::signal("Nope!").to_string(), "Nope!");
        assert_eq!(HandlerError::silent().to_string(), "command rejected");
    }
}
