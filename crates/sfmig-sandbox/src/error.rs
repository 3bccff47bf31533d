//! Error types for sandbox collaborators.

use std::fmt;

/// Errors a sandbox client or flow invocation can report.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// The requested record does not exist in the sandbox.
    #[error("Record not found: {object}/{id}")]
    NotFound {
        /// The sObject type that was looked up.
        object: String,
        /// The Id that was not found.
        id: String,
    },

    /// No flow with this name is wired into the invoker.
    #[error("Unknown flow: {name}")]
    UnknownFlow {
        /// The flow name that could not be resolved.
        name: String,
    },

    /// The sandbox refused the request (bad payload, validation rule, ...).
    #[error("Request rejected: {message}")]
    Rejected {
        /// Reason given by the sandbox.
        message: String,
    },

    /// The sandbox could not be reached.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Anything else that went wrong inside the client.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl SandboxError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(object: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            object: object.into(),
            id: id.into(),
        }
    }

    /// Creates a new `UnknownFlow` error.
    #[must_use]
    pub fn unknown_flow(name: impl Into<String>) -> Self {
        Self::UnknownFlow { name: name.into() }
    }

    /// Creates a new `Rejected` error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is an unknown flow error.
    #[must_use]
    pub fn is_unknown_flow(&self) -> bool {
        matches!(self, Self::UnknownFlow { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::UnknownFlow { .. } => ErrorCategory::Wiring,
            Self::Rejected { .. } => ErrorCategory::Validation,
            Self::Connection { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

impl From<sfmig_core::CoreError> for SandboxError {
    fn from(err: sfmig_core::CoreError) -> Self {
        Self::rejected(err.to_string())
    }
}

/// Categories of sandbox errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Record not found.
    NotFound,
    /// Flow or client wiring problem.
    Wiring,
    /// Request rejected by the sandbox.
    Validation,
    /// Infrastructure/connection error.
    Infrastructure,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Wiring => write!(f, "wiring"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SandboxError::not_found("Contact", "003000000000001");
        assert_eq!(err.to_string(), "Record not found: Contact/003000000000001");

        let err = SandboxError::unknown_flow("deleteContactFromBFlow");
        assert_eq!(err.to_string(), "Unknown flow: deleteContactFromBFlow");

        let err = SandboxError::connection("sandbox B timed out");
        assert_eq!(err.to_string(), "Connection error: sandbox B timed out");
    }

    #[test]
    fn test_error_predicates() {
        assert!(SandboxError::not_found("Contact", "1").is_not_found());
        assert!(!SandboxError::internal("boom").is_not_found());
        assert!(SandboxError::unknown_flow("x").is_unknown_flow());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            SandboxError::unknown_flow("x").category(),
            ErrorCategory::Wiring
        );
        assert_eq!(
            SandboxError::connection("down").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(ErrorCategory::Infrastructure.to_string(), "infrastructure");
    }

    #[test]
    fn test_core_errors_become_rejections() {
        let err: SandboxError = sfmig_core::CoreError::missing_id(2).into();
        assert!(matches!(err, SandboxError::Rejected { .. }));
    }
}
