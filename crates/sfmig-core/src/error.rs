use thiserror::Error;

/// Core error types for sfmig record handling
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Record at position {index} has no Id")]
    MissingId { index: usize },

    #[error("Unknown sObject type: {0}")]
    InvalidObjectType(String),

    #[error("Invalid record data: {message}")]
    InvalidRecord { message: String },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time formatting error: {0}")]
    TimeFormat(#[from] time::error::Format),
}

impl CoreError {
    /// Create a new MissingId error
    pub fn missing_id(index: usize) -> Self {
        Self::MissingId { index }
    }

    /// Create a new InvalidObjectType error
    pub fn invalid_object_type(object_type: impl Into<String>) -> Self {
        Self::InvalidObjectType(object_type.into())
    }

    /// Create a new InvalidRecord error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingId { .. } | Self::InvalidObjectType(_) | Self::InvalidRecord { .. } => {
                ErrorCategory::Validation
            }
            Self::JsonError(_) => ErrorCategory::Serialization,
            Self::TimeFormat(_) => ErrorCategory::System,
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Serialization,
    System,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Serialization => write!(f, "serialization"),
            Self::System => write!(f, "system"),
        }
    }
}

/// Result type alias for sfmig core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CoreError::missing_id(3);
        assert!(matches!(err, CoreError::MissingId { index: 3 }));
        assert_eq!(err.to_string(), "Record at position 3 has no Id");

        let err = CoreError::invalid_object_type("Lead");
        assert_eq!(err.to_string(), "Unknown sObject type: Lead");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            CoreError::missing_id(0).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            CoreError::invalid_record("not an object").category(),
            ErrorCategory::Validation
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            CoreError::from(json_err).category(),
            ErrorCategory::Serialization
        );
    }
}
