use sfmig_config::ConfigError;
use sfmig_core::{CoreError, IdSet};
use sfmig_sandbox::SandboxError;
use std::fmt;

/// Which of the two sandboxes an operation ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxSide {
    /// The source sandbox records are created in.
    A,
    /// The sandbox records are migrated to.
    B,
}

impl fmt::Display for SandboxSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A bulk delete that did not go through.
#[derive(Debug)]
pub struct DeleteFailure {
    pub side: SandboxSide,
    /// Ids that may still exist in the sandbox.
    pub ids: IdSet,
    pub error: SandboxError,
}

impl fmt::Display for DeleteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sandbox {} ({} records left behind): {}",
            self.side,
            self.ids.len(),
            self.error
        )
    }
}

/// A counterpart lookup that errored; the record was treated as not found.
#[derive(Debug)]
pub struct LookupFailure {
    /// Id of the record in sandbox A.
    pub id: String,
    pub error: SandboxError,
}

fn join_failures(failures: &[DeleteFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Harness error types
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("Invalid batch: record at position {index} has no Id")]
    InvalidBatch { index: usize },

    #[error("Lookup of the counterpart of {id} failed: {source}")]
    LookupFailed {
        id: String,
        #[source]
        source: SandboxError,
    },

    #[error("Cleanup failed: {}", join_failures(.failures))]
    CleanupFailed { failures: Vec<DeleteFailure> },

    #[error("Configuration missing: {what}")]
    ConfigurationMissing { what: String },

    #[error("Configuration error: {0}")]
    Config(ConfigError),

    #[error("Record error: {0}")]
    Core(CoreError),
}

impl HarnessError {
    pub fn configuration_missing(what: impl Into<String>) -> Self {
        Self::ConfigurationMissing { what: what.into() }
    }

    pub fn is_cleanup_failed(&self) -> bool {
        matches!(self, Self::CleanupFailed { .. })
    }

    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::ConfigurationMissing { .. })
    }
}

impl From<ConfigError> for HarnessError {
    fn from(err: ConfigError) -> Self {
        if err.is_missing() {
            Self::configuration_missing(err.to_string())
        } else {
            Self::Config(err)
        }
    }
}

impl From<CoreError> for HarnessError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingId { index } => Self::InvalidBatch { index },
            other => Self::Core(other),
        }
    }
}

impl From<LookupFailure> for HarnessError {
    fn from(failure: LookupFailure) -> Self {
        Self::LookupFailed {
            id: failure.id,
            source: failure.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_failed_lists_every_side() {
        let err = HarnessError::CleanupFailed {
            failures: vec![
                DeleteFailure {
                    side: SandboxSide::B,
                    ids: ["b1".to_string()].into_iter().collect(),
                    error: SandboxError::connection("timeout"),
                },
                DeleteFailure {
                    side: SandboxSide::A,
                    ids: ["a1".to_string(), "a2".to_string()].into_iter().collect(),
                    error: SandboxError::internal("boom"),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Cleanup failed: sandbox B (1 records left behind): Connection error: timeout; \
             sandbox A (2 records left behind): Internal error: boom"
        );
        assert!(err.is_cleanup_failed());
    }

    #[test]
    fn test_missing_config_becomes_configuration_missing() {
        let err: HarnessError = ConfigError::missing("mule-deploy.properties", "add it").into();
        assert!(err.is_configuration_missing());

        let err: HarnessError = ConfigError::validation("timeout_secs must be > 0").into();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn test_missing_id_becomes_invalid_batch() {
        let err: HarnessError = CoreError::missing_id(4).into();
        assert!(matches!(err, HarnessError::InvalidBatch { index: 4 }));
    }
}
