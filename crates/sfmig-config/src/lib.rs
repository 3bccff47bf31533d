//! Harness configuration for sfmig.
//!
//! - [`settings`]: the [`HarnessConfig`] tree and its defaults
//! - [`loader`]: TOML file + `SFMIG__*` environment overrides
//! - [`resources`]: deploy-properties and test-flow resolution, startup properties

pub mod loader;
pub mod resources;
pub mod settings;

pub use loader::{DEFAULT_CONFIG_PATH, ENV_PREFIX, load_config};
pub use resources::{
    CONFIG_RESOURCES_KEY, StartupProperties, config_resources, read_properties,
    startup_properties, test_flow_resources,
};
pub use settings::{EntityFlows, FlowCatalog, HarnessConfig, LoggingConfig, PathsConfig};

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {resource}: {hint}")]
    Missing { resource: String, hint: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn missing(resource: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Missing {
            resource: resource.into(),
            hint: hint.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns `true` when a required file, key or wiring could not be located.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
