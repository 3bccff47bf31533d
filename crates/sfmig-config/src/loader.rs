use config::{Config, Environment, File};
use std::path::PathBuf;
use tracing::debug;

use crate::settings::HarnessConfig;
use crate::{ConfigError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "sfmig.toml";

/// Prefix of environment overrides, e.g. `SFMIG__TIMEOUT_SECS=300`.
pub const ENV_PREFIX: &str = "SFMIG";

/// Loads the harness configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file at `path`
/// (or [`DEFAULT_CONFIG_PATH`]) when it exists, then `SFMIG__*` variables.
pub fn load_config(path: Option<&str>) -> Result<HarnessConfig> {
    let mut builder = Config::builder();
    let file = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_PATH));
    if file.exists() {
        debug!(path = %file.display(), "Loading harness config file");
        builder = builder.add_source(File::from(file));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .separator("__"),
    );
    let cfg = builder
        .build()
        .map_err(|e| ConfigError::parse(format!("config build error: {e}")))?;
    let merged: HarnessConfig = cfg
        .try_deserialize()
        .map_err(|e| ConfigError::parse(format!("config deserialize error: {e}")))?;
    merged.validate()?;
    Ok(merged)
}
