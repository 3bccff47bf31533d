//! Resolution of the resources a template run is started with.
//!
//! The deploy properties name the application's own configuration files in
//! `config.resources`; every XML flow under the test flows folder is appended
//! to that list so test-only flows are loaded alongside.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::settings::PathsConfig;
use crate::{ConfigError, Result};

/// Key of the comma-separated resource list in the deploy properties.
pub const CONFIG_RESOURCES_KEY: &str = "config.resources";

/// Properties the runtime is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupProperties {
    /// Absolute path of the application home directory.
    pub app_home: PathBuf,
}

/// Parses Java-style properties: `key=value` or `key: value`, `#`/`!` comments.
///
/// Line continuations and escapes are not supported.
pub fn read_properties(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let split = line.find(['=', ':'])?;
            let (key, value) = line.split_at(split);
            Some((key.trim().to_string(), value[1..].trim().to_string()))
        })
        .collect()
}

/// Returns the deploy `config.resources` followed by the test flow files.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] when the deploy properties file cannot be
/// read or has no `config.resources` entry.
pub fn config_resources(paths: &PathsConfig) -> Result<String> {
    let missing = || {
        ConfigError::missing(
            paths.deploy_properties.display().to_string(),
            "could not find the deploy properties file or its config.resources entry; \
             add the file or provide the resources explicitly",
        )
    };
    let content = fs::read_to_string(&paths.deploy_properties).map_err(|e| {
        warn!(path = %paths.deploy_properties.display(), error = %e, "Deploy properties unreadable");
        missing()
    })?;
    let resources = read_properties(&content)
        .remove(CONFIG_RESOURCES_KEY)
        .ok_or_else(missing)?;

    Ok(resources + &test_flow_resources(&paths.test_flows_dir))
}

/// Lists the `*.xml` files directly under `dir` as `,<dir><file>` entries.
///
/// Entries are sorted by file name. A missing or unreadable folder yields an
/// empty string.
pub fn test_flow_resources(dir: &Path) -> String {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "No test flows folder");
            return String::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with("xml"))
        .collect();
    names.sort();

    let prefix = dir.to_string_lossy();
    names
        .iter()
        .map(|name| format!(",{prefix}{name}"))
        .collect()
}

/// Startup properties with the application home set to the mappings folder.
///
/// The folder does not have to exist.
pub fn startup_properties(paths: &PathsConfig) -> Result<StartupProperties> {
    let app_home = std::path::absolute(&paths.mappings_dir)?;
    Ok(StartupProperties { app_home })
}
