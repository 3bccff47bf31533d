use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Namespace embedded into every generated business key.
    #[serde(default = "default_template_name")]
    pub template_name: String,
    /// Overall per-test timeout, enforced by the test runner.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub flows: FlowCatalog,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_template_name() -> String {
    "contact-migration".into()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            template_name: default_template_name(),
            timeout_secs: default_timeout_secs(),
            paths: PathsConfig::default(),
            flows: FlowCatalog::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl HarnessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.template_name.trim().is_empty() {
            return Err(ConfigError::validation("template_name must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::validation("timeout_secs must be > 0"));
        }
        for (entity, flows) in [("contact", &self.flows.contact), ("account", &self.flows.account)]
        {
            if flows.names().iter().any(|n| n.trim().is_empty()) {
                return Err(ConfigError::validation(format!(
                    "flows.{entity} has an empty flow name"
                )));
            }
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(ConfigError::validation(format!(
                "logging.level must be one of {valid_levels:?}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Becomes the application home directory at startup.
    #[serde(default = "default_mappings_dir")]
    pub mappings_dir: PathBuf,
    /// Folder whose `*.xml` files are appended to the config resources.
    #[serde(default = "default_test_flows_dir")]
    pub test_flows_dir: PathBuf,
    /// Properties file carrying `config.resources`.
    #[serde(default = "default_deploy_properties")]
    pub deploy_properties: PathBuf,
}

fn default_mappings_dir() -> PathBuf {
    PathBuf::from("./mappings")
}

fn default_test_flows_dir() -> PathBuf {
    PathBuf::from("./src/test/resources/flows/")
}

fn default_deploy_properties() -> PathBuf {
    PathBuf::from("./src/main/app/mule-deploy.properties")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            mappings_dir: default_mappings_dir(),
            test_flows_dir: default_test_flows_dir(),
            deploy_properties: default_deploy_properties(),
        }
    }
}

/// Names of the retrieve/delete flows used to clean up one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFlows {
    pub retrieve_from_b: String,
    pub delete_from_a: String,
    pub delete_from_b: String,
}

impl EntityFlows {
    pub fn new(
        retrieve_from_b: impl Into<String>,
        delete_from_a: impl Into<String>,
        delete_from_b: impl Into<String>,
    ) -> Self {
        Self {
            retrieve_from_b: retrieve_from_b.into(),
            delete_from_a: delete_from_a.into(),
            delete_from_b: delete_from_b.into(),
        }
    }

    pub fn names(&self) -> [&str; 3] {
        [&self.retrieve_from_b, &self.delete_from_a, &self.delete_from_b]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowCatalog {
    #[serde(default = "default_contact_flows")]
    pub contact: EntityFlows,
    #[serde(default = "default_account_flows")]
    pub account: EntityFlows,
}

fn default_contact_flows() -> EntityFlows {
    EntityFlows::new(
        "retrieveContactFromBFlow",
        "deleteContactFromAFlow",
        "deleteContactFromBFlow",
    )
}

fn default_account_flows() -> EntityFlows {
    EntityFlows::new(
        "retrieveAccountFlowFromB",
        "deleteAccountFromAFlow",
        "deleteAccountFromBFlow",
    )
}

impl Default for FlowCatalog {
    fn default() -> Self {
        Self {
            contact: default_contact_flows(),
            account: default_account_flows(),
        }
    }
}

impl FlowCatalog {
    /// Every configured flow name, contact flows first.
    pub fn all_names(&self) -> Vec<&str> {
        self.contact
            .names()
            .into_iter()
            .chain(self.account.names())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
