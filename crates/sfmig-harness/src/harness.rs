use sfmig_config::{EntityFlows, HarnessConfig, StartupProperties};
use sfmig_core::{Record, RecordBuilder, build_unique_email, build_unique_key};
use sfmig_sandbox::{DynFlowInvoker, FlowDelete, FlowLookup, FlowPayload};
use tracing::{debug, info};

use crate::error::{HarnessError, LookupFailure};
use crate::observability::init_tracing_with_level;
use crate::reconcile::{ReconcileReport, SandboxReconciler};

/// Base harness for template integration tests.
///
/// Builds uniquely-keyed fixtures and removes whatever a test created from
/// both sandboxes through the configured flows.
pub struct TemplateHarness {
    config: HarnessConfig,
    config_resources: String,
    invoker: DynFlowInvoker,
    reconciler: SandboxReconciler,
}

impl TemplateHarness {
    /// Validates `config`, installs tracing at `logging.level`, checks that
    /// every configured flow is wired and resolves the runtime resources.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationMissing`] naming every flow the
    /// invoker does not know, or when the deploy properties cannot supply
    /// `config.resources`. Both happen before any record can be created.
    pub fn setup(config: HarnessConfig, invoker: DynFlowInvoker) -> Result<Self, HarnessError> {
        config.validate()?;
        init_tracing_with_level(&config.logging.level);

        let missing: Vec<&str> = config
            .flows
            .all_names()
            .into_iter()
            .filter(|name| !invoker.has_flow(name))
            .collect();
        if !missing.is_empty() {
            return Err(HarnessError::configuration_missing(format!(
                "flows not wired: {}",
                missing.join(", ")
            )));
        }
        let config_resources = sfmig_config::config_resources(&config.paths)?;

        info!(template = %config.template_name, "Template harness ready");
        Ok(Self {
            config,
            config_resources,
            invoker,
            reconciler: SandboxReconciler::new(),
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn template_name(&self) -> &str {
        &self.config.template_name
    }

    /// Resources the template runtime is started with.
    pub fn config_resources(&self) -> &str {
        &self.config_resources
    }

    pub fn startup_properties(&self) -> Result<StartupProperties, HarnessError> {
        Ok(sfmig_config::startup_properties(&self.config.paths)?)
    }

    pub fn unique_name(&self, name: &str) -> String {
        build_unique_key(self.template_name(), name)
    }

    pub fn unique_email(&self, user: &str) -> String {
        build_unique_email(self.template_name(), user)
    }

    /// Contact fixture number `sequence` for organisation `org_id`.
    pub fn create_contact(&self, org_id: &str, sequence: u32) -> Record {
        RecordBuilder::new()
            .with("FirstName", format!("FirstName_{sequence}"))
            .with("LastName", self.unique_name(&format!("LastName_{sequence}_")))
            .with("Email", self.unique_email(&format!("some.email.{sequence}")))
            .with("Description", "Some fake description")
            .with("MailingCity", "Denver")
            .with("MailingCountry", "US")
            .with("MobilePhone", "123456789")
            .with("Department", format!("department_{sequence}_{org_id}"))
            .with("Phone", "123456789")
            .with("Title", "Dr")
            .build()
    }

    /// Account fixture number `sequence`.
    pub fn create_account(&self, sequence: u32) -> Record {
        RecordBuilder::new()
            .with("Name", self.unique_name(&format!("Account_{sequence}_")))
            .with("Description", "Some fake description")
            .with("Industry", "Education")
            .with("NumberOfEmployees", 7500 + sequence)
            .build()
    }

    /// Runs a retrieve flow for `record`. `None` means no counterpart exists.
    pub async fn invoke_retrieve_flow(
        &self,
        flow: &str,
        record: &Record,
    ) -> Result<Option<Record>, HarnessError> {
        self.invoker
            .invoke(flow, FlowPayload::Record(record.clone()))
            .await
            .map_err(|error| {
                HarnessError::from(LookupFailure {
                    id: record.id().unwrap_or_default().to_string(),
                    error,
                })
            })
    }

    /// Deletes test contacts from A and their counterparts from B.
    pub async fn delete_test_contacts(
        &self,
        created_in_a: &[Record],
    ) -> Result<ReconcileReport, HarnessError> {
        self.delete_test_entities(&self.config.flows.contact, created_in_a)
            .await
    }

    /// Deletes test accounts from A and their counterparts from B.
    pub async fn delete_test_accounts(
        &self,
        created_in_a: &[Record],
    ) -> Result<ReconcileReport, HarnessError> {
        self.delete_test_entities(&self.config.flows.account, created_in_a)
            .await
    }

    async fn delete_test_entities(
        &self,
        flows: &EntityFlows,
        created_in_a: &[Record],
    ) -> Result<ReconcileReport, HarnessError> {
        debug!(
            retrieve = %flows.retrieve_from_b,
            count = created_in_a.len(),
            "Cleaning up test records"
        );
        let lookup_in_b = FlowLookup::new(self.invoker.clone(), &flows.retrieve_from_b);
        let delete_in_a = FlowDelete::new(self.invoker.clone(), &flows.delete_from_a);
        let delete_in_b = FlowDelete::new(self.invoker.clone(), &flows.delete_from_b);
        self.reconciler
            .reconcile_and_delete(created_in_a, &lookup_in_b, &delete_in_a, &delete_in_b)
            .await
    }
}
