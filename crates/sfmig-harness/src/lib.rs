//! Test-data reconciliation for the contact-migration template.
//!
//! Integration tests create Contacts and Accounts in sandbox A, let the
//! migration copy them to sandbox B, and must leave both sandboxes clean
//! afterwards. [`SandboxReconciler`] does that cleanup; [`TemplateHarness`]
//! wraps it with fixtures and the configured flow names.
//!
//! ```ignore
//! let harness = TemplateHarness::setup(config, invoker)?;
//! let contact = harness.create_contact("org-a", 1);
//! // ... create it in A, run the migration, assert on B ...
//! harness.delete_test_contacts(&created_in_a).await?;
//! ```

pub mod error;
pub mod flows;
pub mod harness;
pub mod observability;
pub mod reconcile;

pub use error::{DeleteFailure, HarnessError, LookupFailure, SandboxSide};
pub use flows::SandboxFlowRouter;
pub use harness::TemplateHarness;
pub use observability::init_tracing_with_level;
pub use reconcile::{ReconcileReport, SandboxReconciler};
