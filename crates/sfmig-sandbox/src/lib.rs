//! # sfmig-sandbox
//!
//! Collaborator contracts for the CRM sandboxes sfmig cleans up after.
//!
//! This crate defines traits and adapters only; an in-memory implementation
//! lives in `sfmig-sandbox-memory`.
//!
//! ## Overview
//!
//! - [`RecordLookup`] and [`BulkDelete`] are the two capabilities the
//!   reconciler needs.
//! - [`SandboxClient`] is a full client for one sandbox; [`ObjectScope`]
//!   narrows it to one sObject type and provides both capabilities.
//! - [`FlowInvoker`] runs named request/response flows; [`FlowLookup`] and
//!   [`FlowDelete`] turn a retrieve or delete flow into a capability.
//!
//! ## Example
//!
//! ```ignore
//! use sfmig_core::SObjectType;
//! use sfmig_sandbox::{ObjectScope, RecordLookup};
//!
//! async fn counterpart(sandbox_b: DynSandbox, contact: &Record) -> Result<Option<Record>, SandboxError> {
//!     ObjectScope::new(sandbox_b, SObjectType::Contact)
//!         .lookup(contact)
//!         .await
//! }
//! ```

mod error;
pub mod flow;
mod scope;
pub mod traced;
mod traits;

pub use error::{ErrorCategory, SandboxError};
pub use flow::{DynFlowInvoker, FlowDelete, FlowLookup};
pub use scope::ObjectScope;
pub use traced::TracedSandbox;
pub use traits::{BulkDelete, FlowInvoker, FlowPayload, RecordLookup, SandboxClient};

/// Type alias for a shareable sandbox client.
pub type DynSandbox = std::sync::Arc<dyn SandboxClient>;
