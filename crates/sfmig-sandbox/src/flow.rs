//! Adapters turning named flows into sandbox capabilities.
//!
//! A retrieve flow answers a [`FlowPayload::Record`] with the matching record
//! or nothing; a delete flow takes a [`FlowPayload::Ids`] and its result is
//! ignored.

use std::sync::Arc;

use async_trait::async_trait;
use sfmig_core::{IdSet, Record};
use tracing::debug;

use crate::error::SandboxError;
use crate::traits::{BulkDelete, FlowInvoker, FlowPayload, RecordLookup};

/// Shareable flow invoker.
pub type DynFlowInvoker = Arc<dyn FlowInvoker>;

/// [`RecordLookup`] backed by a retrieve flow.
#[derive(Clone)]
pub struct FlowLookup {
    invoker: DynFlowInvoker,
    flow: String,
}

impl FlowLookup {
    pub fn new(invoker: DynFlowInvoker, flow: impl Into<String>) -> Self {
        Self {
            invoker,
            flow: flow.into(),
        }
    }

    pub fn flow(&self) -> &str {
        &self.flow
    }
}

#[async_trait]
impl RecordLookup for FlowLookup {
    async fn lookup(&self, record: &Record) -> Result<Option<Record>, SandboxError> {
        let found = self
            .invoker
            .invoke(&self.flow, FlowPayload::Record(record.clone()))
            .await?;
        debug!(flow = %self.flow, found = found.is_some(), "Retrieve flow returned");
        Ok(found)
    }
}

/// [`BulkDelete`] backed by a delete flow.
#[derive(Clone)]
pub struct FlowDelete {
    invoker: DynFlowInvoker,
    flow: String,
}

impl FlowDelete {
    pub fn new(invoker: DynFlowInvoker, flow: impl Into<String>) -> Self {
        Self {
            invoker,
            flow: flow.into(),
        }
    }

    pub fn flow(&self) -> &str {
        &self.flow
    }
}

#[async_trait]
impl BulkDelete for FlowDelete {
    async fn delete_all(&self, ids: &IdSet) -> Result<(), SandboxError> {
        self.invoker
            .invoke(&self.flow, FlowPayload::Ids(ids.clone()))
            .await?;
        debug!(flow = %self.flow, count = ids.len(), "Delete flow completed");
        Ok(())
    }
}
