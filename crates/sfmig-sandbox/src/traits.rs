//! Collaborator traits for talking to a CRM sandbox.
//!
//! The reconciler only ever sees the two narrow capabilities,
//! [`RecordLookup`] and [`BulkDelete`]. Concrete sandboxes implement
//! [`SandboxClient`] and are narrowed to one sObject type through
//! [`ObjectScope`](crate::ObjectScope); flow-based wiring goes through
//! [`FlowInvoker`] and the adapters in [`flow`](crate::flow).

use async_trait::async_trait;
use sfmig_core::{IdSet, Record, SObjectType};
use std::sync::Arc;

use crate::error::SandboxError;

/// Finds the counterpart of a record in a sandbox.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// Looks up the record matching `record`'s business key.
    ///
    /// Returns `None` when no counterpart exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error only when the lookup itself could not be performed.
    async fn lookup(&self, record: &Record) -> Result<Option<Record>, SandboxError>;
}

/// Deletes records from a sandbox in one call.
#[async_trait]
pub trait BulkDelete: Send + Sync {
    /// Deletes every record whose Id is in `ids`.
    ///
    /// Ids that do not exist (any more) must be treated as deleted, so the
    /// call is idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error when the delete request fails.
    async fn delete_all(&self, ids: &IdSet) -> Result<(), SandboxError>;
}

/// A complete client for one sandbox.
#[async_trait]
pub trait SandboxClient: Send + Sync {
    /// Creates `record` and returns it with its new `Id`.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::Rejected` if the record cannot be stored.
    async fn create(&self, object: SObjectType, record: &Record) -> Result<Record, SandboxError>;

    /// Reads a record by Id. Returns `None` if it does not exist.
    async fn read(&self, object: SObjectType, id: &str) -> Result<Option<Record>, SandboxError>;

    /// Finds the record whose correlation fields match `correlation`.
    async fn find(
        &self,
        object: SObjectType,
        correlation: &Record,
    ) -> Result<Option<Record>, SandboxError>;

    /// Deletes the given Ids. Unknown Ids are ignored.
    async fn delete_many(&self, object: SObjectType, ids: &IdSet) -> Result<(), SandboxError>;

    /// Returns a short name of this sandbox for logging.
    fn sandbox_name(&self) -> &str;
}

#[async_trait]
impl<T: SandboxClient + ?Sized> SandboxClient for Arc<T> {
    async fn create(&self, object: SObjectType, record: &Record) -> Result<Record, SandboxError> {
        (**self).create(object, record).await
    }

    async fn read(&self, object: SObjectType, id: &str) -> Result<Option<Record>, SandboxError> {
        (**self).read(object, id).await
    }

    async fn find(
        &self,
        object: SObjectType,
        correlation: &Record,
    ) -> Result<Option<Record>, SandboxError> {
        (**self).find(object, correlation).await
    }

    async fn delete_many(&self, object: SObjectType, ids: &IdSet) -> Result<(), SandboxError> {
        (**self).delete_many(object, ids).await
    }

    fn sandbox_name(&self) -> &str {
        (**self).sandbox_name()
    }
}

/// Payload handed to a flow invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowPayload {
    /// A single record, e.g. for a retrieve flow.
    Record(Record),
    /// A list of Ids, e.g. for a delete flow.
    Ids(IdSet),
}

/// Synchronous request/response invocation of a named flow.
#[async_trait]
pub trait FlowInvoker: Send + Sync {
    /// Returns whether a flow with this name is wired in.
    fn has_flow(&self, name: &str) -> bool;

    /// Runs the flow `name` with `payload`.
    ///
    /// `Ok(None)` means the flow produced no result.
    ///
    /// # Errors
    ///
    /// Returns `SandboxError::UnknownFlow` for unknown names, or whatever
    /// error the flow itself reports.
    async fn invoke(&self, name: &str, payload: FlowPayload)
    -> Result<Option<Record>, SandboxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_lookup_object_safe(_: &dyn RecordLookup) {}

    fn _assert_delete_object_safe(_: &dyn BulkDelete) {}

    fn _assert_client_object_safe(_: &dyn SandboxClient) {}

    fn _assert_invoker_object_safe(_: &dyn FlowInvoker) {}
}
