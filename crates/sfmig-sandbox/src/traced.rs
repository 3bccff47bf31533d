//! TracedSandbox - a client wrapper that logs every sandbox call.
//!
//! # Example
//!
//! ```ignore
//! use sfmig_sandbox::TracedSandbox;
//!
//! let sandbox_b = TracedSandbox::new(InMemorySandbox::named("B"));
//! sandbox_b.delete_many(SObjectType::Contact, &ids).await?;
//! ```

use async_trait::async_trait;
use sfmig_core::{IdSet, Record, SObjectType};
use tracing::{debug, warn};

use crate::error::SandboxError;
use crate::traits::SandboxClient;

/// Delegates to an inner client and emits a debug event after each call.
///
/// Failed calls are logged at warn level with their error category.
pub struct TracedSandbox<S: SandboxClient> {
    inner: S,
}

impl<S: SandboxClient> TracedSandbox<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Get a reference to the inner client.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn log_failure(&self, operation: &str, object: SObjectType, err: &SandboxError) {
        warn!(
            sandbox = %self.inner.sandbox_name(),
            object = %object,
            operation,
            category = %err.category(),
            error = %err,
            "Sandbox call failed"
        );
    }
}

#[async_trait]
impl<S: SandboxClient> SandboxClient for TracedSandbox<S> {
    async fn create(&self, object: SObjectType, record: &Record) -> Result<Record, SandboxError> {
        match self.inner.create(object, record).await {
            Ok(created) => {
                debug!(
                    sandbox = %self.inner.sandbox_name(),
                    object = %object,
                    id = created.id().unwrap_or_default(),
                    "Created record"
                );
                Ok(created)
            }
            Err(err) => {
                self.log_failure("create", object, &err);
                Err(err)
            }
        }
    }

    async fn read(&self, object: SObjectType, id: &str) -> Result<Option<Record>, SandboxError> {
        // Reads are not logged on success
        self.inner.read(object, id).await.inspect_err(|err| {
            self.log_failure("read", object, err);
        })
    }

    async fn find(
        &self,
        object: SObjectType,
        correlation: &Record,
    ) -> Result<Option<Record>, SandboxError> {
        match self.inner.find(object, correlation).await {
            Ok(found) => {
                debug!(
                    sandbox = %self.inner.sandbox_name(),
                    object = %object,
                    found = found.is_some(),
                    "Looked up counterpart"
                );
                Ok(found)
            }
            Err(err) => {
                self.log_failure("find", object, &err);
                Err(err)
            }
        }
    }

    async fn delete_many(&self, object: SObjectType, ids: &IdSet) -> Result<(), SandboxError> {
        match self.inner.delete_many(object, ids).await {
            Ok(()) => {
                debug!(
                    sandbox = %self.inner.sandbox_name(),
                    object = %object,
                    count = ids.len(),
                    "Deleted records"
                );
                Ok(())
            }
            Err(err) => {
                self.log_failure("delete_many", object, &err);
                Err(err)
            }
        }
    }

    fn sandbox_name(&self) -> &str {
        self.inner.sandbox_name()
    }
}
