use async_trait::async_trait;
use sfmig_core::{IdSet, Record, SObjectType};

use crate::error::SandboxError;
use crate::traits::{BulkDelete, RecordLookup, SandboxClient};
use crate::DynSandbox;

/// A sandbox client narrowed to one sObject type.
///
/// Lookups go through [`SandboxClient::find`], deletes through
/// [`SandboxClient::delete_many`].
#[derive(Clone)]
pub struct ObjectScope {
    client: DynSandbox,
    object: SObjectType,
}

impl ObjectScope {
    pub fn new(client: DynSandbox, object: SObjectType) -> Self {
        Self { client, object }
    }

    pub fn object(&self) -> SObjectType {
        self.object
    }

    pub fn client(&self) -> &DynSandbox {
        &self.client
    }
}

impl std::fmt::Debug for ObjectScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectScope")
            .field("sandbox", &self.client.sandbox_name())
            .field("object", &self.object)
            .finish()
    }
}

#[async_trait]
impl RecordLookup for ObjectScope {
    async fn lookup(&self, record: &Record) -> Result<Option<Record>, SandboxError> {
        self.client.find(self.object, record).await
    }
}

#[async_trait]
impl BulkDelete for ObjectScope {
    async fn delete_all(&self, ids: &IdSet) -> Result<(), SandboxError> {
        self.client.delete_many(self.object, ids).await
    }
}
