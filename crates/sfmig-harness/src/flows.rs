//! Flow wiring against concrete sandbox clients.

use async_trait::async_trait;
use sfmig_config::{EntityFlows, FlowCatalog};
use sfmig_core::{Record, SObjectType};
use sfmig_sandbox::{DynSandbox, FlowInvoker, FlowPayload, SandboxError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowAction {
    RetrieveFromB,
    DeleteFromA,
    DeleteFromB,
}

/// Routes the configured retrieve/delete flow names to sandbox A and B.
///
/// Retrieve flows run [`find`](sfmig_sandbox::SandboxClient::find) in B;
/// delete flows run [`delete_many`](sfmig_sandbox::SandboxClient::delete_many)
/// in the named sandbox and produce no result.
pub struct SandboxFlowRouter {
    catalog: FlowCatalog,
    sandbox_a: DynSandbox,
    sandbox_b: DynSandbox,
}

impl SandboxFlowRouter {
    pub fn new(catalog: FlowCatalog, sandbox_a: DynSandbox, sandbox_b: DynSandbox) -> Self {
        Self {
            catalog,
            sandbox_a,
            sandbox_b,
        }
    }

    fn route(&self, name: &str) -> Option<(SObjectType, FlowAction)> {
        let entities: [(SObjectType, &EntityFlows); 2] = [
            (SObjectType::Contact, &self.catalog.contact),
            (SObjectType::Account, &self.catalog.account),
        ];
        entities.into_iter().find_map(|(object, flows)| {
            if name == flows.retrieve_from_b {
                Some((object, FlowAction::RetrieveFromB))
            } else if name == flows.delete_from_a {
                Some((object, FlowAction::DeleteFromA))
            } else if name == flows.delete_from_b {
                Some((object, FlowAction::DeleteFromB))
            } else {
                None
            }
        })
    }
}

#[async_trait]
impl FlowInvoker for SandboxFlowRouter {
    fn has_flow(&self, name: &str) -> bool {
        self.route(name).is_some()
    }

    async fn invoke(
        &self,
        name: &str,
        payload: FlowPayload,
    ) -> Result<Option<Record>, SandboxError> {
        let (object, action) = self
            .route(name)
            .ok_or_else(|| SandboxError::unknown_flow(name))?;
        debug!(flow = name, object = %object, action = ?action, "Invoking flow");

        match (action, payload) {
            (FlowAction::RetrieveFromB, FlowPayload::Record(record)) => {
                self.sandbox_b.find(object, &record).await
            }
            (FlowAction::DeleteFromA, FlowPayload::Ids(ids)) => {
                self.sandbox_a.delete_many(object, &ids).await?;
                Ok(None)
            }
            (FlowAction::DeleteFromB, FlowPayload::Ids(ids)) => {
                self.sandbox_b.delete_many(object, &ids).await?;
                Ok(None)
            }
            (_, _) => Err(SandboxError::rejected(format!(
                "flow {name} does not accept this payload"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfmig_core::{IdSet, RecordBuilder};
    use sfmig_sandbox_memory::InMemorySandbox;
    use std::sync::Arc;

    fn router() -> (SandboxFlowRouter, Arc<InMemorySandbox>, Arc<InMemorySandbox>) {
        let a = Arc::new(InMemorySandbox::named("A"));
        let b = Arc::new(InMemorySandbox::named("B"));
        let router = SandboxFlowRouter::new(FlowCatalog::default(), a.clone(), b.clone());
        (router, a, b)
    }

    #[test]
    fn test_knows_every_catalog_flow() {
        let (router, _, _) = router();
        for name in FlowCatalog::default().all_names() {
            assert!(router.has_flow(name), "{name} should be routed");
        }
        assert!(!router.has_flow("syncContactsFlow"));
    }

    #[tokio::test]
    async fn test_retrieve_reads_from_b() {
        let (router, _, b) = router();
        let counterpart = RecordBuilder::new()
            .with("Email", "x@y")
            .build()
            .with_id("b1");
        b.insert(SObjectType::Contact, counterpart.clone()).unwrap();

        let query = RecordBuilder::new().with("Email", "x@y").build().with_id("a1");
        let found = router
            .invoke("retrieveContactFromBFlow", FlowPayload::Record(query))
            .await
            .unwrap();
        assert_eq!(found, Some(counterpart));
    }

    #[tokio::test]
    async fn test_delete_flows_target_their_sandbox() {
        let (router, a, b) = router();
        let ids: IdSet = ["x1".to_string()].into_iter().collect();

        router
            .invoke("deleteAccountFromAFlow", FlowPayload::Ids(ids.clone()))
            .await
            .unwrap();
        assert_eq!(a.delete_calls(), vec![(SObjectType::Account, ids.clone())]);
        assert!(b.delete_calls().is_empty());

        router
            .invoke("deleteContactFromBFlow", FlowPayload::Ids(ids.clone()))
            .await
            .unwrap();
        assert_eq!(b.delete_calls(), vec![(SObjectType::Contact, ids)]);
    }

    #[tokio::test]
    async fn test_rejects_unknown_flow_and_wrong_payload() {
        let (router, _, _) = router();
        let err = router
            .invoke("syncContactsFlow", FlowPayload::Ids(IdSet::new()))
            .await
            .unwrap_err();
        assert!(err.is_unknown_flow());

        let err = router
            .invoke("deleteContactFromAFlow", FlowPayload::Record(Record::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, SandboxError::Rejected { .. }));
    }
}
