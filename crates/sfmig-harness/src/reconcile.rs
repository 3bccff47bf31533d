//! Cleanup of test records across the two sandboxes.
//!
//! Records created in sandbox A may or may not have been migrated to B yet.
//! The reconciler finds each record's counterpart in B by business key,
//! deletes the counterparts it found, then deletes the originals in A:
//!
//! ```text
//!  batch in A ──lookup──▶ counterparts in B ──delete──▶ B
//!      │                                            then
//!      └──────────────────────────────────delete──▶ A
//! ```
//!
//! A failed lookup only costs that one counterpart. A failed delete fails
//! the whole run.

use sfmig_core::{IdSet, Record, RecordBatch, SObjectType, ids_of};
use sfmig_sandbox::{BulkDelete, DynSandbox, ObjectScope, RecordLookup, SandboxError};
use tracing::{debug, error, info, warn};

use crate::error::{DeleteFailure, HarnessError, LookupFailure, SandboxSide};

/// Outcome of a successful reconciliation.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Number of records from A whose counterpart was looked up.
    pub looked_up: usize,
    /// Counterparts found in B, in lookup order.
    pub counterparts: RecordBatch,
    /// A-side Ids with no counterpart in B yet.
    pub pending_replication: Vec<String>,
    /// Lookups that errored and were treated as not found.
    pub lookup_failures: Vec<LookupFailure>,
    pub deleted_in_a: IdSet,
    pub deleted_in_b: IdSet,
}

impl ReconcileReport {
    /// True when every record had its counterpart located.
    pub fn fully_matched(&self) -> bool {
        self.pending_replication.is_empty() && self.lookup_failures.is_empty()
    }
}

/// Deletes test records from sandbox A and their counterparts from sandbox B.
#[derive(Debug, Default, Clone, Copy)]
pub struct SandboxReconciler;

impl SandboxReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Looks up every record of `batch_in_a` in B, deletes the matches in B,
    /// then deletes the whole batch in A.
    ///
    /// The A delete always runs, even when the B delete failed or the batch
    /// is empty.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::InvalidBatch`] if a record has no Id; nothing is called.
    /// - [`HarnessError::CleanupFailed`] if either bulk delete fails.
    ///
    /// Lookup errors are not returned; they are logged and listed in
    /// [`ReconcileReport::lookup_failures`].
    pub async fn reconcile_and_delete(
        &self,
        batch_in_a: &[Record],
        lookup_in_b: &dyn RecordLookup,
        delete_in_a: &dyn BulkDelete,
        delete_in_b: &dyn BulkDelete,
    ) -> Result<ReconcileReport, HarnessError> {
        let ids_in_a = ids_of(batch_in_a)?;
        let mut report = ReconcileReport::default();

        let mut ids_in_b = IdSet::new();
        for record in batch_in_a {
            let id_in_a = record.id().unwrap_or_default().to_string();
            report.looked_up += 1;
            match lookup_in_b.lookup(record).await {
                Ok(Some(counterpart)) => match counterpart.id() {
                    Some(id_in_b) => {
                        debug!(id_in_a = %id_in_a, id_in_b, "Counterpart found in B");
                        ids_in_b.insert(id_in_b.to_string());
                        report.counterparts.push(counterpart);
                    }
                    None => {
                        warn!(id_in_a = %id_in_a, "Counterpart in B came back without an Id");
                        report.lookup_failures.push(LookupFailure {
                            id: id_in_a,
                            error: SandboxError::rejected("counterpart returned without an Id"),
                        });
                    }
                },
                Ok(None) => {
                    debug!(id_in_a = %id_in_a, "No counterpart in B yet");
                    report.pending_replication.push(id_in_a);
                }
                Err(err) => {
                    warn!(
                        id_in_a = %id_in_a,
                        category = %err.category(),
                        error = %err,
                        "Counterpart lookup failed, treating as not found"
                    );
                    report
                        .lookup_failures
                        .push(LookupFailure { id: id_in_a, error: err });
                }
            }
        }

        let mut failures = Vec::new();
        if !ids_in_b.is_empty() {
            match delete_in_b.delete_all(&ids_in_b).await {
                Ok(()) => report.deleted_in_b = ids_in_b,
                Err(err) => {
                    error!(sandbox = %SandboxSide::B, count = ids_in_b.len(), error = %err, "Bulk delete failed");
                    failures.push(DeleteFailure {
                        side: SandboxSide::B,
                        ids: ids_in_b,
                        error: err,
                    });
                }
            }
        }

        match delete_in_a.delete_all(&ids_in_a).await {
            Ok(()) => report.deleted_in_a = ids_in_a,
            Err(err) => {
                error!(sandbox = %SandboxSide::A, count = ids_in_a.len(), error = %err, "Bulk delete failed");
                failures.push(DeleteFailure {
                    side: SandboxSide::A,
                    ids: ids_in_a,
                    error: err,
                });
            }
        }

        if !failures.is_empty() {
            return Err(HarnessError::CleanupFailed { failures });
        }

        info!(
            looked_up = report.looked_up,
            deleted_in_b = report.deleted_in_b.len(),
            deleted_in_a = report.deleted_in_a.len(),
            pending = report.pending_replication.len(),
            lookup_failures = report.lookup_failures.len(),
            "Sandboxes reconciled"
        );
        Ok(report)
    }

    /// Runs [`reconcile_and_delete`](Self::reconcile_and_delete) against two
    /// sandbox clients, scoped to `object`.
    pub async fn reconcile_sandboxes(
        &self,
        object: SObjectType,
        batch_in_a: &[Record],
        sandbox_a: DynSandbox,
        sandbox_b: DynSandbox,
    ) -> Result<ReconcileReport, HarnessError> {
        let scope_a = ObjectScope::new(sandbox_a, object);
        let scope_b = ObjectScope::new(sandbox_b, object);
        self.reconcile_and_delete(batch_in_a, &scope_b, &scope_a, &scope_b)
            .await
    }
}
