use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use sfmig_core::{IdSet, Record, SObjectType, generate_record_id};
use sfmig_sandbox::{SandboxClient, SandboxError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

pub type RecordKey = String; // Format: "Object/Id"

pub(crate) fn make_record_key(object: SObjectType, id: &str) -> RecordKey {
    format!("{object}/{id}")
}

/// In-memory CRM sandbox using papaya lock-free HashMap.
///
/// Besides storage it records every bulk delete it receives and can be told
/// to fail lookups or deletes, which is what the reconciler tests need.
#[derive(Debug)]
pub struct InMemorySandbox {
    name: String,
    /// Records keyed by "Object/Id"
    data: PapayaHashMap<RecordKey, Record>,
    /// Correlation values whose lookups fail with a connection error
    failing_lookups: Mutex<HashSet<String>>,
    fail_deletes: AtomicBool,
    /// Every delete_many call as (object, ids), in arrival order
    delete_log: Mutex<Vec<(SObjectType, IdSet)>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemorySandbox {
    /// Creates an empty sandbox called "memory".
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Creates an empty sandbox with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: PapayaHashMap::new(),
            failing_lookups: Mutex::new(HashSet::new()),
            fail_deletes: AtomicBool::new(false),
            delete_log: Mutex::new(Vec::new()),
        }
    }

    /// Stores `record` under its own Id, replacing any previous version.
    ///
    /// Used to seed counterparts with known Ids.
    pub fn insert(&self, object: SObjectType, record: Record) -> Result<(), SandboxError> {
        let id = record
            .id()
            .ok_or_else(|| SandboxError::rejected("record has no Id"))?
            .to_string();
        let guard = self.data.pin();
        guard.insert(make_record_key(object, &id), record);
        Ok(())
    }

    pub fn contains(&self, object: SObjectType, id: &str) -> bool {
        let guard = self.data.pin();
        guard.contains_key(&make_record_key(object, id))
    }

    /// Number of stored records of `object`.
    pub fn count(&self, object: SObjectType) -> usize {
        let prefix = format!("{object}/");
        let guard = self.data.pin();
        guard.keys().filter(|k| k.starts_with(&prefix)).count()
    }

    /// Makes lookups whose correlation fields contain `value` fail.
    pub fn fail_lookups_for(&self, value: impl Into<String>) {
        lock(&self.failing_lookups).insert(value.into());
    }

    /// Makes every subsequent `delete_many` fail (or succeed again).
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Delete calls received so far.
    pub fn delete_calls(&self) -> Vec<(SObjectType, IdSet)> {
        lock(&self.delete_log).clone()
    }

    fn lookup_should_fail(&self, object: SObjectType, correlation: &Record) -> bool {
        let failing = lock(&self.failing_lookups);
        if failing.is_empty() {
            return false;
        }
        object.correlation_fields().iter().any(|field| {
            correlation
                .get_str(field)
                .is_some_and(|value| failing.contains(value))
        })
    }
}

impl Default for InMemorySandbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SandboxClient for InMemorySandbox {
    async fn create(&self, object: SObjectType, record: &Record) -> Result<Record, SandboxError> {
        if record.id().is_some() {
            return Err(SandboxError::rejected(
                "cannot create a record that already has an Id",
            ));
        }
        let id = generate_record_id(object);
        let stored = record.clone().with_id(id.clone());
        {
            let guard = self.data.pin();
            guard.insert(make_record_key(object, &id), stored.clone());
        }
        debug!(sandbox = %self.name, object = %object, id = %id, "Stored record");
        Ok(stored)
    }

    async fn read(&self, object: SObjectType, id: &str) -> Result<Option<Record>, SandboxError> {
        let guard = self.data.pin();
        Ok(guard.get(&make_record_key(object, id)).cloned())
    }

    async fn find(
        &self,
        object: SObjectType,
        correlation: &Record,
    ) -> Result<Option<Record>, SandboxError> {
        if self.lookup_should_fail(object, correlation) {
            return Err(SandboxError::connection(format!(
                "sandbox {} is unreachable",
                self.name
            )));
        }
        let prefix = format!("{object}/");
        let guard = self.data.pin();
        let found = guard
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, stored)| stored)
            .find(|stored| stored.correlates_with(correlation, object))
            .cloned();
        Ok(found)
    }

    async fn delete_many(&self, object: SObjectType, ids: &IdSet) -> Result<(), SandboxError> {
        lock(&self.delete_log).push((object, ids.clone()));
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(SandboxError::connection(format!(
                "bulk delete against sandbox {} failed",
                self.name
            )));
        }
        let removed = {
            let guard = self.data.pin();
            ids.iter()
                .filter(|id| guard.remove(&make_record_key(object, id)).is_some())
                .count()
        };
        debug!(
            sandbox = %self.name,
            object = %object,
            requested = ids.len(),
            removed,
            "Bulk delete applied"
        );
        Ok(())
    }

    fn sandbox_name(&self) -> &str {
        &self.name
    }
}
