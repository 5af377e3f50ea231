use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use orthocheck_core::SpellCheckRecord;
use orthocheck_storage::{SpellCheckRepository, StorageError};
use papaya::HashMap as PapayaHashMap;

const ENTITY: &str = "spell check record";

/// In-memory spell-check record repository using a papaya lock-free HashMap.
#[derive(Debug, Default)]
pub struct InMemorySpellChecks {
    rows: Arc<PapayaHashMap<i64, SpellCheckRecord>>,
    /// Atomic sequence for assigning ids on insert.
    next_id: AtomicI64,
}

impl InMemorySpellChecks {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(PapayaHashMap::new()),
            next_id: AtomicI64::new(0),
        }
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of stored rows. Intended for tests and diagnostics.
    pub fn count(&self) -> usize {
        self.rows.pin().len()
    }

    fn collect_sorted<F>(&self, keep: F) -> Vec<SpellCheckRecord>
    where
        F: Fn(&SpellCheckRecord) -> bool,
    {
        let guard = self.rows.pin();
        let mut matches: Vec<SpellCheckRecord> =
            guard.values().filter(|r| keep(r)).cloned().collect();
        matches.sort_by_key(|r| r.id);
        matches
    }
}

#[async_trait]
impl SpellCheckRepository for InMemorySpellChecks {
    async fn find_all(&self) -> Result<Vec<SpellCheckRecord>, StorageError> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SpellCheckRecord>, StorageError> {
        let guard = self.rows.pin();
        Ok(guard.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<SpellCheckRecord>, StorageError> {
        Ok(self.collect_sorted(|r| r.name == name))
    }

    async fn save(&self, record: &SpellCheckRecord) -> Result<SpellCheckRecord, StorageError> {
        let mut stored = record.clone();
        let id = match stored.id {
            Some(id) => id,
            None => {
                let id = self.assign_id();
                stored.id = Some(id);
                id
            }
        };
        let guard = self.rows.pin();
        guard.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
        let guard = self.rows.pin();
        match guard.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found(ENTITY, id)),
        }
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StorageError> {
        let guard = self.rows.pin();
        Ok(guard.contains_key(&id))
    }

    async fn find_by_category_name(
        &self,
        name: &str,
    ) -> Result<Vec<SpellCheckRecord>, StorageError> {
        Ok(self.collect_sorted(|r| r.has_category_named(name)))
    }

    async fn find_by_error_and_category(
        &self,
        error: &str,
        category_name: &str,
    ) -> Result<Vec<SpellCheckRecord>, StorageError> {
        Ok(self.collect_sorted(|r| {
            r.error.as_deref() == Some(error) && r.has_category_named(category_name)
        }))
    }
}
