use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use orthocheck_core::Category;
use orthocheck_storage::{CategoryRepository, StorageError};
use papaya::HashMap as PapayaHashMap;

const ENTITY: &str = "category";

/// In-memory category repository using a papaya lock-free HashMap.
#[derive(Debug, Default)]
pub struct InMemoryCategories {
    rows: Arc<PapayaHashMap<i64, Category>>,
    /// Atomic sequence for assigning ids on insert.
    next_id: AtomicI64,
}

impl InMemoryCategories {
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
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_all(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self.rows.pin();
        let mut all: Vec<Category> = guard.values().cloned().collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, StorageError> {
        let guard = self.rows.pin();
        Ok(guard.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Category>, StorageError> {
        let guard = self.rows.pin();
        let mut matches: Vec<Category> = guard
            .values()
            .filter(|c| c.name == name)
            .cloned()
            .collect();
        matches.sort_by_key(|c| c.id);
        Ok(matches)
    }

    async fn save(&self, category: &Category) -> Result<Category, StorageError> {
        let mut stored = category.clone();
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
}
