//! Repository traits implemented by every storage backend.

use async_trait::async_trait;
use orthocheck_core::{Category, SpellCheckRecord};

use crate::error::StorageError;

/// Storage contract for categories.
///
/// Implementations must be thread-safe (`Send + Sync`). Missing rows are
/// reported as `Ok(None)` / `Ok(false)` by the read operations; errors are
/// reserved for infrastructure failures, except `delete_by_id` which fails
/// with [`StorageError::NotFound`] for an unknown id.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Returns every stored category in id order.
    async fn find_all(&self) -> Result<Vec<Category>, StorageError>;

    /// Reads a category by id. Returns `None` if the row does not exist.
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, StorageError>;

    /// Returns all categories with the given name, in id order.
    ///
    /// Duplicate names are allowed; callers wanting one row take the first.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Category>, StorageError>;

    /// Upserts a category and returns the stored row.
    ///
    /// A category without an id is inserted and assigned one; a category
    /// with an id replaces the stored row under that id.
    async fn save(&self, category: &Category) -> Result<Category, StorageError>;

    /// Deletes a category by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the row does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError>;

    /// Returns whether a category with the given id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool, StorageError>;
}

/// Storage contract for spell-check records.
///
/// Mirrors [`CategoryRepository`] for CRUD and adds the association queries
/// used by the reporting endpoints.
#[async_trait]
pub trait SpellCheckRepository: Send + Sync {
    /// Returns every stored record in id order.
    async fn find_all(&self) -> Result<Vec<SpellCheckRecord>, StorageError>;

    /// Reads a record by id. Returns `None` if the row does not exist.
    async fn find_by_id(&self, id: i64) -> Result<Option<SpellCheckRecord>, StorageError>;

    /// Returns all records with the given name (checked word), in id order.
    async fn find_by_name(&self, name: &str) -> Result<Vec<SpellCheckRecord>, StorageError>;

    /// Upserts a record and returns the stored row.
    async fn save(&self, record: &SpellCheckRecord) -> Result<SpellCheckRecord, StorageError>;

    /// Deletes a record by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the row does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError>;

    /// Returns whether a record with the given id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool, StorageError>;

    /// Returns every record whose category set contains a category with the
    /// given name.
    async fn find_by_category_name(
        &self,
        name: &str,
    ) -> Result<Vec<SpellCheckRecord>, StorageError>;

    /// Returns every record whose error equals `error` and whose category
    /// set contains a category with the given name.
    async fn find_by_error_and_category(
        &self,
        error: &str,
        category_name: &str,
    ) -> Result<Vec<SpellCheckRecord>, StorageError>;
}
