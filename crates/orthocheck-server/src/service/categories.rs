//! Category CRUD with cache-aside reads and write-triggered invalidation.

use orthocheck_core::{require_non_empty, validate_id, Category};
use orthocheck_storage::DynCategories;

use crate::cache::{keys, TypedCache};
use crate::service::error::{Result, ServiceError};

const ENTITY: &str = "category";

/// Cache-aside service over the category repository.
///
/// Reads consult the cache first and fall back to the store; writes evict
/// every key the write makes stale before touching the store, then repopulate
/// from the row the store returned. A crash between evict and repopulate
/// leaves a cache miss, never a stale entry.
#[derive(Clone)]
pub struct CategoryService {
    repo: DynCategories,
    cache: TypedCache,
    default_name: String,
}

impl CategoryService {
    pub fn new(repo: DynCategories, cache: TypedCache, default_name: impl Into<String>) -> Self {
        Self {
            repo,
            cache,
            default_name: default_name.into(),
        }
    }

    /// Every category, cached as one aggregate under a fixed key.
    pub async fn get_all(&self) -> Result<Vec<Category>> {
        if let Some(cached) = self.cache.get::<Vec<Category>>(keys::ALL_CATEGORIES) {
            return Ok(cached);
        }
        let all = self.repo.find_all().await?;
        self.cache.put(keys::ALL_CATEGORIES, &all);
        Ok(all)
    }

    /// A single category by id. `None` when no row exists.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        validate_id(id)?;
        let key = keys::category(id);
        if let Some(cached) = self.cache.get::<Category>(&key) {
            return Ok(Some(cached));
        }
        let found = self.repo.find_by_id(id).await?;
        if let Some(category) = &found {
            self.cache.put(&key, category);
        }
        Ok(found)
    }

    /// Persists a category and refreshes its cache entries.
    ///
    /// The aggregate key and the id key (when the row already has an id) are
    /// evicted before the store write so no reader can see pre-write state
    /// after the write lands.
    pub async fn save(&self, category: Category) -> Result<Category> {
        require_non_empty("name", &category.name)?;

        self.cache.evict(keys::ALL_CATEGORIES);
        if let Some(id) = category.id {
            self.cache.evict(&keys::category(id));
        }

        let saved = self.repo.save(&category).await?;
        if let Some(id) = saved.id {
            self.cache.put(&keys::category(id), &saved);
        }
        tracing::debug!(id = ?saved.id, name = %saved.name, "category saved");
        Ok(saved)
    }

    /// Merges the mutable fields of `new_data` into the stored row for `id`.
    pub async fn update(&self, id: i64, new_data: Category) -> Result<Category> {
        validate_id(id)?;
        let mut existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        existing.name = new_data.name;
        existing.status = new_data.status;
        self.save(existing).await
    }

    /// Replaces the status marker on an existing category.
    pub async fn update_status(&self, id: i64, status: impl Into<String>) -> Result<Category> {
        validate_id(id)?;
        let mut existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        existing.status = Some(status.into());
        self.save(existing).await
    }

    /// Clears the status marker on an existing category.
    pub async fn clear_status(&self, id: i64) -> Result<Category> {
        validate_id(id)?;
        let mut existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        existing.status = None;
        self.save(existing).await
    }

    /// Deletes a category, then drops its cache entries.
    pub async fn delete(&self, id: i64) -> Result<()> {
        validate_id(id)?;
        self.repo.delete_by_id(id).await?;
        self.cache.evict(&keys::category(id));
        self.cache.evict(keys::ALL_CATEGORIES);
        tracing::debug!(id, "category deleted");
        Ok(())
    }

    /// The canonical default category, created on first use.
    ///
    /// Resolution order: fixed cache key, then first row matching the
    /// configured name, then insert. Two concurrent first calls can both
    /// miss and both insert; later calls settle on the first row by id, so
    /// the duplicate is unreachable through this path.
    pub async fn get_or_create_default(&self) -> Result<Category> {
        if let Some(cached) = self.cache.get::<Category>(keys::ORTHOGRAPHY_CATEGORY) {
            return Ok(cached);
        }

        let category = match self
            .repo
            .find_by_name(&self.default_name)
            .await?
            .into_iter()
            .next()
        {
            Some(existing) => existing,
            None => {
                tracing::info!(name = %self.default_name, "creating default category");
                self.save(Category::new(self.default_name.clone())).await?
            }
        };

        self.cache.put(keys::ORTHOGRAPHY_CATEGORY, &category);
        Ok(category)
    }

    /// First category matching `name`, if any. Duplicate names resolve to
    /// the lowest id.
    pub async fn find_first_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self.repo.find_by_name(name).await?.into_iter().next())
    }
}
