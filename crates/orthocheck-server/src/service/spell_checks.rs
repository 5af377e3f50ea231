//! Spell-check record CRUD, word-keyed upsert resolution, and the
//! category association edits.

use orthocheck_core::{require_non_empty, validate_id, SpellCheckRecord, WordCheck};
use orthocheck_storage::DynSpellChecks;

use crate::cache::{keys, TypedCache};
use crate::service::categories::CategoryService;
use crate::service::error::{Result, ServiceError};

const ENTITY: &str = "spell check record";
const CATEGORY_ENTITY: &str = "category";

/// Cache-aside service over the spell-check repository.
///
/// Records are cached under two keys at once: the id key and the word key
/// (`name` is the natural lookup key for upsert-by-word). Every write
/// refreshes or drops both, so a word lookup can never resolve to a row the
/// store no longer holds.
#[derive(Clone)]
pub struct SpellCheckService {
    repo: DynSpellChecks,
    cache: TypedCache,
    categories: CategoryService,
}

impl SpellCheckService {
    pub fn new(repo: DynSpellChecks, cache: TypedCache, categories: CategoryService) -> Self {
        Self {
            repo,
            cache,
            categories,
        }
    }

    /// Every record, cached as one aggregate under a fixed key.
    pub async fn get_all(&self) -> Result<Vec<SpellCheckRecord>> {
        if let Some(cached) = self.cache.get::<Vec<SpellCheckRecord>>(keys::ALL_SPELL_CHECKS) {
            return Ok(cached);
        }
        let all = self.repo.find_all().await?;
        self.cache.put(keys::ALL_SPELL_CHECKS, &all);
        Ok(all)
    }

    /// A single record by id. `None` when no row exists.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<SpellCheckRecord>> {
        validate_id(id)?;
        let key = keys::spell_check(id);
        if let Some(cached) = self.cache.get::<SpellCheckRecord>(&key) {
            return Ok(Some(cached));
        }
        let found = self.repo.find_by_id(id).await?;
        if let Some(record) = &found {
            self.cache.put(&key, record);
        }
        Ok(found)
    }

    /// Persists a record and refreshes both of its cache keys.
    ///
    /// The aggregate, the id key, and the word key are evicted before the
    /// store write, then the id and word keys are repopulated from the saved
    /// row. Refreshing the word key here is what makes repeated checks of
    /// the same word land on one row instead of inserting a second one.
    pub async fn save(&self, record: SpellCheckRecord) -> Result<SpellCheckRecord> {
        require_non_empty("name", &record.name)?;

        self.cache.evict(keys::ALL_SPELL_CHECKS);
        self.cache.evict(&keys::spell_check_by_word(&record.name));
        if let Some(id) = record.id {
            self.cache.evict(&keys::spell_check(id));
        }

        let saved = self.repo.save(&record).await?;
        if let Some(id) = saved.id {
            self.cache.put(&keys::spell_check(id), &saved);
        }
        self.cache.put(&keys::spell_check_by_word(&saved.name), &saved);
        tracing::debug!(id = ?saved.id, word = %saved.name, "spell-check record saved");
        Ok(saved)
    }

    /// Merges the mutable fields of `new_data` into the stored row for `id`.
    ///
    /// Category membership is not touched here; association edits go through
    /// [`attach_category`](Self::attach_category) and
    /// [`detach_category`](Self::detach_category).
    pub async fn update(&self, id: i64, new_data: SpellCheckRecord) -> Result<SpellCheckRecord> {
        validate_id(id)?;
        let mut existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        // A rename leaves the old word key pointing at pre-rename state.
        if existing.name != new_data.name {
            self.cache.evict(&keys::spell_check_by_word(&existing.name));
        }
        existing.name = new_data.name;
        existing.status = new_data.status;
        existing.error = new_data.error;
        self.save(existing).await
    }

    /// Deletes a record, then drops every cache key that referenced it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        validate_id(id)?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        self.repo.delete_by_id(id).await?;
        self.cache.evict(&keys::spell_check(id));
        self.cache.evict(&keys::spell_check_by_word(&existing.name));
        self.cache.evict(keys::ALL_SPELL_CHECKS);
        tracing::debug!(id, word = %existing.name, "spell-check record deleted");
        Ok(())
    }

    /// Resolves the record for a checked word, or constructs a fresh one,
    /// and overwrites its status and error from `check`.
    ///
    /// Resolution order: word-keyed cache entry, then first repository row
    /// matching the word, then a new unsaved record. The status and error
    /// are overwritten on every path, cache hit included, because the
    /// classification may have changed since the entry was cached. The
    /// result is re-cached under the word key and returned WITHOUT being
    /// persisted; the caller owns the save, which lets it attach categories
    /// in memory first and write once.
    pub async fn get_or_create_for_word(&self, check: &WordCheck) -> Result<SpellCheckRecord> {
        require_non_empty("word", &check.word)?;
        let key = keys::spell_check_by_word(&check.word);

        let mut record = match self.cache.get::<SpellCheckRecord>(&key) {
            Some(cached) => cached,
            None => self
                .repo
                .find_by_name(&check.word)
                .await?
                .into_iter()
                .next()
                .unwrap_or_else(|| SpellCheckRecord::new(check.word.clone())),
        };

        record.status = check.status.as_str().to_string();
        record.error = check.error.clone();
        self.cache.put(&key, &record);
        Ok(record)
    }

    /// Adds a category to a record's membership set and persists the result.
    ///
    /// Fails with `NotFound` when either id does not resolve. Attaching an
    /// already-present category is a no-op that still answers with the
    /// stored row.
    pub async fn attach_category(
        &self,
        record_id: i64,
        category_id: i64,
    ) -> Result<SpellCheckRecord> {
        let mut record = self.resolve_record(record_id).await?;
        let category = self
            .categories
            .get_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(CATEGORY_ENTITY, category_id))?;
        record.attach_category(category);
        self.save(record).await
    }

    /// Removes a category from a record's membership set and persists the
    /// result. Same resolution and failure contract as attach; detaching a
    /// non-member is a no-op.
    pub async fn detach_category(
        &self,
        record_id: i64,
        category_id: i64,
    ) -> Result<SpellCheckRecord> {
        let mut record = self.resolve_record(record_id).await?;
        self.categories
            .get_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(CATEGORY_ENTITY, category_id))?;
        record.detach_category(category_id);
        self.save(record).await
    }

    /// Records whose category set contains a category with the given name.
    /// Not cached: every record write would otherwise have to invalidate
    /// per-name aggregates.
    pub async fn records_for_category(&self, name: &str) -> Result<Vec<SpellCheckRecord>> {
        Ok(self.repo.find_by_category_name(name).await?)
    }

    /// Records whose error matches AND whose set contains the named
    /// category.
    pub async fn records_with_error_in_category(
        &self,
        error: &str,
        category_name: &str,
    ) -> Result<Vec<SpellCheckRecord>> {
        Ok(self
            .repo
            .find_by_error_and_category(error, category_name)
            .await?)
    }

    async fn resolve_record(&self, id: i64) -> Result<SpellCheckRecord> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }
}
