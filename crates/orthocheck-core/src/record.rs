use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A persisted spell-check finding for one word (or one bulk summary).
///
/// `name` doubles as the natural key for upsert-by-word semantics; the store
/// key stays the opaque `id`, so duplicate names are possible and lookups by
/// name take the first match. Category membership is unordered and keyed by
/// category id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCheckRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<Category>,
}

impl SpellCheckRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            status: String::new(),
            error: None,
            categories: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Add a category to the membership set without touching the store.
    ///
    /// Idempotent: adding an already-present category leaves the set
    /// unchanged. Returns whether the set grew.
    pub fn attach_category(&mut self, category: Category) -> bool {
        if self.has_category(&category) {
            return false;
        }
        self.categories.push(category);
        true
    }

    /// Remove the category with the given id from the membership set.
    ///
    /// Removing a non-member is a no-op. Returns whether the set shrank.
    pub fn detach_category(&mut self, category_id: i64) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != Some(category_id));
        self.categories.len() != before
    }

    /// Membership test keyed by category id, falling back to name for rows
    /// the store has not assigned an id yet.
    pub fn has_category(&self, category: &Category) -> bool {
        self.categories.iter().any(|c| match (c.id, category.id) {
            (Some(a), Some(b)) => a == b,
            _ => c.name == category.name,
        })
    }

    pub fn has_category_named(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }
}
