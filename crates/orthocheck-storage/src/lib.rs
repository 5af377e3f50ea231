//! # orthocheck-storage
//!
//! Storage abstraction layer for the orthocheck server.
//!
//! This crate defines the repository traits that all storage backends must
//! implement. It does not contain any implementations - those are provided by
//! separate crates.
//!
//! ## Overview
//!
//! Two traits cover the two persisted entities:
//! - [`CategoryRepository`] for categories
//! - [`SpellCheckRepository`] for spell-check records, with the extra
//!   association queries (by category name, by error within a category)
//!
//! `save` is an upsert on both traits: a row without an id is inserted and
//! gets one assigned, a row with an id replaces the stored row.
//!
//! ## Example
//!
//! ```ignore
//! use orthocheck_storage::{CategoryRepository, StorageError};
//!
//! async fn first_by_name(
//!     repo: &dyn CategoryRepository,
//!     name: &str,
//! ) -> Result<Option<orthocheck_core::Category>, StorageError> {
//!     Ok(repo.find_by_name(name).await?.into_iter().next())
//! }
//! ```

mod error;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::{CategoryRepository, SpellCheckRepository};

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared category repository trait object.
pub type DynCategories = std::sync::Arc<dyn CategoryRepository>;

/// Type alias for a shared spell-check repository trait object.
pub type DynSpellChecks = std::sync::Arc<dyn SpellCheckRepository>;
