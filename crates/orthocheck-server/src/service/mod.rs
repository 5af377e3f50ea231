//! Cache-aside services over the repositories.
//!
//! Both services share one [`TypedCache`](crate::cache::TypedCache) handle;
//! the key prefixes in [`cache::keys`](crate::cache::keys) are the only
//! namespacing. Writes evict stale keys before the store write and
//! repopulate afterward, so a failed write leaves at worst a cache miss.

pub mod categories;
pub mod error;
pub mod spell_checks;

pub use categories::CategoryService;
pub use error::{Result, ServiceError};
pub use spell_checks::SpellCheckService;
