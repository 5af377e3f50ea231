//! Process-wide key-value cache shared by every service.
//!
//! ## Architecture
//!
//! - [`store::CacheStore`]: the byte-valued store (DashMap), explicit
//!   put/get/evict/evict-all, no TTL and no capacity bound
//! - [`typed::TypedCache`]: serde_json round-trips over the store; an entry
//!   that fails to decode is treated as a miss and evicted
//! - [`keys`]: the key-prefix convention, the only namespacing there is
//!
//! The cache is never authoritative. Services evict stale keys before they
//! persist a new value and repopulate afterward, so a failed write leaves at
//! worst a transient miss.

pub mod keys;
pub mod store;
pub mod typed;

pub use store::CacheStore;
pub use typed::TypedCache;
