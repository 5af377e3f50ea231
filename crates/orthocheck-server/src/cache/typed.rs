//! Typed access over the byte-valued cache store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::store::CacheStore;

/// serde_json round-trips over [`CacheStore`].
///
/// A cached entry that no longer decodes as the expected type is not an
/// error: it is logged, evicted, and reported as a miss so the caller falls
/// back to the source of truth.
#[derive(Clone, Debug, Default)]
pub struct TypedCache {
    store: CacheStore,
}

impl TypedCache {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = self.store.get(key)?;
        match serde_json::from_slice(&data) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to deserialize cached entry");
                self.store.evict(key);
                None
            }
        }
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_vec(value) {
            Ok(data) => self.store.put(key, data),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize entry for cache");
            }
        }
    }

    pub fn evict(&self, key: &str) {
        self.store.evict(key);
    }

    pub fn evict_all(&self) {
        self.store.evict_all();
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }
}
