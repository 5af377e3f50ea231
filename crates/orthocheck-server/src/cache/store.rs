//! Byte-valued cache store backed by DashMap.

use dashmap::DashMap;
use std::sync::Arc;

/// Process-wide key-value store with explicit eviction.
///
/// Values are wrapped in `Arc` so hits clone a pointer, not the payload.
/// Entries live until evicted or the process exits; there is no TTL and no
/// capacity bound. Individual operations are atomic per key, but callers
/// composing get-then-put sequences get no atomicity across the pair.
#[derive(Clone, Debug, Default)]
pub struct CacheStore {
    entries: Arc<DashMap<String, Arc<Vec<u8>>>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Store or overwrite the value under `key`.
    pub fn put(&self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_string(), Arc::new(value));
        crate::metrics::set_cache_entries(self.entries.len());
    }

    /// Fetch the value under `key`, or `None` when absent.
    pub fn get(&self, key: &str) -> Option<Arc<Vec<u8>>> {
        let result = self.entries.get(key).map(|entry| Arc::clone(&entry));

        if result.is_some() {
            crate::metrics::record_cache_hit();
        } else {
            crate::metrics::record_cache_miss();
        }

        result
    }

    /// Remove the entry under `key` if present; absent keys are a no-op.
    pub fn evict(&self, key: &str) {
        self.entries.remove(key);
        crate::metrics::set_cache_entries(self.entries.len());
    }

    /// Drop every entry.
    pub fn evict_all(&self) {
        self.entries.clear();
        crate::metrics::set_cache_entries(0);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_round_trip() {
        let store = CacheStore::new();
        store.put("k", b"value".to_vec());
        let got = store.get("k").unwrap();
        assert_eq!(got.as_slice(), b"value");
    }

    #[test]
    fn test_get_absent_key_is_none() {
        let store = CacheStore::new();
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_put_overwrites_unconditionally() {
        let store = CacheStore::new();
        store.put("k", b"old".to_vec());
        store.put("k", b"new".to_vec());
        assert_eq!(store.get("k").unwrap().as_slice(), b"new");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_evict_removes_entry() {
        let store = CacheStore::new();
        store.put("k", b"value".to_vec());
        store.evict("k");
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_evict_absent_key_is_noop() {
        let store = CacheStore::new();
        store.put("other", b"value".to_vec());
        store.evict("missing");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_evict_all_clears_everything() {
        let store = CacheStore::new();
        store.put("a", b"1".to_vec());
        store.put("b", b"2".to_vec());
        store.evict_all();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = CacheStore::new();
        let other = store.clone();
        store.put("k", b"value".to_vec());
        assert_eq!(other.get("k").unwrap().as_slice(), b"value");
    }

    #[tokio::test]
    async fn test_concurrent_access_never_mixes_values() {
        use tokio::task::JoinSet;

        let store = CacheStore::new();
        let mut join_set = JoinSet::new();

        // Writers keep overwriting their own key, readers observe only
        // complete values for that key.
        for i in 0..8 {
            let writer = store.clone();
            join_set.spawn(async move {
                for round in 0..100 {
                    writer.put(&format!("key-{i}"), format!("value-{i}-{round}").into_bytes());
                }
            });
            let reader = store.clone();
            join_set.spawn(async move {
                for _ in 0..100 {
                    if let Some(data) = reader.get(&format!("key-{i}")) {
                        let text = String::from_utf8(data.to_vec()).unwrap();
                        assert!(text.starts_with(&format!("value-{i}-")));
                    }
                }
            });
        }

        while let Some(result) = join_set.join_next().await {
            result.unwrap();
        }
    }
}
