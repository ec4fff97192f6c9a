//! Namespaced Cache Module
//!
//! Binds the `Cache` contract to a `BackingStore`, prefixing every key with a
//! configured namespace and substituting the default TTL.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::{Cache, MultiGet};
use crate::config::AdapterConfig;
use crate::error::{CacheError, Result};
use crate::registry::Binding;
use crate::store::BackingStore;

// == Namespaced Cache ==
/// Cache adapter over a shared store.
///
/// Holds no mutable state: the configuration is fixed at construction and all
/// atomicity, expiry and capacity policy belongs to the store. Share one
/// instance behind an `Arc`.
pub struct NamespacedCache<S: BackingStore> {
    store: Arc<S>,
    config: AdapterConfig,
    binding: Option<Binding>,
}

impl<S: BackingStore> NamespacedCache<S> {
    // == Constructor ==
    /// Creates an adapter over `store`.
    ///
    /// Use [`StoreRegistry::bind`](crate::registry::StoreRegistry::bind)
    /// instead when at most one adapter may use a given store handle.
    pub fn new(store: Arc<S>, config: AdapterConfig) -> Self {
        info!(
            "Cache adapter created: prefix={:?}, default_ttl={}s",
            config.key_prefix(),
            config.default_ttl()
        );
        Self {
            store,
            config,
            binding: None,
        }
    }

    pub(crate) fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Namespace prepended to every key.
    pub fn key_prefix(&self) -> &str {
        self.config.key_prefix()
    }

    /// TTL in seconds applied when a write passes `None`.
    pub fn default_ttl(&self) -> u64 {
        self.config.default_ttl()
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // == Key Namespacing ==
    /// Returns `prefix + key`.
    ///
    /// # Errors
    /// `CacheError::InvalidKey` if `key` is empty.
    pub fn namespaced_key(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey(
                "key must be a non-empty string".to_string(),
            ));
        }
        let prefix = self.config.key_prefix();
        let mut real_key = String::with_capacity(prefix.len() + key.len());
        real_key.push_str(prefix);
        real_key.push_str(key);
        Ok(real_key)
    }

    /// Namespaces every key, failing before any store call if one is invalid.
    fn namespaced_keys<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<String>> {
        keys.iter()
            .map(|key| self.namespaced_key(key.as_ref()))
            .collect()
    }

    fn effective_ttl(&self, ttl: Option<u64>) -> u64 {
        ttl.unwrap_or_else(|| self.config.default_ttl())
    }
}

impl<S: BackingStore> Cache for NamespacedCache<S> {
    type Value = S::Value;

    fn add(
        &self,
        key: &str,
        value: S::Value,
        ttl: Option<u64>,
        overwrite_if_exists: bool,
    ) -> Result<&Self> {
        let ttl = self.effective_ttl(ttl);
        let real_key = self.namespaced_key(key)?;
        if overwrite_if_exists {
            self.store.store(&real_key, value, ttl)?;
        } else {
            self.store.store_if_absent(&real_key, value, ttl)?;
        }
        Ok(self)
    }

    fn set(
        &self,
        key: &str,
        value: S::Value,
        ttl: Option<u64>,
        auto_insert_if_absent: bool,
    ) -> Result<&Self> {
        let ttl = self.effective_ttl(ttl);
        let real_key = self.namespaced_key(key)?;
        if auto_insert_if_absent {
            self.store.store(&real_key, value, ttl)?;
        } else {
            self.store.replace(&real_key, value, ttl)?;
        }
        Ok(self)
    }

    fn get(&self, key: &str) -> Result<Option<S::Value>> {
        let real_key = self.namespaced_key(key)?;
        self.store.fetch(&real_key)
    }

    fn get_multi<K: AsRef<str>>(&self, keys: &[K]) -> Result<MultiGet<Option<S::Value>>> {
        let mut entries: Vec<(String, Option<S::Value>)> = Vec::with_capacity(keys.len());
        let mut slots: HashMap<&str, usize> = HashMap::with_capacity(keys.len());
        let mut real_keys = Vec::with_capacity(keys.len());
        for (key, real_key) in keys.iter().zip(self.namespaced_keys(keys)?) {
            let key = key.as_ref();
            if !slots.contains_key(key) {
                slots.insert(key, entries.len());
                entries.push((key.to_string(), None));
                // Each distinct key reaches the store once.
                real_keys.push(real_key);
            }
        }

        let prefix = self.config.key_prefix();
        for (real_key, value) in self.store.fetch_multi(&real_keys)? {
            let Some(key) = real_key.strip_prefix(prefix) else {
                warn!("Store returned key outside namespace: {}", real_key);
                continue;
            };
            if let Some(&slot) = slots.get(key) {
                entries[slot].1 = Some(value);
            }
        }

        Ok(MultiGet::from_entries(entries))
    }

    fn has(&self, key: &str) -> Result<bool> {
        let real_key = self.namespaced_key(key)?;
        self.store.exists(&real_key)
    }

    fn delete(&self, key: &str) -> Result<&Self> {
        let real_key = self.namespaced_key(key)?;
        self.store.delete(&real_key)?;
        Ok(self)
    }

    fn delete_multi<K: AsRef<str>>(&self, keys: &[K]) -> Result<&Self> {
        let real_keys = self.namespaced_keys(keys)?;
        self.store.delete_multi(&real_keys)?;
        Ok(self)
    }
}

impl<S: BackingStore> fmt::Debug for NamespacedCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespacedCache")
            .field("key_prefix", &self.config.key_prefix())
            .field("default_ttl", &self.config.default_ttl())
            .field("bound", &self.binding.is_some())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::{json, Value};
    use std::thread::sleep;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    fn create_cache(prefix: &str, default_ttl: i64) -> NamespacedCache<MemoryStore<Value>> {
        let config = AdapterConfig::new(prefix, default_ttl).unwrap();
        NamespacedCache::new(Arc::new(MemoryStore::new()), config)
    }

    #[test]
    fn test_set_and_get() {
        let cache = create_cache("app:", 0);

        cache.set("user:1", json!({"name": "a"}), None, true).unwrap();

        assert_eq!(cache.get("user:1").unwrap(), Some(json!({"name": "a"})));
        assert!(cache.has("user:1").unwrap());
    }

    #[test]
    fn test_keys_are_prefixed_in_store() {
        let cache = create_cache("app:", 0);
        cache.set("user:1", json!(1), None, true).unwrap();

        assert!(cache.store().exists("app:user:1").unwrap());
        assert!(!cache.store().exists("user:1").unwrap());
        assert_eq!(cache.namespaced_key("k").unwrap(), "app:k");
    }

    #[test]
    fn test_user_scenario() {
        let cache = create_cache("app:", 0);

        cache.set("user:1", json!({"name": "a"}), None, true).unwrap();
        assert_eq!(cache.get("user:1").unwrap(), Some(json!({"name": "a"})));

        cache.delete("user:1").unwrap();
        assert_eq!(cache.get_or("user:1", json!("none")).unwrap(), json!("none"));
    }

    #[test]
    fn test_delete() {
        let cache = create_cache("app:", 0);
        cache.set("k", json!("v"), None, true).unwrap();

        cache.delete("k").unwrap();

        assert!(!cache.has("k").unwrap());
        assert_eq!(cache.get("k").unwrap(), None);
        assert_eq!(cache.get_or("k", json!(7)).unwrap(), json!(7));
    }

    #[test]
    fn test_delete_absent_key() {
        let cache = create_cache("app:", 0);
        assert_ok!(cache.delete("never-set"));
    }

    #[test]
    fn test_add_without_overwrite_keeps_first_value() {
        let cache = create_cache("app:", 0);

        cache.add("k", json!("v1"), None, false).unwrap();
        cache.add("k", json!("v2"), None, false).unwrap();

        assert_eq!(cache.get("k").unwrap(), Some(json!("v1")));
    }

    #[test]
    fn test_add_with_overwrite_replaces_value() {
        let cache = create_cache("app:", 0);

        cache.add("k", json!("v1"), None, true).unwrap();
        cache.add("k", json!("v2"), None, true).unwrap();

        assert_eq!(cache.get("k").unwrap(), Some(json!("v2")));
    }

    #[test]
    fn test_set_without_auto_insert() {
        let cache = create_cache("app:", 0);

        cache.set("k", json!("v1"), None, false).unwrap();
        assert!(!cache.has("k").unwrap());

        cache.set("k", json!("v1"), None, true).unwrap();
        cache.set("k", json!("v2"), None, false).unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(json!("v2")));
    }

    #[test]
    fn test_chaining() {
        let cache = create_cache("app:", 0);

        cache
            .set("a", json!(1), None, true)
            .and_then(|c| c.add("b", json!(2), None, true))
            .and_then(|c| c.delete("a"))
            .unwrap();

        assert!(!cache.has("a").unwrap());
        assert!(cache.has("b").unwrap());
    }

    #[test]
    fn test_get_multi_with_default() {
        let cache = create_cache("app:", 0);
        cache.set("k2", json!("V2"), None, true).unwrap();

        let result = cache
            .get_multi_or(&["k1", "k2", "k3"], json!("D"))
            .unwrap();

        assert_eq!(
            result.into_vec(),
            vec![
                ("k1".to_string(), json!("D")),
                ("k2".to_string(), json!("V2")),
                ("k3".to_string(), json!("D")),
            ]
        );
    }

    #[test]
    fn test_get_multi_deduplicates_keys() {
        let cache = create_cache("app:", 0);
        cache.set("a", json!(1), None, true).unwrap();

        let result = cache.get_multi(&["a", "b", "a"]).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(result.get("a"), Some(&Some(json!(1))));
        assert_eq!(result.get("b"), Some(&None));
    }

    #[test]
    fn test_get_multi_fetches_repeated_key_once() {
        let cache = create_cache("app:", 0);
        cache.set("a", json!(1), None, true).unwrap();

        let result = cache.get_multi(&["a", "a", "a"]).unwrap();
        assert_eq!(result.len(), 1);

        let stats = cache.store().stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_get_multi_empty() {
        let cache = create_cache("app:", 0);
        let keys: [&str; 0] = [];
        assert!(cache.get_multi(&keys).unwrap().is_empty());
    }

    #[test]
    fn test_delete_multi() {
        let cache = create_cache("app:", 0);
        cache.set("a", json!(1), None, true).unwrap();
        cache.set("b", json!(2), None, true).unwrap();
        cache.set("c", json!(3), None, true).unwrap();

        cache.delete_multi(&["a", "b", "missing"]).unwrap();

        assert!(!cache.has("a").unwrap());
        assert!(!cache.has("b").unwrap());
        assert!(cache.has("c").unwrap());
    }

    #[test]
    fn test_empty_key_rejected_everywhere() {
        let cache = create_cache("app:", 0);

        assert!(matches!(
            cache.add("", json!(1), None, true),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(
            cache.set("", json!(1), None, true),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(cache.get(""), Err(CacheError::InvalidKey(_))));
        assert!(matches!(
            cache.get_or("", json!(0)),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(cache.has(""), Err(CacheError::InvalidKey(_))));
        assert!(matches!(cache.delete(""), Err(CacheError::InvalidKey(_))));
        assert!(matches!(
            cache.get_multi(&["ok", ""]),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(
            cache.delete_multi(&["ok", ""]),
            Err(CacheError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_invalid_batch_touches_nothing() {
        let cache = create_cache("app:", 0);
        cache.set("ok", json!(1), None, true).unwrap();

        assert_err!(cache.delete_multi(&["ok", ""]));

        assert!(cache.has("ok").unwrap());
    }

    #[test]
    fn test_prefixes_isolate_consumers() {
        let store = Arc::new(MemoryStore::new());
        let first = NamespacedCache::new(store.clone(), AdapterConfig::new("one:", 0).unwrap());
        let second = NamespacedCache::new(store, AdapterConfig::new("two:", 0).unwrap());

        first.set("k", json!("first"), None, true).unwrap();
        second.set("k", json!("second"), None, true).unwrap();

        assert_eq!(first.get("k").unwrap(), Some(json!("first")));
        assert_eq!(second.get("k").unwrap(), Some(json!("second")));

        first.delete("k").unwrap();
        assert!(second.has("k").unwrap());
    }

    #[test]
    fn test_default_ttl_applies() {
        let cache = create_cache("app:", 1);

        cache.set("default", json!(1), None, true).unwrap();
        cache.set("forever", json!(2), Some(0), true).unwrap();

        sleep(Duration::from_millis(1100));

        assert!(!cache.has("default").unwrap());
        assert!(cache.has("forever").unwrap());
    }

    #[test]
    fn test_explicit_ttl_applies() {
        let cache = create_cache("app:", 0);

        cache.add("short", json!(1), Some(1), true).unwrap();
        sleep(Duration::from_millis(1100));

        assert_eq!(cache.get("short").unwrap(), None);
    }

    #[test]
    fn test_store_full_is_surfaced() {
        let config = AdapterConfig::new("app:", 0).unwrap();
        let cache = NamespacedCache::new(Arc::new(MemoryStore::with_capacity(1)), config);

        cache.set("a", json!(1), None, true).unwrap();
        assert!(matches!(
            cache.set("b", json!(2), None, true),
            Err(CacheError::StoreFull(_))
        ));
    }

    #[test]
    fn test_accessors_and_debug() {
        let cache = create_cache("app:", 30);
        assert_eq!(cache.key_prefix(), "app:");
        assert_eq!(cache.default_ttl(), 30);

        let debug = format!("{:?}", cache);
        assert!(debug.contains("app:"));
        assert!(debug.contains("bound: false"));
    }
}
