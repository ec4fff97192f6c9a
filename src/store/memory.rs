//! In-Memory Store Module
//!
//! A process-local `BackingStore`: a locked HashMap of TTL-aware entries with
//! an optional entry limit.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{CacheError, Result};
use crate::store::{current_timestamp_ms, BackingStore, StoreEntry, StoreStats};

// == Memory Store ==
/// Shared in-process key/value store.
///
/// Every operation runs under a single lock acquisition, so each one is
/// atomic. Expired entries are invisible to reads; they are dropped when a
/// write touches them, when the store is full, or by [`purge_expired`].
/// When `max_entries` is reached, writes of new keys are refused with
/// `CacheError::StoreFull`; nothing is evicted.
///
/// [`purge_expired`]: MemoryStore::purge_expired
#[derive(Debug)]
pub struct MemoryStore<V> {
    data: RwLock<HashMap<String, StoreEntry<V>>>,
    stats: RwLock<StoreStats>,
    max_entries: Option<usize>,
}

impl<V> MemoryStore<V> {
    // == Constructors ==
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            stats: RwLock::new(StoreStats::new()),
            max_entries: None,
        }
    }

    /// Creates a store that holds at most `max_entries` entries.
    ///
    /// The limit is enforced on insert; nothing is allocated up front.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            stats: RwLock::new(StoreStats::new()),
            max_entries: Some(max_entries),
        }
    }

    /// Entry limit, if any.
    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    // == Purge Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        let mut data = self.data.write();
        purge_locked(&mut data)
    }

    // == Stats ==
    /// Returns a snapshot of the store counters.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.read().clone();
        stats.total_entries = self.data.read().len();
        stats
    }

    /// Number of entries held, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.data.write().clear();
    }

    // == Insert ==
    /// Inserts under an already-held write lock, enforcing the entry limit.
    fn insert_locked(
        &self,
        data: &mut HashMap<String, StoreEntry<V>>,
        key: &str,
        value: V,
        ttl: u64,
    ) -> Result<()> {
        if let Some(max) = self.max_entries {
            if !data.contains_key(key) && data.len() >= max && purge_locked(data) == 0 {
                self.stats.write().record_rejection();
                warn!("Store full ({} entries), rejecting key={}", max, key);
                return Err(CacheError::StoreFull(format!(
                    "store holds the maximum of {} entries",
                    max
                )));
            }
        }

        data.insert(key.to_string(), StoreEntry::new(value, ttl));
        Ok(())
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn purge_locked<V>(data: &mut HashMap<String, StoreEntry<V>>) -> usize {
    let now = current_timestamp_ms();
    let before = data.len();
    data.retain(|_, entry| !entry.is_expired_at(now));
    before - data.len()
}

fn live<'a, V>(
    data: &'a HashMap<String, StoreEntry<V>>,
    key: &str,
) -> Option<&'a StoreEntry<V>> {
    data.get(key).filter(|entry| !entry.is_expired())
}

impl<V: Clone + Send + Sync> BackingStore for MemoryStore<V> {
    type Value = V;

    fn store_if_absent(&self, key: &str, value: V, ttl: u64) -> Result<bool> {
        let mut data = self.data.write();
        if live(&data, key).is_some() {
            debug!("ADD skipped, key exists: {}", key);
            return Ok(false);
        }
        debug!("ADD key={}, ttl={}", key, ttl);
        self.insert_locked(&mut data, key, value, ttl)?;
        Ok(true)
    }

    fn store(&self, key: &str, value: V, ttl: u64) -> Result<()> {
        debug!("STORE key={}, ttl={}", key, ttl);
        let mut data = self.data.write();
        self.insert_locked(&mut data, key, value, ttl)
    }

    fn replace(&self, key: &str, value: V, ttl: u64) -> Result<bool> {
        let mut data = self.data.write();
        if live(&data, key).is_none() {
            debug!("REPLACE skipped, key absent: {}", key);
            return Ok(false);
        }
        debug!("REPLACE key={}, ttl={}", key, ttl);
        data.insert(key.to_string(), StoreEntry::new(value, ttl));
        Ok(true)
    }

    fn fetch(&self, key: &str) -> Result<Option<V>> {
        let value = live(&self.data.read(), key).map(|entry| entry.value.clone());

        let mut stats = self.stats.write();
        if value.is_some() {
            stats.record_hits(1);
        } else {
            stats.record_misses(1);
        }
        Ok(value)
    }

    fn fetch_multi(&self, keys: &[String]) -> Result<HashMap<String, V>> {
        let found: HashMap<String, V> = {
            let data = self.data.read();
            keys.iter()
                .filter_map(|key| live(&data, key).map(|entry| (key.clone(), entry.value.clone())))
                .collect()
        };
        debug!("FETCH_MULTI requested={}, found={}", keys.len(), found.len());

        let mut stats = self.stats.write();
        stats.record_hits(found.len() as u64);
        stats.record_misses(keys.len().saturating_sub(found.len()) as u64);
        Ok(found)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(live(&self.data.read(), key).is_some())
    }

    fn delete(&self, key: &str) -> Result<()> {
        debug!("DELETE key={}", key);
        self.data.write().remove(key);
        Ok(())
    }

    fn delete_multi(&self, keys: &[String]) -> Result<()> {
        debug!("DELETE_MULTI count={}", keys.len());
        let mut data = self.data.write();
        for key in keys {
            data.remove(key);
        }
        Ok(())
    }
}
