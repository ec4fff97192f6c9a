//! Store Module
//!
//! The primitive key/value contract an adapter delegates to, and an
//! in-process implementation of it.

mod entry;
mod memory;
mod stats;

use std::collections::HashMap;

use crate::error::Result;

// Re-export public types
pub use entry::{current_timestamp_ms, StoreEntry};
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Backing Store ==
/// Primitive operations of a shared key/value engine.
///
/// Keys reaching a store are already namespaced. TTLs are in seconds and
/// `0` means the entry never expires. Implementations own eviction, memory
/// limits, expiry and atomicity: each method must behave as one atomic step
/// with respect to concurrent callers.
pub trait BackingStore: Send + Sync {
    /// Value type held by the store.
    type Value: Clone + Send + Sync;

    /// Stores the value only if the key is absent. Returns whether it was stored.
    fn store_if_absent(&self, key: &str, value: Self::Value, ttl: u64) -> Result<bool>;

    /// Stores the value, replacing any existing entry.
    fn store(&self, key: &str, value: Self::Value, ttl: u64) -> Result<()>;

    /// Fetches a value, or None if the key is absent or expired.
    fn fetch(&self, key: &str) -> Result<Option<Self::Value>>;

    /// Fetches several values at once. Only keys that were found appear in the map.
    fn fetch_multi(&self, keys: &[String]) -> Result<HashMap<String, Self::Value>>;

    /// Returns whether a live entry exists under the key.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Removes the key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Removes several keys at once.
    fn delete_multi(&self, keys: &[String]) -> Result<()>;

    /// Stores the value only if the key is present. Returns whether it was stored.
    ///
    /// The provided implementation checks and writes in two steps; stores that
    /// can do better should override it.
    fn replace(&self, key: &str, value: Self::Value, ttl: u64) -> Result<bool> {
        if self.exists(key)? {
            self.store(key, value, ttl)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
