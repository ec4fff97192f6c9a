//! Adapter Module
//!
//! The `Cache` capability callers program against, and the namespacing
//! adapter that implements it over any `BackingStore`.

mod multi;
mod namespaced;


use crate::error::Result;

// Re-export public types
pub use multi::MultiGet;
pub use namespaced::NamespacedCache;

// == Cache ==
/// Uniform get/set/delete/has contract over a key/value store.
///
/// TTL arguments are in seconds: `None` uses the implementation's default,
/// `Some(0)` stores without expiration. Keys must be non-empty; an empty key
/// fails with `CacheError::InvalidKey`. Mutating operations return `&Self` so
/// calls can be chained with `?`.
pub trait Cache {
    /// Value type stored in the cache.
    type Value: Clone;

    /// Stores a value. With `overwrite_if_exists == false` an existing entry
    /// is left untouched.
    fn add(
        &self,
        key: &str,
        value: Self::Value,
        ttl: Option<u64>,
        overwrite_if_exists: bool,
    ) -> Result<&Self>;

    /// Stores a value. With `auto_insert_if_absent == false` only an existing
    /// entry is replaced; an absent key stays absent.
    fn set(
        &self,
        key: &str,
        value: Self::Value,
        ttl: Option<u64>,
        auto_insert_if_absent: bool,
    ) -> Result<&Self>;

    /// Returns the stored value, or None if absent.
    fn get(&self, key: &str) -> Result<Option<Self::Value>>;

    /// Returns the stored value, or `default` if absent.
    fn get_or(&self, key: &str, default: Self::Value) -> Result<Self::Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Fetches several keys at once.
    ///
    /// The result holds exactly one entry per distinct requested key, in
    /// request order; missing keys map to None.
    fn get_multi<K: AsRef<str>>(&self, keys: &[K]) -> Result<MultiGet<Option<Self::Value>>>;

    /// Like [`get_multi`](Cache::get_multi), with `default` for missing keys.
    fn get_multi_or<K: AsRef<str>>(
        &self,
        keys: &[K],
        default: Self::Value,
    ) -> Result<MultiGet<Self::Value>> {
        Ok(self
            .get_multi(keys)?
            .map(|value| value.unwrap_or_else(|| default.clone())))
    }

    /// Returns whether a live entry exists under the key.
    fn has(&self, key: &str) -> Result<bool>;

    /// Removes the key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<&Self>;

    /// Removes several keys at once.
    fn delete_multi<K: AsRef<str>>(&self, keys: &[K]) -> Result<&Self>;
}
