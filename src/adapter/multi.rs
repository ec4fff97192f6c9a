//! Ordered result of a batched fetch.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key/value pairs returned by `Cache::get_multi`, in request order.
///
/// Each requested key appears once, even if it was requested several times.
/// Serializes as a JSON object whose fields keep that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiGet<V> {
    entries: Vec<(String, V)>,
}

impl<V> MultiGet<V> {
    pub(crate) fn from_entries(entries: Vec<(String, V)>) -> Self {
        Self { entries }
    }

    /// Value for a key, or None if the key was not requested.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Requested keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Applies `f` to every value, keeping keys and order.
    pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> MultiGet<U> {
        MultiGet {
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }

    pub fn into_vec(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V> IntoIterator for MultiGet<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for MultiGet<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
