//! Request DTOs for the cache HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn default_true() -> bool {
    true
}

/// Reads an optional TTL in seconds. Negative values, `-1` included, mean
/// "use the adapter default" and map to `None`.
fn deserialize_ttl<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let ttl = Option::<i64>::deserialize(deserializer)?;
    Ok(ttl.and_then(|ttl| u64::try_from(ttl).ok()))
}

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store (any JSON)
/// - `ttl`: Optional TTL in seconds (uses the adapter default if absent or negative)
/// - `auto_insert`: When false, only an existing key is updated (default: true)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default, deserialize_with = "deserialize_ttl")]
    pub ttl: Option<u64>,
    #[serde(default = "default_true")]
    pub auto_insert: bool,
}

/// Request body for the ADD operation (POST /add)
#[derive(Debug, Clone, Deserialize)]
pub struct AddRequest {
    pub key: String,
    pub value: Value,
    #[serde(default, deserialize_with = "deserialize_ttl")]
    pub ttl: Option<u64>,
    /// When false, an existing key keeps its value (default: true)
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

/// Request body for POST /get-multi
#[derive(Debug, Clone, Deserialize)]
pub struct GetMultiRequest {
    pub keys: Vec<String>,
    /// Returned for keys that are not stored (default: null)
    #[serde(default)]
    pub default: Value,
}

/// Request body for POST /del-multi
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteMultiRequest {
    pub keys: Vec<String>,
}
