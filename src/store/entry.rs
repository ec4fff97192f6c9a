//! Store Entry Module
//!
//! Defines the structure for individual stored entries with TTL support.

use chrono::Utc;

// == Store Entry ==
/// A single value held by the in-memory store, with its expiry metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl<V> StoreEntry<V> {
    // == Constructor ==
    /// Creates a new entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - TTL in seconds, 0 means the entry never expires
    pub fn new(value: V, ttl_seconds: u64) -> Self {
        let expires_at = (ttl_seconds > 0).then(|| {
            current_timestamp_ms().saturating_add(ttl_seconds.saturating_mul(1000))
        });

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied clock,
    /// so bulk scans read the time once.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}
