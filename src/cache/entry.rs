//! Cache Entry Module
//!
//! The persisted `{value, expiry}` record stored under each cache key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A cached value together with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expiry: i64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` after `now_ms`.
    pub fn new(value: V, ttl_seconds: u64, now_ms: i64) -> Self {
        let ttl_ms = i64::try_from(ttl_seconds)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);

        Self {
            value,
            expiry: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now_ms`.
    ///
    /// An entry whose expiry equals the current instant is already expired.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expiry <= now_ms
    }
}

/// Entry as stored, with the payload still in JSON form.
pub type RawEntry = CacheEntry<Value>;

impl RawEntry {
    /// Parses a stored record.
    pub fn from_text(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Serializes the record for storage.
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
