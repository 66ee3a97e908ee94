//! Cache Store Module
//!
//! Expiry-aware memoization layer over a durable key-value store. Every
//! entry lives under `prefix + identifier` and carries its own expiry;
//! stale entries are evicted lazily when read.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{
    CacheEntry, CacheStats, Clock, Codec, JsonCodec, KeyValueStore, MemoryStorage, RawEntry,
    SystemClock, DEFAULT_CACHE_PREFIX,
};
use crate::error::CacheError;

// == TTL Cache ==
/// Durable TTL cache keyed by caller-supplied identifiers.
///
/// The plain operations (`get`, `set`, `clear`, `stats`) never fail: storage
/// and parse faults are logged and degrade to a miss, a no-op or an
/// "expired" classification. The `try_*` forms return the diagnostic.
pub struct TtlCache<V, S = MemoryStorage, C = JsonCodec<V>> {
    /// Backing store, shared with other owners outside the prefix
    storage: S,
    /// Value serializer
    codec: C,
    /// Time source for stamping and checking expiry
    clock: Arc<dyn Clock>,
    /// Namespace prepended to every identifier
    prefix: String,
    _value: PhantomData<fn() -> V>,
}

impl<V, S> TtlCache<V, S, JsonCodec<V>>
where
    V: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    // == Constructor ==
    /// Creates a cache over `storage` with the JSON codec, the system clock
    /// and the default prefix.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            codec: JsonCodec::new(),
            clock: Arc::new(SystemClock),
            prefix: DEFAULT_CACHE_PREFIX.to_string(),
            _value: PhantomData,
        }
    }
}

impl<V, S, C> TtlCache<V, S, C>
where
    S: KeyValueStore,
    C: Codec<V>,
{
    /// Replaces the value codec.
    pub fn with_codec<C2: Codec<V>>(self, codec: C2) -> TtlCache<V, S, C2> {
        TtlCache {
            storage: self.storage,
            codec,
            clock: self.clock,
            prefix: self.prefix,
            _value: PhantomData,
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the key namespace.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Namespace prepended to identifiers.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Read access to the backing store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write access to the backing store.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Storage key for `identifier`.
    pub fn cache_key(&self, identifier: &str) -> String {
        format!("{}{}", self.prefix, identifier)
    }

    // == Get ==
    /// Returns the fresh value for `identifier`, if any.
    ///
    /// Expired entries are deleted from the store. Any fault reads as a miss.
    pub fn get(&mut self, identifier: &str) -> Option<V> {
        match self.try_get(identifier) {
            Ok(value) => value,
            Err(e) => {
                warn!(identifier, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Like [`get`](Self::get) but surfaces the fault instead of logging it.
    pub fn try_get(&mut self, identifier: &str) -> Result<Option<V>, CacheError> {
        let key = self.cache_key(identifier);

        let Some(raw) = self.storage.get_item(&key)? else {
            debug!(key = %key, "Cache miss");
            return Ok(None);
        };

        let entry = parse_entry(&key, &raw)?;

        if entry.is_expired(self.clock.now_ms()) {
            self.storage.remove_item(&key)?;
            debug!(key = %key, expiry = entry.expiry, "Evicted expired entry");
            return Ok(None);
        }

        let value = self.codec.decode(entry.value)?;
        debug!(key = %key, "Cache hit");
        Ok(Some(value))
    }

    // == Set ==
    /// Stores `value` for `ttl_seconds`, replacing any previous entry.
    ///
    /// Best effort: a failed write is logged and otherwise ignored.
    pub fn set(&mut self, identifier: &str, value: &V, ttl_seconds: u64) {
        if let Err(e) = self.try_set(identifier, value, ttl_seconds) {
            warn!(identifier, error = %e, "Cache write failed, entry not stored");
        }
    }

    /// Like [`set`](Self::set) but surfaces the fault instead of logging it.
    pub fn try_set(&mut self, identifier: &str, value: &V, ttl_seconds: u64) -> Result<(), CacheError> {
        let key = self.cache_key(identifier);
        let payload = self.codec.encode(value)?;
        let entry = CacheEntry::new(payload, ttl_seconds, self.clock.now_ms());
        let text = entry
            .to_text()
            .map_err(|e| CacheError::Codec(e.to_string()))?;

        self.storage.set_item(&key, &text)?;
        debug!(key = %key, expiry = entry.expiry, "Cached entry");
        Ok(())
    }

    // == Remove ==
    /// Deletes the entry for `identifier`. Returns true if one was present.
    pub fn remove(&mut self, identifier: &str) -> bool {
        let key = self.cache_key(identifier);
        let result = self
            .storage
            .get_item(&key)
            .and_then(|raw| match raw {
                Some(_) => self.storage.remove_item(&key).map(|_| true),
                None => Ok(false),
            });

        match result {
            Ok(removed) => removed,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache remove failed");
                false
            }
        }
    }

    // == Contains ==
    /// Checks for a fresh entry without evicting or decoding anything.
    pub fn contains(&self, identifier: &str) -> bool {
        let key = self.cache_key(identifier);
        match self.storage.get_item(&key) {
            Ok(Some(raw)) => RawEntry::from_text(&raw)
                .map(|entry| !entry.is_expired(self.clock.now_ms()))
                .unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache lookup failed");
                false
            }
        }
    }

    // == Clear ==
    /// Deletes every namespaced entry regardless of expiry.
    ///
    /// Returns the number of keys actually deleted. Keys outside the prefix
    /// are never touched.
    pub fn clear(&mut self) -> usize {
        let keys = match self.namespaced_keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Cache clear could not list keys");
                return 0;
            }
        };

        let mut removed = 0;
        for key in keys {
            match self.storage.remove_item(&key) {
                Ok(()) => removed += 1,
                Err(e) => warn!(key = %key, error = %e, "Cache clear could not remove key"),
            }
        }

        debug!(removed, "Cleared cache namespace");
        removed
    }

    /// Like [`clear`](Self::clear) but stops at the first storage fault.
    pub fn try_clear(&mut self) -> Result<usize, CacheError> {
        let keys = self.namespaced_keys()?;
        for key in &keys {
            self.storage.remove_item(key)?;
        }
        Ok(keys.len())
    }

    // == Purge Expired ==
    /// Deletes expired and unreadable namespaced entries, keeping fresh ones.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let keys = match self.namespaced_keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Cache purge could not list keys");
                return 0;
            }
        };

        let now = self.clock.now_ms();
        let mut removed = 0;
        for key in keys {
            let stale = match self.storage.get_item(&key) {
                Ok(Some(raw)) => RawEntry::from_text(&raw)
                    .map(|entry| entry.is_expired(now))
                    .unwrap_or(true),
                Ok(None) => false,
                Err(e) => {
                    warn!(key = %key, error = %e, "Cache purge could not read key");
                    false
                }
            };

            if stale {
                match self.storage.remove_item(&key) {
                    Ok(()) => removed += 1,
                    Err(e) => warn!(key = %key, error = %e, "Cache purge could not remove key"),
                }
            }
        }

        if removed > 0 {
            debug!(removed, "Purged stale cache entries");
        }
        removed
    }

    // == Stats ==
    /// Classifies the namespaced entries as valid or expired.
    ///
    /// Read-only: nothing is evicted. Unparsable entries count as expired.
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::new();

        let keys = match self.namespaced_keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Cache stats could not list keys");
                return stats;
            }
        };

        let now = self.clock.now_ms();
        for key in keys {
            match self.storage.get_item(&key) {
                Ok(Some(raw)) => match RawEntry::from_text(&raw) {
                    Ok(entry) if entry.is_expired(now) => stats.record_expired(),
                    Ok(_) => stats.record_valid(),
                    Err(_) => stats.record_corrupt(),
                },
                // Removed between listing and reading
                Ok(None) => {}
                Err(e) => {
                    warn!(key = %key, error = %e, "Cache stats could not read key");
                    stats.record_expired();
                }
            }
        }

        stats
    }

    fn namespaced_keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self
            .storage
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix))
            .collect())
    }
}

impl<V, S, C> fmt::Debug for TtlCache<V, S, C>
where
    S: fmt::Debug,
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("storage", &self.storage)
            .field("codec", &self.codec)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

fn parse_entry(key: &str, raw: &str) -> Result<RawEntry, CacheError> {
    RawEntry::from_text(raw).map_err(|source| CacheError::MalformedEntry {
        key: key.to_string(),
        source,
    })
}
