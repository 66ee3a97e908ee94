//! Cache Module
//!
//! Durable TTL cache: expiry is stored with each value, stale entries are
//! evicted lazily on read, and storage faults never reach the caller.

mod clock;
mod codec;
mod entry;
mod stats;
mod storage;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{Codec, JsonCodec};
pub use entry::{CacheEntry, RawEntry};
pub use stats::CacheStats;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::TtlCache;

// == Public Constants ==
/// Namespace prepended to every identifier when none is configured
pub const DEFAULT_CACHE_PREFIX: &str = "signal_cache_";

/// Default storage quota in bytes, matching common browser page storage
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;
