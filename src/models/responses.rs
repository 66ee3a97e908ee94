//! Response DTOs for the signal cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::window::{LayoutDirectives, WindowRange};

/// Response body for storing a signal (PUT /signals/:symbol)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The symbol that was cached
    pub symbol: String,
    /// TTL applied, in seconds
    pub ttl: u64,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(symbol: impl Into<String>, ttl: u64) -> Self {
        let symbol = symbol.into();
        Self {
            message: format!("Signal for '{}' cached for {}s", symbol, ttl),
            symbol,
            ttl,
        }
    }
}

/// Response body for removing one signal (DELETE /signals/:symbol)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The symbol that was removed
    pub symbol: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            message: format!("Signal for '{}' removed", symbol),
            symbol,
        }
    }
}

/// Response body for bulk removals (DELETE /signals, POST /signals/purge)
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    /// Number of entries deleted
    pub removed: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total: usize,
    pub valid: usize,
    pub expired: usize,
    /// Unparsable entries, already included in `expired`
    pub corrupt: usize,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total: stats.total,
            valid: stats.valid,
            expired: stats.expired,
            corrupt: stats.corrupt,
        }
    }
}

/// Response body for the window endpoint (GET /window)
#[derive(Debug, Clone, Serialize)]
pub struct WindowResponse {
    pub start_index: usize,
    /// Inclusive last index, null when nothing is rendered
    pub end_index: Option<usize>,
    pub visible_count: usize,
    pub rendered_count: usize,
    pub offset_y: f64,
    pub total_height: f64,
    pub layout: LayoutDirectives,
}

impl WindowResponse {
    /// Creates a WindowResponse from a computed range
    pub fn new(range: &WindowRange, container_height: f64) -> Self {
        Self {
            start_index: range.start_index,
            end_index: range.end_index(),
            visible_count: range.visible_count,
            rendered_count: range.len(),
            offset_y: range.offset_y(),
            total_height: range.total_height(),
            layout: LayoutDirectives::for_range(range, container_height),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
