//! Request DTOs for the signal cache API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::signal::TradingSignal;

/// Request body for storing a signal (PUT /signals/:symbol)
///
/// # Fields
/// - `signal`: The signal to cache
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetSignalRequest {
    /// The signal to cache
    pub signal: TradingSignal,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetSignalRequest {
    /// Validates the request against the symbol in the path.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, symbol: &str) -> Option<String> {
        if self.signal.symbol != symbol {
            return Some(format!(
                "Signal symbol '{}' does not match path symbol '{}'",
                self.signal.symbol, symbol
            ));
        }
        if self.ttl == Some(0) {
            return Some("TTL must be at least 1 second".to_string());
        }
        self.signal.validate()
    }
}

/// Query string for the window endpoint (GET /window)
#[derive(Debug, Clone, Deserialize)]
pub struct WindowQuery {
    /// Length of the list being rendered
    pub item_count: usize,
    /// Current scroll offset
    #[serde(default)]
    pub scroll_top: f64,
    pub item_height: f64,
    pub container_height: f64,
    /// Overscan rows (service default if not specified)
    #[serde(default)]
    pub overscan: Option<usize>,
}
