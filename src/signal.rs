//! Trading signal value type
//!
//! The artifact the dashboard caches per ticker. Produced elsewhere; this
//! crate only stores it and hands it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{JsonCodec, KeyValueStore, TtlCache};

/// Recommended action for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

/// A computed trading signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSignal {
    /// Ticker symbol the signal is for
    pub symbol: String,
    pub action: SignalAction,
    /// Model confidence in `0.0..=1.0`
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub rationale: String,
    /// When the producer computed the signal; stored as RFC 3339 text
    pub generated_at: DateTime<Utc>,
}

impl TradingSignal {
    /// Checks the fields a consumer relies on.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.symbol.trim().is_empty() {
            return Some("Signal symbol cannot be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Some(format!(
                "Signal confidence must be between 0 and 1, got {}",
                self.confidence
            ));
        }
        None
    }
}

/// Storage backend shared across the HTTP surface.
pub type DynStorage = Box<dyn KeyValueStore + Send + Sync>;

/// Signal cache as used by the service.
pub type SignalCache = TtlCache<TradingSignal, DynStorage, JsonCodec<TradingSignal>>;
