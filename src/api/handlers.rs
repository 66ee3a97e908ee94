//! API Handlers
//!
//! HTTP request handlers for each signal cache endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;

use crate::cache::{FileStorage, MemoryStorage, TtlCache};
use crate::config::Config;
use crate::error::{ApiError, Result, StorageError};
use crate::models::{
    DeleteResponse, HealthResponse, RemovedResponse, SetResponse, SetSignalRequest, StatsResponse,
    WindowQuery, WindowResponse,
};
use crate::signal::{DynStorage, SignalCache, TradingSignal};
use crate::window::{compute_window, WindowConfig};

/// Application state shared across all handlers.
///
/// Contains the signal cache wrapped in Arc<RwLock<>> for shared access.
///
/// With a `FileStorage` backend every mutation rewrites the file while the
/// write guard is held, so writes are serialized behind disk I/O. Move the
/// store calls onto `spawn_blocking` if the file grows past a few megabytes.
#[derive(Clone)]
pub struct AppState {
    /// Shared signal cache
    pub cache: Arc<RwLock<SignalCache>>,
    /// TTL applied when a request omits one
    pub default_ttl: u64,
    /// Overscan applied when a window query omits one
    pub default_overscan: usize,
}

impl AppState {
    /// Creates a new AppState with the given cache and default settings.
    pub fn new(cache: SignalCache) -> Self {
        let defaults = Config::default();
        Self {
            cache: Arc::new(RwLock::new(cache)),
            default_ttl: defaults.default_ttl,
            default_overscan: defaults.default_overscan,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the file store when a storage path is configured, otherwise
    /// uses a quota-bounded in-memory store.
    pub fn from_config(config: &Config) -> std::result::Result<Self, StorageError> {
        let storage: DynStorage = match &config.storage_path {
            Some(path) => Box::new(FileStorage::open(path)?),
            None => Box::new(MemoryStorage::with_quota(config.storage_quota_bytes)),
        };

        let cache = TtlCache::new(storage).with_prefix(config.cache_prefix.clone());
        Ok(Self {
            cache: Arc::new(RwLock::new(cache)),
            default_ttl: config.default_ttl,
            default_overscan: config.default_overscan,
        })
    }
}

/// Handler for PUT /signals/:symbol
///
/// Caches a signal under its symbol with an optional TTL.
pub async fn set_signal_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(req): Json<SetSignalRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate(&symbol) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.unwrap_or(state.default_ttl);

    let mut cache = state.cache.write().await;
    cache.try_set(&symbol, &req.signal, ttl).map_err(|e| {
        warn!(symbol = %symbol, error = %e, "Signal not cached");
        ApiError::Internal(e.to_string())
    })?;

    Ok(Json(SetResponse::new(symbol, ttl)))
}

/// Handler for GET /signals/:symbol
///
/// Returns the cached signal, or 404 when missing or expired.
pub async fn get_signal_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<TradingSignal>> {
    // Write lock: a read may evict
    let mut cache = state.cache.write().await;
    cache
        .get(&symbol)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No fresh signal for '{}'", symbol)))
}

/// Handler for DELETE /signals/:symbol
pub async fn delete_signal_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    if cache.remove(&symbol) {
        Ok(Json(DeleteResponse::new(symbol)))
    } else {
        Err(ApiError::NotFound(format!("No signal for '{}'", symbol)))
    }
}

/// Handler for DELETE /signals
///
/// Removes every cached signal, fresh or not.
pub async fn clear_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    let mut cache = state.cache.write().await;
    Json(RemovedResponse {
        removed: cache.clear(),
    })
}

/// Handler for POST /signals/purge
///
/// Removes expired and unreadable signals only.
pub async fn purge_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    let mut cache = state.cache.write().await;
    Json(RemovedResponse {
        removed: cache.purge_expired(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(cache.stats().into())
}

/// Handler for GET /window
///
/// Computes the rendered range and layout for a windowed list.
pub async fn window_handler(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<WindowResponse>> {
    let config = WindowConfig::new(query.item_height, query.container_height)?
        .with_overscan(query.overscan.unwrap_or(state.default_overscan));

    let range = compute_window(&config, query.scroll_top, query.item_count);
    Ok(Json(WindowResponse::new(&range, config.container_height())))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::signal::SignalAction;
    use chrono::{TimeZone, Utc};

    fn test_state() -> (AppState, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        let storage: DynStorage = Box::new(MemoryStorage::new());
        let cache = TtlCache::new(storage).with_clock(clock.clone());
        (AppState::new(cache), clock)
    }

    fn signal(symbol: &str) -> TradingSignal {
        TradingSignal {
            symbol: symbol.to_string(),
            action: SignalAction::Hold,
            confidence: 0.5,
            target_price: None,
            stop_loss: None,
            rationale: String::new(),
            generated_at: Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_new_state_uses_config_defaults() {
        let (state, _) = test_state();
        let defaults = Config::default();
        assert_eq!(state.default_ttl, defaults.default_ttl);
        assert_eq!(state.default_overscan, defaults.default_overscan);
    }

    fn set_request(symbol: &str, ttl: Option<u64>) -> SetSignalRequest {
        SetSignalRequest {
            signal: signal(symbol),
            ttl,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let (state, _) = test_state();

        let result = set_signal_handler(
            State(state.clone()),
            Path("PLTY".to_string()),
            Json(set_request("PLTY", None)),
        )
        .await
        .unwrap();
        assert_eq!(result.ttl, 300);

        let response = get_signal_handler(State(state), Path("PLTY".to_string()))
            .await
            .unwrap();
        assert_eq!(response.0, signal("PLTY"));
    }

    #[tokio::test]
    async fn test_get_expired_is_not_found() {
        let (state, clock) = test_state();
        set_signal_handler(
            State(state.clone()),
            Path("PLTY".to_string()),
            Json(set_request("PLTY", Some(10))),
        )
        .await
        .unwrap();

        clock.advance_secs(11);
        let result = get_signal_handler(State(state), Path("PLTY".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_rejects_mismatched_symbol() {
        let (state, _) = test_state();
        let result = set_signal_handler(
            State(state),
            Path("PLTY".to_string()),
            Json(set_request("AAPL", None)),
        )
        .await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_and_clear_handlers() {
        let (state, _) = test_state();
        for symbol in ["A", "B", "C"] {
            set_signal_handler(
                State(state.clone()),
                Path(symbol.to_string()),
                Json(set_request(symbol, None)),
            )
            .await
            .unwrap();
        }

        assert!(delete_signal_handler(State(state.clone()), Path("A".to_string()))
            .await
            .is_ok());
        assert!(delete_signal_handler(State(state.clone()), Path("A".to_string()))
            .await
            .is_err());

        let cleared = clear_handler(State(state.clone())).await;
        assert_eq!(cleared.removed, 2);
        assert_eq!(stats_handler(State(state)).await.total, 0);
    }

    #[tokio::test]
    async fn test_purge_handler() {
        let (state, clock) = test_state();
        set_signal_handler(
            State(state.clone()),
            Path("OLD".to_string()),
            Json(set_request("OLD", Some(1))),
        )
        .await
        .unwrap();
        set_signal_handler(
            State(state.clone()),
            Path("NEW".to_string()),
            Json(set_request("NEW", Some(600))),
        )
        .await
        .unwrap();
        clock.advance_secs(2);

        assert_eq!(purge_handler(State(state.clone())).await.removed, 1);
        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.valid, 1);
        assert_eq!(stats.expired, 0);
    }

    #[tokio::test]
    async fn test_window_handler() {
        let (state, _) = test_state();
        let query = WindowQuery {
            item_count: 1000,
            scroll_top: 2000.0,
            item_height: 40.0,
            container_height: 400.0,
            overscan: None,
        };

        let response = window_handler(State(state), Query(query)).await.unwrap();
        assert_eq!(response.start_index, 45);
        assert_eq!(response.end_index, Some(65));
        assert_eq!(response.layout.items.top, 1800.0);
    }

    #[tokio::test]
    async fn test_window_handler_rejects_bad_geometry() {
        let (state, _) = test_state();
        let query = WindowQuery {
            item_count: 10,
            scroll_top: 0.0,
            item_height: 0.0,
            container_height: 400.0,
            overscan: Some(2),
        };

        let result = window_handler(State(state), Query(query)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_from_config_uses_prefix() {
        let config = Config {
            cache_prefix: "test_".to_string(),
            ..Config::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.cache.try_read().unwrap().prefix(), "test_");
    }
}
