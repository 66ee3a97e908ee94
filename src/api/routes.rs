//! API Routes
//!
//! Configures the Axum router with all signal cache endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_signal_handler, get_signal_handler, health_handler, purge_handler,
    set_signal_handler, stats_handler, window_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /signals/:symbol` - Cache a signal
/// - `GET /signals/:symbol` - Read a fresh signal
/// - `DELETE /signals/:symbol` - Remove one signal
/// - `DELETE /signals` - Remove every signal
/// - `POST /signals/purge` - Remove expired signals
/// - `GET /stats` - Entry classification
/// - `GET /window` - Windowed list range and layout
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, the dashboard is served from elsewhere
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/signals", delete(clear_handler))
        .route("/signals/purge", post(purge_handler))
        .route(
            "/signals/:symbol",
            get(get_signal_handler)
                .put(set_signal_handler)
                .delete(delete_signal_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/window", get(window_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
