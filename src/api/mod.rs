//! API Module
//!
//! HTTP handlers and routing for the signal cache REST API.
//!
//! # Endpoints
//! - `PUT /signals/:symbol` - Cache a signal
//! - `GET /signals/:symbol` - Read a fresh signal
//! - `DELETE /signals/:symbol` - Remove one signal
//! - `DELETE /signals` - Remove every signal
//! - `POST /signals/purge` - Remove expired signals
//! - `GET /stats` - Entry classification
//! - `GET /window` - Windowed list range and layout
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
