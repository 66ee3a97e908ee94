//! Signal Cache - durable TTL cache for trading signals
//!
//! Provides a persistent, expiry-aware cache over a pluggable key-value
//! store, a windowed list calculator, and a small HTTP surface over both.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod signal;
pub mod tasks;
pub mod window;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use signal::{SignalCache, TradingSignal};
pub use tasks::spawn_sweep_task;
pub use window::{compute_window, VirtualWindow, WindowConfig, WindowRange};
