//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stale entry sweep: purges expired signals at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
