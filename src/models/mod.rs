//! Request and Response models for the signal cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{SetSignalRequest, WindowQuery};
pub use responses::{
    DeleteResponse, HealthResponse, RemovedResponse, SetResponse, StatsResponse, WindowResponse,
};
