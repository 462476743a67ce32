//! # API Shared
//!
//! Shared definitions for the Symptomatic APIs.
//!
//! Contains:
//! - JSON request/response types (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
