//! # API Shared
//!
//! Shared utilities and definitions for Folio APIs.
//!
//! Contains:
//! - Request/response wire types (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//! - Credential extraction helpers
//!
//! Used by `api-rest` and `folio-cli` for common functionality.

pub mod auth;
pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
