//! Shared types for the lemonade stand backend
//!
//! Data models exchanged over the HTTP API, the unified error system,
//! and small utilities used by the server crate.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
