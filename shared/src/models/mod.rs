//! Data models
//!
//! Shared between stand-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are epoch millis.

pub mod beverage;
pub mod order;

// Re-exports
pub use beverage::*;
pub use order::*;
