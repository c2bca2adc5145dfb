//! Data models
//!
//! Shared between cafe-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod order;
pub mod worker;

// Re-exports
pub use order::*;
pub use worker::*;
