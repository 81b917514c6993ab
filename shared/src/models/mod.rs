//! Data models
//!
//! Shared between desk-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod booking;
pub mod cleaning;
pub mod customer;
pub mod occupancy;
pub mod receipt;
pub mod room;

// Re-exports
pub use booking::*;
pub use cleaning::*;
pub use customer::*;
pub use occupancy::*;
pub use receipt::*;
pub use room::*;
