//! Shared types for the front desk
//!
//! Domain models, the date/status codec, error types and the client
//! session state used by desk-server and its clients.

pub mod client;
pub mod codec;
pub mod error;
pub mod models;
pub mod session;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
