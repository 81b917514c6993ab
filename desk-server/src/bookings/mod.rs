//! Bookings
//!
//! - [`BookingManager`]: create / list / search / get / update, transactional
//! - [`availability`]: free rooms for a stay, calendar counts
//! - [`occupancy`]: day overview, room status board, dashboard figures
//! - [`receipt`]: billable lines for selected bookings

pub mod availability;
pub mod error;
pub mod grouping;
pub mod manager;
pub mod occupancy;
pub mod receipt;

pub use error::{BookingError, BookingResult};
pub use manager::{BookingManager, DEFAULT_SEARCH_LIMIT};
