//! Utilities: logging, input validation, money and business timezone

pub mod logger;
pub mod money;
pub mod time;
pub mod validation;
