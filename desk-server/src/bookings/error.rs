//! Booking error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("At least one room must be selected")]
    NoRooms,

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Booking {0} not found")]
    NotFound(String),

    #[error("Room(s) {} already booked for the requested dates", .0.join(", "))]
    Conflict(Vec<String>),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        BookingError::Storage(err.to_string())
    }
}

/// Missing bookings are detected by the manager itself, so every
/// repository failure here is a storage failure.
impl From<RepoError> for BookingError {
    fn from(err: RepoError) -> Self {
        BookingError::Storage(err.to_string())
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(msg) => AppError::validation(msg),
            BookingError::NoRooms => AppError::with_message(ErrorCode::BookingNoRooms, err.to_string()),
            BookingError::InvalidDateRange(_) => {
                AppError::with_message(ErrorCode::InvalidDateRange, err.to_string())
            }
            BookingError::NotFound(id) => AppError::booking_not_found(id),
            BookingError::Conflict(rooms) => AppError::booking_conflict(&rooms),
            BookingError::Storage(msg) => {
                tracing::error!(error = %msg, "Booking storage failure");
                AppError::database("Database error")
            }
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
