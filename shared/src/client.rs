//! Client-related types shared between server and client
//!
//! Request/response types used in API communication that are not domain
//! models themselves.

use serde::{Deserialize, Serialize};

use crate::models::{CleaningStatusMap, LogicalBooking, Room};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

// =============================================================================
// Bootstrap
// =============================================================================

/// Everything the desk loads right after login
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskSnapshot {
    pub rooms: Vec<Room>,
    pub bookings: Vec<LogicalBooking>,
    pub cleaning_status: CleaningStatusMap,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
