//! Worker (staff account) Model

use serde::{Deserialize, Serialize};

/// Worker response (without password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WorkerInfo {
    pub id: i64,
    /// Login identifier, 1 to 8 characters
    pub identifier: String,
    pub created_at: i64,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for the `Authorization` header
    pub token: String,
    /// Session expiry (epoch millis)
    pub expires_at: i64,
    pub worker: WorkerInfo,
}

/// Current session info returned by `/api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub worker_id: i64,
    pub identifier: String,
    pub issued_at: i64,
    pub expires_at: i64,
}
