//! Repository Module
//!
//! Free functions over a `SqlitePool`, one module per table.

pub mod order;
pub mod worker;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be decoded (bad JSON items, bad decimal text)
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for shared::AppError {
    fn from(err: RepoError) -> Self {
        use shared::ErrorCode;
        match err {
            RepoError::NotFound(msg) => shared::AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => {
                shared::AppError::with_message(ErrorCode::AlreadyExists, msg)
            }
            RepoError::Database(msg) => shared::AppError::database(msg),
            RepoError::Corrupt(msg) => shared::AppError::internal(msg),
        }
    }
}
