//! Authentication errors

use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Worker '{0}' not found")]
    WorkerNotFound(String),

    #[error("Invalid identifier or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    MissingSession,

    #[error("Session token is invalid or revoked")]
    InvalidSession,

    #[error("Session has expired")]
    SessionExpired,

    #[error("Worker '{0}' already exists")]
    IdentifierTaken(String),

    #[error("Worker identifier must be 1 to 8 characters, got '{0}'")]
    InvalidIdentifier(String),

    #[error("Authentication failed: {0}")]
    Internal(String),
}

impl From<RepoError> for AuthError {
    fn from(err: RepoError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::WorkerNotFound(identifier) => AppError::with_message(
                ErrorCode::WorkerNotFound,
                format!("Worker '{identifier}' not found"),
            )
            .with_detail("identifier", identifier),
            AuthError::InvalidCredentials => AppError::invalid_credentials(),
            AuthError::MissingSession => AppError::not_authenticated(),
            AuthError::InvalidSession => AppError::invalid_token("Session token is invalid"),
            AuthError::SessionExpired => AppError::session_expired(),
            AuthError::IdentifierTaken(identifier) => AppError::new(ErrorCode::WorkerIdentifierExists)
                .with_detail("identifier", identifier),
            AuthError::InvalidIdentifier(identifier) => AppError::new(ErrorCode::WorkerIdentifierInvalid)
                .with_detail("identifier", identifier),
            AuthError::Internal(msg) => AppError::internal(msg),
        }
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        AppError::from(self).into_response()
    }
}
