//! Request extractors for bearer sessions

use axum::extract::FromRequestParts;
use http::request::Parts;

use super::error::AuthError;
use super::session::WorkerSession;
use crate::core::ServerState;
use crate::security_log;

/// Raw bearer token from the `Authorization` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn parse(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    fn from_parts(parts: &Parts) -> Result<Self, AuthError> {
        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .ok_or(AuthError::MissingSession)?;
        header
            .to_str()
            .ok()
            .and_then(Self::parse)
            .map(|t| Self(t.to_string()))
            .ok_or(AuthError::InvalidSession)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts)
    }
}

/// Staff-only handlers take a [`WorkerSession`] argument
impl FromRequestParts<ServerState> for WorkerSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<WorkerSession>() {
            return Ok(session.clone());
        }

        let token = match BearerToken::from_parts(parts) {
            Ok(token) => token,
            Err(e) => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(e);
            }
        };

        match state.sessions.validate(&token.0) {
            Ok(session) => {
                parts.extensions.insert(session.clone());
                Ok(session)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = e.to_string(),
                    uri = format!("{:?}", parts.uri)
                );
                Err(e)
            }
        }
    }
}
