//! JSON extractor answering malformed bodies with the standard envelope

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{AppError, ErrorCode};

/// Drop-in for `axum::Json`; a body that does not parse becomes an
/// [`AppError`] with [`ErrorCode::InvalidRequest`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_error(rejection)),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();
    tracing::debug!(status = %rejection.status(), error = %message, "Rejected request body");
    AppError::with_message(ErrorCode::InvalidRequest, message)
}
