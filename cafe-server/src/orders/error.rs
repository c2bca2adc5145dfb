//! Order domain errors

use shared::{AppError, ErrorCode};
use thiserror::Error;

use super::validation::{ValidationErrors, ValidationKind};
use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Order {0} not found")]
    NotFound(i64),

    #[error("Revenue exceeds the representable range")]
    RevenueOverflow,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<ValidationErrors> for OrderError {
    fn from(errors: ValidationErrors) -> Self {
        OrderError::Validation(errors)
    }
}

/// Pick the most specific code for a set of validation failures
///
/// An occupied table always wins. Otherwise a specific code is used when
/// every failure belongs to the same group, and `ValidationFailed` when
/// they are mixed.
fn validation_code(errors: &ValidationErrors) -> ErrorCode {
    if errors.contains(ValidationKind::TableOccupied) {
        return ErrorCode::TableOccupied;
    }

    let group = |kind: ValidationKind| match kind {
        ValidationKind::EmptyItems => ErrorCode::OrderEmpty,
        ValidationKind::InvalidStatus => ErrorCode::OrderInvalidStatus,
        ValidationKind::InvalidTableNumber => ErrorCode::TableNumberInvalid,
        k if k.is_item_error() => ErrorCode::OrderInvalidItem,
        _ => ErrorCode::ValidationFailed,
    };

    let mut codes = errors.errors().iter().map(|e| group(e.kind));
    match codes.next() {
        Some(first) if codes.all(|c| c == first) => first,
        _ => ErrorCode::ValidationFailed,
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(errors) => {
                let code = validation_code(&errors);
                let details = serde_json::to_value(&errors).unwrap_or_default();
                AppError::with_message(code, errors.to_string()).with_detail("errors", details)
            }
            OrderError::EmptyOrder => AppError::new(ErrorCode::OrderEmpty),
            OrderError::NotFound(id) => AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {id} not found"),
            )
            .with_detail("order_id", id),
            OrderError::RevenueOverflow => AppError::with_message(
                ErrorCode::InternalError,
                "Revenue exceeds the representable range",
            ),
            OrderError::Repo(e) => e.into(),
        }
    }
}
