//! Errors shared by the server and its clients
//!
//! Handlers return [`AppError`]; it renders as an [`ApiResponse`] body with
//! the status from [`ErrorCode::http_status`].
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::TableOccupied).with_detail("table_number", 2);
//! let response = ApiResponse::<()>::from(err);
//! assert_eq!(response.code, Some(7002));
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
