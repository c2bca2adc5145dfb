//! Types shared by the cafe server and its clients: error codes, the
//! response envelope, order and worker models.

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
