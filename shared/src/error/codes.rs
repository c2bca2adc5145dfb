//! Error codes
//!
//! The thousands digit groups codes by domain: 0 general, 1 auth, 4 order,
//! 7 table, 8 worker, 9 system. Codes serialize as plain numbers.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares every code once with its number, HTTP status and default message
macro_rules! error_codes {
    ($($name:ident = $value:literal => $status:ident, $message:literal;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $($name = $value,)*
        }

        impl ErrorCode {
            /// Default English message
            pub const fn message(&self) -> &'static str {
                match self {
                    $(Self::$name => $message,)*
                }
            }

            pub fn http_status(&self) -> StatusCode {
                match self {
                    $(Self::$name => StatusCode::$status,)*
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$name),)*
                    _ => Err(InvalidErrorCode(value)),
                }
            }
        }
    };
}

error_codes! {
    Success = 0 => OK, "Operation completed successfully";
    ValidationFailed = 2 => BAD_REQUEST, "Validation failed";
    NotFound = 3 => NOT_FOUND, "Resource not found";
    AlreadyExists = 4 => CONFLICT, "Resource already exists";
    InvalidRequest = 5 => BAD_REQUEST, "Invalid request body";

    NotAuthenticated = 1001 => UNAUTHORIZED, "Not signed in as a worker";
    InvalidCredentials = 1002 => UNAUTHORIZED, "Invalid identifier or password";
    TokenInvalid = 1004 => UNAUTHORIZED, "Session token is invalid";
    SessionExpired = 1005 => UNAUTHORIZED, "Session has expired";

    OrderNotFound = 4001 => NOT_FOUND, "Order not found";
    OrderEmpty = 4007 => BAD_REQUEST, "Order must contain at least one item";
    OrderInvalidStatus = 4008 => BAD_REQUEST, "Invalid order status";
    OrderInvalidItem = 4009 => BAD_REQUEST, "Invalid order item";

    TableOccupied = 7002 => BAD_REQUEST, "Table is occupied";
    TableNumberInvalid = 7004 => BAD_REQUEST, "Table number must be at least 1";

    WorkerNotFound = 8001 => NOT_FOUND, "Worker not found";
    WorkerIdentifierExists = 8002 => CONFLICT, "Worker identifier already exists";
    WorkerIdentifierInvalid = 8003 => BAD_REQUEST, "Worker identifier must be 1 to 8 characters";

    InternalError = 9001 => INTERNAL_SERVER_ERROR, "Internal server error";
    DatabaseError = 9002 => INTERNAL_SERVER_ERROR, "Database error";
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// 9xxx codes; these are logged when turned into a response
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Unknown numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}
