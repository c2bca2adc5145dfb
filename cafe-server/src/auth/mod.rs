//! Staff authentication
//!
//! - [`password`] - argon2 salted hashing
//! - [`SessionStore`] - server-side sessions keyed by opaque bearer tokens
//! - [`WorkerSession`] - explicit session value, extracted from requests
//! - [`AuthService`] - login / logout
//! - [`ClientIp`] - best-effort client address for login notifications

pub mod client_ip;
pub mod error;
pub mod extractor;
pub mod password;
pub mod service;
pub mod session;

pub use client_ip::ClientIp;
pub use error::AuthError;
pub use extractor::BearerToken;
pub use service::AuthService;
pub use session::{SessionStore, WorkerSession};
