//! Order domain
//!
//! - [`items`] - item merge with duplicate skipping, removal by index, totals
//! - [`validation`] - collected field-level validation of candidates
//! - [`search`] - free-text search and ordering
//! - [`service`] - lifecycle operations over the order repository

pub mod error;
pub mod items;
pub mod money;
pub mod search;
pub mod service;
pub mod validation;

pub use error::OrderError;
pub use service::{OrderResult, OrderService};
pub use validation::{FieldError, ValidationErrors, ValidationKind};
