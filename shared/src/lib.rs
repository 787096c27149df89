//! Shared types for the print-shop backend
//!
//! Entity models, input payloads and the unified error type used by the
//! server crate and by anything sitting on top of the service layer.
//!
//! The `db` feature adds the `sqlx` derives (`FromRow`, `Type`) so the
//! server can map rows directly; consumers that only need the data shapes
//! can skip it.

pub mod error;
pub mod models;
pub mod util;

pub use error::{AppError, AppResult, ErrorCode};
