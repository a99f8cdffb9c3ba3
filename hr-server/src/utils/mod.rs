//! Utility module
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`validation`] - input sanitizer
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind};
