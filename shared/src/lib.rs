//! Shared types for the HR workspace
//!
//! Domain models, request payloads and the unified error system used by
//! hr-server and its API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind};
pub use serde::{Deserialize, Serialize};
