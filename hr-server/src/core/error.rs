use thiserror::Error;

use crate::utils::AppError;

/// Failures that stop the server process (startup, bind, serve)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Startup failed: {0}")]
    Startup(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type for server lifecycle functions
pub type Result<T> = std::result::Result<T, ServerError>;
