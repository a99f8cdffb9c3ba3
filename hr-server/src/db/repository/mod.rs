//! Repository Module
//!
//! Free async functions over a SQLite connection. Callers pass either a pooled
//! connection (reads) or the connection of a [`WriteTx`](crate::db::WriteTx).

pub mod department;
pub mod employee;
pub mod movement;

use rust_decimal::Decimal;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => {
                tracing::warn!(detail = %msg, "Unique constraint violation");
                AppError::new(ErrorCode::AlreadyExists)
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository failure");
                AppError::database(msg)
            }
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// Money columns: integer cents, so the scale is fixed at 2
// =============================================================================

pub(crate) fn to_cents(amount: Decimal) -> RepoResult<i64> {
    let cents = (amount.round_dp(2) * Decimal::ONE_HUNDRED).trunc();
    i64::try_from(cents)
        .map_err(|_| RepoError::Validation(format!("Amount out of range: {amount}")))
}

pub(crate) fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
