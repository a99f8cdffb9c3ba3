//! Unified error handling
//!
//! Re-exports the shared error system and converts axum extractor
//! rejections into it, so malformed requests get the same body shape as
//! every other failure.
//!
//! ```ignore
//! // Return an error
//! Err(AppError::new(ErrorCode::EmployeeNotFound))
//!
//! // Return data
//! Ok(Json(employee))
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind, FIELDS_DETAIL};

/// Malformed or mistyped JSON body
pub fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected JSON body");
    AppError::invalid_request("Malformed request body.")
        .with_detail("reason", rejection.body_text())
}

/// Query string that does not fit the expected parameters
pub fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::invalid_request("Invalid query parameters.")
        .with_detail("reason", rejection.body_text())
}

/// Path segment that is not a valid identifier
pub fn path_rejection(rejection: PathRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected path parameter");
    AppError::invalid_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexported_codes_map_to_kinds() {
        assert_eq!(ErrorCode::InvalidRequest.kind(), ErrorKind::InvalidInput);
        assert_eq!(AppError::invalid_request("x").http_status().as_u16(), 400);
    }
}
