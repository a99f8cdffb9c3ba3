//! Error types and API response structures

use super::codes::ErrorCode;
use super::kind::ErrorKind;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Details key holding field-level validation failures
pub const FIELDS_DETAIL: &str = "fields";

/// Application error with structured error code and details
///
/// This is the primary error type of the workspace, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level failures, context)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the failure kind for this error
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Field-level failures attached by the validation pipeline, keyed by field name
    pub fn field_errors(&self) -> Option<&Map<String, Value>> {
        self.details
            .as_ref()
            .and_then(|d| d.get(FIELDS_DETAIL))
            .and_then(Value::as_object)
    }

    /// Message safe to show to a client
    ///
    /// Internal failures are reduced to the generic message of their code.
    pub fn public_message(&self) -> &str {
        match self.kind() {
            ErrorKind::Internal => self.code.message(),
            _ => &self.message,
        }
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a validation error for one field
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let message = msg.into();
        let mut fields = Map::new();
        fields.insert(field.into(), Value::String(message.clone()));
        Self::with_message(ErrorCode::ValidationFailed, message)
            .with_detail(FIELDS_DETAIL, Value::Object(fields))
    }

    /// Create an invalid id error
    pub fn invalid_id() -> Self {
        Self::new(ErrorCode::InvalidId)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{} already exists", r))
            .with_detail("resource", r)
    }

    /// Create a service timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TimeoutError, msg)
    }

    /// Create an overload error
    pub fn overloaded() -> Self {
        Self::new(ErrorCode::SystemBusy)
    }
}

/// Unified API response structure
///
/// Provides a consistent response format for failures:
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    ///
    /// Internal failures keep neither their message nor their details.
    pub fn error(err: &AppError) -> Self {
        let details = match err.kind() {
            ErrorKind::Internal => None,
            _ => err.details.clone(),
        };
        Self {
            code: Some(err.code.code()),
            message: err.public_message().to_string(),
            data: None,
            details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // Log system errors with full detail; the body only has the generic message
        if self.kind() == ErrorKind::Internal {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::EmployeeNotFound);
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
        assert_eq!(err.message, "Employee not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Email is invalid.");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Email is invalid.");
    }

    #[test]
    fn test_invalid_field_carries_field_map() {
        let err = AppError::invalid_field("cpf", "CPF must contain exactly 11 digits.");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("cpf").unwrap(), "CPF must contain exactly 11 digits.");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::EmployeeNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::overloaded().http_status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            AppError::timeout("late").http_status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::not_found("Employee");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Employee not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));

        let err = AppError::invalid_id();
        assert_eq!(err.code, ErrorCode::InvalidId);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = AppError::database("UNIQUE constraint failed: employee.email");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_internal_detail_never_reaches_response() {
        let err = AppError::database("near \"SELEC\": syntax error in employee.rs:42")
            .with_detail("sql", "SELEC * FROM employee");
        let response = ApiResponse::<()>::error(&err);

        assert_eq!(response.code, Some(9002));
        assert_eq!(response.message, "Database error");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_api_response_error_keeps_field_details() {
        let err = AppError::invalid_field("email", "Email is invalid.");
        let response = ApiResponse::<()>::error(&err);

        assert_eq!(response.code, Some(2));
        assert_eq!(response.message, "Email is invalid.");
        assert!(response.details.unwrap().contains_key(FIELDS_DETAIL));
    }

    #[test]
    fn test_api_response_serialize() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"code\":0"));
        assert!(json.contains("\"data\":\"hello\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::EmployeeNotFound, "Employee not found");
        assert_eq!(format!("{}", err), "Employee not found");
    }
}
