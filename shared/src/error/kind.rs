//! Failure taxonomy
//!
//! Every [`ErrorCode`] belongs to exactly one [`ErrorKind`]. The kind is what
//! callers branch on; the code is what clients display or log.

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Failure classification shared by the engine, the diagnostics primitives and the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed, out-of-range or malicious input, bad id, wrong state for the operation
    InvalidInput,
    /// No entity for the given id
    NotFound,
    /// Email/CPF collision, including integrity violations raised by the store
    DuplicateResource,
    /// Deadline exceeded or processing interrupted
    ServiceTimeout,
    /// Admission permit unavailable
    Overload,
    /// Anything unclassified; never carries internal detail to the client
    Internal,
}

impl ErrorKind {
    /// Get the string name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::DuplicateResource => "duplicate_resource",
            Self::ServiceTimeout => "service_timeout",
            Self::Overload => "overload",
            Self::Internal => "internal",
        }
    }
}

impl ErrorCode {
    /// Get the failure kind for this error code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound | Self::EmployeeNotFound | Self::DepartmentNotFound => {
                ErrorKind::NotFound
            }

            Self::AlreadyExists
            | Self::EmployeeEmailExists
            | Self::EmployeeCpfExists
            | Self::EmployeeIntegrityViolation => ErrorKind::DuplicateResource,

            Self::TimeoutError => ErrorKind::ServiceTimeout,

            Self::SystemBusy => ErrorKind::Overload,

            Self::InternalError | Self::DatabaseError | Self::ConfigError => ErrorKind::Internal,

            // Success never surfaces as a failure; everything else is caller input
            Self::Success
            | Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidId
            | Self::EmployeeNotActive
            | Self::EmployeeAlreadyInactive
            | Self::EmployeeIdMismatch => ErrorKind::InvalidInput,
        }
    }
}
