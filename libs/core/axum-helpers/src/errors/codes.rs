//! Type-safe error codes for API responses.
//!
//! Each code has a string form for clients (`"VALIDATION_ERROR"`), an integer
//! form for logs and dashboards (`1001`) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// One or more fields failed validation
    ValidationError,

    /// Request body could not be decoded
    MalformedRequest,

    /// Requested resource was not found
    NotFound,

    /// Authentication credentials are missing or invalid
    Unauthorized,

    /// Route exists but not for this HTTP method
    MethodNotAllowed,

    // Server errors (1100-1199)
    /// An unexpected internal server error occurred
    InternalError,

    /// Endpoint exists but has no implementation
    NotImplemented,

    // Database errors (2000-2999)
    /// Storage failed or did not answer in time
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::MalformedRequest => "MALFORMED_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code for logging and monitoring
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::MalformedRequest => 1002,
            Self::NotFound => 1004,
            Self::Unauthorized => 1005,
            Self::MethodNotAllowed => 1007,

            Self::InternalError => 1100,
            Self::NotImplemented => 1101,

            Self::DatabaseError => 2001,
        }
    }

    /// Default user-facing message; handlers may send a more specific one.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::MalformedRequest => "Request body could not be decoded",
            Self::NotFound => "the requested resource could not be found",
            Self::Unauthorized => "invalid or missing authentication token",
            Self::MethodNotAllowed => "the method is not supported for this resource",
            Self::InternalError | Self::DatabaseError => {
                "the server encountered a problem and could not process your request"
            }
            Self::NotImplemented => "this endpoint is not implemented yet",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
