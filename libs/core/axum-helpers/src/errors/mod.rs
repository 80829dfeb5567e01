pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use database::DatabaseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::http::JsonResponse;
use crate::validation::FieldErrors;

/// Standard error response structure.
///
/// Returned for every error the API produces:
/// - `code`: integer error code for logging/monitoring (e.g. 1001)
/// - `error`: machine-readable identifier (e.g. "VALIDATION_ERROR")
/// - `message`: human-readable message
/// - `details`: field name to message, only for validation failures
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": {
///     "product_name": "must be provided"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Field name to message, present for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own errors into this type; handlers return
/// `Result<_, AppError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// One message per offending field (422)
    #[error("Validation failed: {0:?}")]
    FailedValidation(FieldErrors),

    /// Malformed request; the message is sent verbatim (400)
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Sent with `WWW-Authenticate: Bearer` (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Not Implemented: {0}")]
    NotImplemented(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// 404 with the generic "could not be found" message.
    pub fn not_found() -> Self {
        Self::NotFound(ErrorCode::NotFound.default_message().to_string())
    }

    /// 422 for a single field.
    pub fn field(key: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(key.into(), message.into());
        Self::FailedValidation(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Database(_) | Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::FailedValidation(errors) => {
                let code = ErrorCode::ValidationError;
                tracing::info!(
                    error_code = code.code(),
                    fields = ?errors.keys().collect::<Vec<_>>(),
                    "Validation failed"
                );
                ErrorResponse {
                    details: serde_json::to_value(&errors).ok(),
                    ..ErrorResponse::new(code, code.default_message())
                }
            }
            AppError::BadRequest(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::MalformedRequest.code(),
                    "Bad request: {}",
                    msg
                );
                ErrorResponse::new(ErrorCode::MalformedRequest, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                ErrorResponse::new(ErrorCode::NotFound, msg)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!(
                    error_code = ErrorCode::Unauthorized.code(),
                    "Unauthorized: {}",
                    msg
                );
                let body = ErrorResponse::new(ErrorCode::Unauthorized, msg);
                return JsonResponse::new(status, body)
                    .with_header(header::WWW_AUTHENTICATE, "Bearer")
                    .into_response();
            }
            AppError::MethodNotAllowed => {
                let code = ErrorCode::MethodNotAllowed;
                tracing::info!(error_code = code.code(), "Method not allowed");
                ErrorResponse::new(code, code.default_message())
            }
            AppError::NotImplemented(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::NotImplemented.code(),
                    "Not implemented: {}",
                    msg
                );
                ErrorResponse::new(ErrorCode::NotImplemented, msg)
            }
            AppError::Database(e) => {
                let code = ErrorCode::DatabaseError;
                tracing::error!(
                    error_code = code.code(),
                    timeout = e.is_timeout(),
                    "Database error: {}",
                    e
                );
                ErrorResponse::new(code, code.default_message())
            }
            AppError::InternalServerError(msg) => {
                let code = ErrorCode::InternalError;
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                ErrorResponse::new(code, code.default_message())
            }
        };

        JsonResponse::new(status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    struct LevelCapture(Arc<Mutex<Vec<Level>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn levels_logged_by(err: AppError) -> Vec<Level> {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(LevelCapture(levels.clone()));
        tracing::subscriber::with_default(subscriber, || {
            let _ = err.into_response();
        });
        let logged = levels.lock().unwrap().clone();
        logged
    }

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_failed_validation_is_422_with_details() {
        let mut errors = FieldErrors::new();
        errors.insert("product_name".into(), "must be provided".into());
        errors.insert("product_price".into(), "must be provided".into());

        let response = AppError::FailedValidation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_of(response).await;
        assert_eq!(body.error, "VALIDATION_ERROR");
        let details = body.details.unwrap();
        assert_eq!(details["product_name"], "must be provided");
        assert_eq!(details.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_bad_request_keeps_message_verbatim() {
        let response = AppError::BadRequest("body must not be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body.message, "body must not be empty");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_log_level_follows_error_class() {
        assert_eq!(
            levels_logged_by(AppError::BadRequest("body contains badly-formed JSON".into())),
            vec![Level::WARN]
        );
        assert_eq!(levels_logged_by(AppError::not_found()), vec![Level::INFO]);
        assert_eq!(
            levels_logged_by(AppError::InternalServerError("boom".into())),
            vec![Level::ERROR]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_sets_www_authenticate() {
        let response =
            AppError::Unauthorized("invalid or missing authentication token".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_database_timeout_hides_details() {
        let response =
            AppError::from(DatabaseError::Timeout(Duration::from_secs(3))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(
            body.message,
            "the server encountered a problem and could not process your request"
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let response = AppError::InternalServerError("hash failed: bad salt".into()).into_response();
        let body = body_of(response).await;
        assert!(!body.message.contains("salt"));
    }

    #[tokio::test]
    async fn test_not_implemented_is_501() {
        let response = AppError::NotImplemented("checkout".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_field_helper_builds_single_entry() {
        match AppError::field("email", "a user with this email address already exists") {
            AppError::FailedValidation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(
                    errors["email"],
                    "a user with this email address already exists"
                );
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
