use axum::response::{IntoResponse, Response};

use super::AppError;

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    AppError::not_found().into_response()
}

/// Fallback for routes matched with an unsupported method.
pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_response()
}
