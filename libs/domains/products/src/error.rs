use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldErrors};
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Invalid product: {0:?}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::not_found(),
            ProductError::Validation(errors) => AppError::FailedValidation(errors),
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
