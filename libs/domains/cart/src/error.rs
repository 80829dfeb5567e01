use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldErrors};
use database::DatabaseError;
use domain_products::ProductError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product {0} is not in the cart")]
    ItemNotFound(i64),

    #[error("Invalid cart item: {0:?}")]
    Validation(FieldErrors),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CartError {
    pub fn unknown_product() -> Self {
        let mut errors = FieldErrors::new();
        errors.insert("product_id".into(), "must refer to an existing product".into());
        CartError::Validation(errors)
    }

    /// A product deleted between the existence check and the write trips
    /// the product foreign key; that is reported like any unknown product.
    pub fn from_storage(err: DatabaseError) -> Self {
        match err.foreign_key_constraint().as_deref() {
            Some("fk_cart_items_product_id") => Self::unknown_product(),
            _ => CartError::Database(err),
        }
    }
}

pub type CartResult<T> = Result<T, CartError>;

/// Product lookups made while editing a cart.
impl From<ProductError> for CartError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Database(e) => CartError::Database(e),
            other => CartError::Internal(other.to_string()),
        }
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ItemNotFound(_) => AppError::not_found(),
            CartError::Validation(errors) => AppError::FailedValidation(errors),
            CartError::NotImplemented(what) => {
                AppError::NotImplemented(format!("{} is not implemented yet", what))
            }
            CartError::Database(e) => AppError::Database(e),
            CartError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
