use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldErrors};
use database::DatabaseError;
use thiserror::Error;

pub const INVALID_CREDENTIALS: &str = "invalid authentication credentials";
pub const INVALID_TOKEN: &str = "invalid or missing authentication token";
pub const AUTHENTICATION_REQUIRED: &str = "you must be authenticated to access this resource";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Invalid user: {0:?}")]
    Validation(FieldErrors),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    fn field(key: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(key.to_string(), message.to_string());
        UserError::Validation(errors)
    }

    pub fn duplicate_email() -> Self {
        Self::field("email", "a user with this email address already exists")
    }

    pub fn duplicate_phone() -> Self {
        Self::field("phone", "a user with this phone number already exists")
    }

    /// Storage errors with the email/phone unique constraints named become
    /// field errors; everything else stays a database error.
    pub fn from_storage(err: DatabaseError) -> Self {
        match err.unique_constraint().as_deref() {
            Some("users_email_key") => Self::duplicate_email(),
            Some("users_phone_key") => Self::duplicate_phone(),
            _ => UserError::Database(err),
        }
    }
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::not_found(),
            UserError::Validation(errors) => AppError::FailedValidation(errors),
            UserError::InvalidCredentials => AppError::Unauthorized(INVALID_CREDENTIALS.into()),
            UserError::InvalidToken => AppError::Unauthorized(INVALID_TOKEN.into()),
            UserError::AuthenticationRequired => {
                AppError::Unauthorized(AUTHENTICATION_REQUIRED.into())
            }
            UserError::Database(e) => AppError::Database(e),
            UserError::PasswordHash(msg) | UserError::Token(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_non_constraint_storage_error_stays_database() {
        let err = UserError::from_storage(DatabaseError::Timeout(Duration::from_secs(3)));
        assert!(matches!(err, UserError::Database(_)));
    }

    #[test]
    fn test_duplicate_email_is_field_error() {
        match UserError::duplicate_email() {
            UserError::Validation(errors) => assert_eq!(
                errors["email"],
                "a user with this email address already exists"
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_map_to_401() {
        let app: AppError = UserError::InvalidCredentials.into();
        assert_eq!(app.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
