use std::time::Duration;

/// Error returned by connection management and by [`with_timeout`](super::with_timeout).
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Error reported by SeaORM / the driver
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// The query did not finish before its deadline
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl DatabaseError {
    /// Name of the violated unique constraint, when the driver reported one.
    ///
    /// Postgres phrases it as
    /// `duplicate key value violates unique constraint "users_email_key"`.
    pub fn unique_constraint(&self) -> Option<String> {
        match self {
            #[cfg(feature = "postgres")]
            DatabaseError::Postgres(err) => unique_constraint_name(err),
            _ => None,
        }
    }

    /// Name of the violated foreign key constraint, when the driver reported one.
    ///
    /// Postgres phrases it as
    /// `insert or update on table "cart_items" violates foreign key constraint "fk_cart_items_product_id"`.
    pub fn foreign_key_constraint(&self) -> Option<String> {
        match self {
            #[cfg(feature = "postgres")]
            DatabaseError::Postgres(err) => foreign_key_name(err),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DatabaseError::Timeout(_))
    }
}

#[cfg(feature = "postgres")]
fn unique_constraint_name(err: &sea_orm::DbErr) -> Option<String> {
    match err.sql_err()? {
        sea_orm::SqlErr::UniqueConstraintViolation(message) => {
            constraint_from_message(&message).map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(feature = "postgres")]
fn foreign_key_name(err: &sea_orm::DbErr) -> Option<String> {
    match err.sql_err()? {
        sea_orm::SqlErr::ForeignKeyConstraintViolation(message) => {
            foreign_key_from_message(&message).map(str::to_string)
        }
        _ => None,
    }
}

fn constraint_from_message(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("duplicate key value violates unique constraint \"")?;
    rest.split('"').next()
}

fn foreign_key_from_message(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("violates foreign key constraint \"")?;
    rest.split('"').next()
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error_message() {
        let err = DatabaseError::Timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "query timed out after 3s");
        assert!(err.is_timeout());
        assert!(err.unique_constraint().is_none());
    }

    #[test]
    fn test_constraint_from_driver_message() {
        assert_eq!(
            constraint_from_message(
                "duplicate key value violates unique constraint \"users_phone_key\""
            ),
            Some("users_phone_key")
        );
        assert_eq!(constraint_from_message("relation \"users\" does not exist"), None);
    }

    #[test]
    fn test_foreign_key_from_driver_message() {
        assert_eq!(
            foreign_key_from_message(
                "insert or update on table \"cart_items\" violates foreign key constraint \"fk_cart_items_product_id\""
            ),
            Some("fk_cart_items_product_id")
        );
        assert_eq!(
            foreign_key_from_message("duplicate key value violates unique constraint \"users_email_key\""),
            None
        );
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_non_driver_error_has_no_constraint() {
        let err = DatabaseError::from(sea_orm::DbErr::RecordNotFound("users".into()));
        assert!(err.unique_constraint().is_none());
        assert!(err.foreign_key_constraint().is_none());
        assert!(!err.is_timeout());
    }
}
