use std::future::Future;
use std::time::Duration;

use super::error::DatabaseError;

/// Deadline applied to every storage call made while serving a request.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs a storage future under [`QUERY_TIMEOUT`].
///
/// The future is dropped when the deadline passes, which cancels the query
/// and returns its connection to the pool.
///
/// # Example
/// ```ignore
/// use database::with_timeout;
///
/// let count = with_timeout(query.count(&db)).await?;
/// ```
pub async fn with_timeout<F, T, E>(operation: F) -> Result<T, DatabaseError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<DatabaseError>,
{
    with_timeout_of(QUERY_TIMEOUT, operation).await
}

/// Same as [`with_timeout`] with an explicit deadline.
pub async fn with_timeout_of<F, T, E>(deadline: Duration, operation: F) -> Result<T, DatabaseError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<DatabaseError>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::warn!(timeout_ms = deadline.as_millis() as u64, "Database query timed out");
            Err(DatabaseError::Timeout(deadline))
        }
    }
}
