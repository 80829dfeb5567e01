//! Utilities shared by every storage call

pub mod error;
pub mod retry;
pub mod timeout;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry, retry_with_backoff};
pub use timeout::{QUERY_TIMEOUT, with_timeout, with_timeout_of};
