//! PostgreSQL connectivity for the storefront services.
//!
//! - [`postgres`]: pooled connections from [`postgres::PostgresConfig`], startup
//!   retry, migrations and `SELECT 1` health checks.
//! - [`common`]: the shared [`DatabaseError`], connection retry with backoff and
//!   [`with_timeout`], the per-query deadline every repository call goes through.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::{postgres, with_timeout};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "storefront_api").await?;
//!
//! let product = with_timeout(product::Entity::find_by_id(1).one(&db)).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, QUERY_TIMEOUT, with_timeout, with_timeout_of};
