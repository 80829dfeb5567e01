//! Users Domain
//!
//! Signup, login, bearer token issuing and the request authentication
//! middleware shared by every route that needs a caller identity.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐
//! │  Handlers   │   │ authenticate │  ← Identity in request extensions
//! └──────┬──────┘   └──────┬───────┘
//!        │                 │
//! ┌──────▼─────────────────▼──────┐
//! │           Service             │  ← rules, Argon2id, JWT
//! └──────────────┬────────────────┘
//!                │
//! ┌──────────────▼────────────────┐
//! │          Repository           │  ← in-memory or PostgreSQL (sea-orm)
//! └───────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-thirty-two-chars"));
//! let service = UserService::new(InMemoryUserRepository::new(), jwt);
//! let router = handlers::router(service);
//! ```

pub mod auth;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use auth::{CurrentUser, authenticate};
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{Identity, LoginInput, NewUser, SignupInput, User};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
