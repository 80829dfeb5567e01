//! # Axum Helpers
//!
//! Shared HTTP plumbing for the storefront services.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT issuing/verification and bearer header parsing
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//! - **[`http`]**: JSON response writer, CORS, security headers
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Bounded JSON body, query string and id path extractors
//! - **[`validation`]**: Field validator used by request and entity rules
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new()).await?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use auth::{IssuedToken, JwtAuth, JwtClaims, JwtConfig, bearer_token};

pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{
    JsonResponse, MessageEnvelope, create_cors_layer, create_permissive_cors_layer,
    security_headers,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{BodyError, IdPath, QueryParams, ValidatedJson};

pub use validation::{FieldErrors, Validate, Validator};
