//! HTTP response writing and middleware.
//!
//! - JSON response writer ([`JsonResponse`])
//! - CORS configuration
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(origin));
//! ```

pub mod cors;
pub mod envelope;
pub mod security;

pub use cors::{create_cors_layer, create_permissive_cors_layer, parse_origins};
pub use envelope::{JsonResponse, MessageEnvelope, encode_json};
pub use security::security_headers;
