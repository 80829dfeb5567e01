//! Token authentication building blocks.
//!
//! - [`JwtConfig`]: secret, issuer, audience and lifetime from the environment
//! - [`JwtAuth`]: stateless HS256 issuing and verification
//! - [`bearer_token`]: `Authorization: Bearer` header parsing
//!
//! Resolving a token to a user is left to the users domain.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig};
//! use core_config::FromEnv;
//!
//! let jwt = JwtAuth::new(&JwtConfig::from_env()?);
//! let issued = jwt.issue(&user.id.to_string())?;
//! let claims = jwt.verify(&issued.token)?;
//! ```

pub mod bearer;
pub mod config;
pub mod jwt;

pub use bearer::{MalformedAuthorization, bearer_token};
pub use config::JwtConfig;
pub use jwt::{IssuedToken, JwtAuth, JwtClaims};
