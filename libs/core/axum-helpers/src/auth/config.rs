//! JWT settings.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};

/// Default issuer and audience.
pub const DEFAULT_ISSUER: &str = "storefront.api";

/// Default token lifetime (24 hours).
pub const DEFAULT_TTL_SECS: i64 = 86_400;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters
/// - `JWT_ISSUER` (default: `storefront.api`)
/// - `JWT_AUDIENCE` (default: `storefront.api`)
/// - `JWT_TTL_SECS` (default: 86400)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HMAC signing secret (minimum 32 characters)
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_secs: i64,
}

impl JwtConfig {
    /// Create a config with default issuer, audience and lifetime.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_ISSUER.to_string(),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    pub fn with_ttl(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_secs: i64 = env_parse("JWT_TTL_SECS", "86400")?;
        if ttl_secs <= 0 {
            return Err(ConfigError::ParseError {
                key: "JWT_TTL_SECS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            secret,
            issuer: env_or_default("JWT_ISSUER", DEFAULT_ISSUER),
            audience: env_or_default("JWT_AUDIENCE", DEFAULT_ISSUER),
            ttl_secs,
        })
    }
}
