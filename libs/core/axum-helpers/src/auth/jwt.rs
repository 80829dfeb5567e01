use super::config::JwtConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (user id)
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// A signed token and the moment it stops being accepted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssuedToken {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

/// Stateless HS256 token issuing and verification.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtAuth {
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let jwt = JwtAuth::new(&JwtConfig::from_env()?);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(issuer = %config.issuer, ttl_secs = config.ttl_secs, "JWT auth initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::seconds(config.ttl_secs),
        }
    }

    /// Signs a token for `subject` valid for the configured lifetime.
    pub fn issue(&self, subject: &str) -> eyre::Result<IssuedToken> {
        let now = Utc::now();
        let expiry = now + self.ttl;

        let claims = JwtClaims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        Ok(IssuedToken { token, expiry })
    }

    /// Checks signature, expiry, issuer and audience, then returns the claims.
    pub fn verify(&self, token: &str) -> eyre::Result<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        let token_data = decode::<JwtClaims>(token, &self.decoding, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET))
    }

    #[test]
    fn test_issued_token_verifies() {
        let jwt = auth();
        let issued = jwt.issue("42").unwrap();

        let claims = jwt.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.iss, "storefront.api");
        assert_eq!(claims.exp, issued.expiry.timestamp());
    }

    #[test]
    fn test_expiry_follows_ttl() {
        let jwt = JwtAuth::new(&JwtConfig::new(SECRET).with_ttl(3600));
        let before = Utc::now();
        let issued = jwt.issue("1").unwrap();

        let remaining = issued.expiry - before;
        assert!(remaining <= Duration::seconds(3601));
        assert!(remaining >= Duration::seconds(3599));
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let jwt = auth();
        let a = jwt.verify(&jwt.issue("1").unwrap().token).unwrap();
        let b = jwt.verify(&jwt.issue("1").unwrap().token).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let jwt = auth();
        let mut token = jwt.issue("1").unwrap().token;
        token.push('x');
        assert!(jwt.verify(&token).is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-32-chars-long!!"));
        let token = other.issue("1").unwrap().token;
        assert!(auth().verify(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let mut config = JwtConfig::new(SECRET);
        config.audience = "admin.api".to_string();
        let token = JwtAuth::new(&config).issue("1").unwrap().token;

        assert!(auth().verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s validation leeway
        let jwt = JwtAuth::new(&JwtConfig::new(SECRET).with_ttl(-120));
        let token = jwt.issue("1").unwrap().token;
        assert!(jwt.verify(&token).is_err());
    }
}
