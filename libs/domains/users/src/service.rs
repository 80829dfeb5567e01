use axum_helpers::validation::{Validate, Validator};
use axum_helpers::{IssuedToken, JwtAuth};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{LoginInput, NewUser, SignupInput, User};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;

/// Signup, login and token resolution.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: Arc<JwtAuth>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: Arc::clone(&self.jwt),
        }
    }
}

fn check<T: Validate>(input: &T) -> UserResult<()> {
    let mut v = Validator::new();
    input.validate(&mut v);
    if v.valid() {
        Ok(())
    } else {
        Err(UserError::Validation(v.into_errors()))
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt: Arc::new(jwt),
        }
    }

    /// Validate, hash the password and store the user.
    pub async fn signup(&self, input: SignupInput) -> UserResult<User> {
        check(&input)?;

        let (Some(first_name), Some(last_name), Some(email), Some(phone), Some(password)) = (
            input.first_name,
            input.last_name,
            input.email,
            input.phone,
            input.password,
        ) else {
            return Err(UserError::Internal("validated signup missing a field".into()));
        };

        let new_user = NewUser {
            first_name,
            last_name,
            email,
            phone,
            password_hash: hash_password(&password)?,
        };

        self.repository.insert(new_user).await
    }

    /// Checks email and password, then issues a bearer token for the user.
    ///
    /// Unknown email and wrong password fail the same way.
    pub async fn login(&self, input: LoginInput) -> UserResult<IssuedToken> {
        check(&input)?;

        let email = input.email.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        let Some(user) = self.repository.get_by_email(&email).await? else {
            tracing::info!("Login for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(&password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Login with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let token = self
            .jwt
            .issue(&user.id.to_string())
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(user_id = user.id, expiry = %token.expiry, "Issued authentication token");
        Ok(token)
    }

    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// The user a bearer token was issued to.
    ///
    /// Any verification failure, a non-numeric subject and a subject whose
    /// user no longer exists are all [`UserError::InvalidToken`].
    pub async fn user_for_token(&self, token: &str) -> UserResult<User> {
        let claims = self.jwt.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            UserError::InvalidToken
        })?;

        let id: i64 = claims.sub.parse().map_err(|_| UserError::InvalidToken)?;

        self.repository
            .get(id)
            .await?
            .ok_or(UserError::InvalidToken)
    }
}
