//! Request authentication.
//!
//! [`authenticate`] runs in front of every API route and stores an
//! [`Identity`] in the request extensions. Handlers that need a signed-in
//! user take a [`CurrentUser`] argument.
//!
//! ```ignore
//! let api = Router::new()
//!     .nest("/cart", cart_routes)
//!     .layer(axum::middleware::from_fn_with_state(
//!         users.clone(),
//!         authenticate::<PgUserRepository>,
//!     ));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, bearer_token};

use crate::error::UserError;
use crate::models::{Identity, User};
use crate::repository::UserRepository;
use crate::service::UserService;

fn add_vary(response: &mut Response) {
    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("Authorization"));
}

/// Resolves the bearer token, if any, into an [`Identity`].
///
/// No `Authorization` header means [`Identity::Anonymous`]. A header that is
/// present but unusable is rejected with 401. Every response carries
/// `Vary: Authorization`.
pub async fn authenticate<R: UserRepository + 'static>(
    State(service): State<UserService<R>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = match resolve(&service, request.headers()).await {
        Ok(identity) => identity,
        Err(err) => {
            let mut response = err.into_response();
            add_vary(&mut response);
            return response;
        }
    };

    request.extensions_mut().insert(identity);

    let mut response = next.run(request).await;
    add_vary(&mut response);
    response
}

async fn resolve<R: UserRepository>(
    service: &UserService<R>,
    headers: &HeaderMap,
) -> Result<Identity, UserError> {
    let token = match bearer_token(headers) {
        Ok(None) => return Ok(Identity::Anonymous),
        Ok(Some(token)) => token,
        Err(_) => return Err(UserError::InvalidToken),
    };

    let user = service.user_for_token(token).await?;
    Ok(Identity::Authenticated(user))
}

/// The signed-in user; anonymous requests are rejected with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Authenticated(user)) => Ok(CurrentUser(user.clone())),
            _ => Err(UserError::AuthenticationRequired.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::repository::InMemoryUserRepository;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use axum_helpers::{JwtAuth, JwtConfig};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    async fn whoami(CurrentUser(user): CurrentUser) -> String {
        user.id.to_string()
    }

    async fn identity(request: Request) -> &'static str {
        match request.extensions().get::<Identity>() {
            Some(Identity::Anonymous) => "anonymous",
            Some(Identity::Authenticated(_)) => "authenticated",
            None => "missing",
        }
    }

    async fn app() -> (Router, JwtAuth) {
        let repo = InMemoryUserRepository::new();
        repo.insert(NewUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "5550100100".into(),
            password_hash: "$argon2id$stub".into(),
        })
        .await
        .unwrap();

        let jwt = JwtAuth::new(&JwtConfig::new(SECRET));
        let service = UserService::new(repo, jwt.clone());

        let router = Router::new()
            .route("/me", get(whoami))
            .route("/identity", get(identity))
            .layer(middleware::from_fn_with_state(
                service,
                authenticate::<InMemoryUserRepository>,
            ));
        (router, jwt)
    }

    fn request(uri: &str, authorization: Option<&str>) -> Request {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn message(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_no_header_is_anonymous() {
        let (app, _) = app().await;
        let response = app.oneshot(request("/identity", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::VARY], "Authorization");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"anonymous");
    }

    #[tokio::test]
    async fn test_valid_token_is_authenticated() {
        let (app, jwt) = app().await;
        let token = jwt.issue("1").unwrap().token;

        let response = app
            .oneshot(request("/me", Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"1");
    }

    #[tokio::test]
    async fn test_bad_tokens_are_rejected() {
        let (app, jwt) = app().await;
        let unknown_user = format!("Bearer {}", jwt.issue("99").unwrap().token);
        let other_key = JwtAuth::new(&JwtConfig::new("another-secret-that-is-32-chars-long"));
        let wrong_signature = format!("Bearer {}", other_key.issue("1").unwrap().token);

        for value in [
            "Basic dXNlcjpwYXNz",
            "Bearer not.a.token",
            unknown_user.as_str(),
            wrong_signature.as_str(),
        ] {
            let response = app
                .clone()
                .oneshot(request("/identity", Some(value)))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{value}");
            assert_eq!(response.headers()[header::VARY], "Authorization");
            assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
            assert_eq!(message(response).await, "invalid or missing authentication token");
        }
    }

    #[tokio::test]
    async fn test_current_user_rejects_anonymous() {
        let (app, _) = app().await;
        let response = app.oneshot(request("/me", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            message(response).await,
            "you must be authenticated to access this resource"
        );
    }
}
