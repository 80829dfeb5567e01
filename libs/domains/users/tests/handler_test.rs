//! Handler tests for the Users domain
//!
//! The users router runs behind the authenticate middleware, the way the
//! API mounts it, against the in-memory repository.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::{Router, middleware};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    let jwt = JwtAuth::new(&JwtConfig::new(SECRET));
    let service = UserService::new(InMemoryUserRepository::new(), jwt);

    handlers::router(service.clone()).layer(middleware::from_fn_with_state(
        service,
        authenticate::<InMemoryUserRepository>,
    ))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn signup_body(email: &str, phone: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "phone": phone,
        "password": "correct horse battery"
    })
}

#[tokio::test]
async fn test_signup_login_me() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/signup",
            signup_body("ada@example.com", "5550100100"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["version"], 1);
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());

    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({"email": "ada@example.com", "password": "correct horse battery"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let token = body["authentication_token"]["token"].as_str().unwrap();
    assert!(body["authentication_token"]["expiry"].is_string());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::VARY], "Authorization");

    let body = json_body(response.into_body()).await;
    assert_eq!(body["user"]["first_name"], "Ada");
}

#[tokio::test]
async fn test_signup_empty_body_lists_every_field() {
    let response = app().oneshot(post_json("/signup", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response.into_body()).await;
    for field in ["first_name", "last_name", "email", "phone", "password"] {
        assert_eq!(body["details"][field], "must be provided", "{field}");
    }
}

#[tokio::test]
async fn test_signup_rule_failures() {
    let response = app()
        .oneshot(post_json(
            "/signup",
            json!({
                "first_name": "A".repeat(31),
                "last_name": "Lovelace",
                "email": "not-an-email",
                "phone": "555-0100",
                "password": "short"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response.into_body()).await;
    assert_eq!(
        body["details"],
        json!({
            "first_name": "must not be more than 30 bytes",
            "email": "must be a valid email address",
            "phone": "must contain exactly 10 digits",
            "password": "must be at least 8 bytes long"
        })
    );
}

#[tokio::test]
async fn test_signup_duplicate_email_and_phone() {
    let app = app();
    app.clone()
        .oneshot(post_json(
            "/signup",
            signup_body("ada@example.com", "5550100100"),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/signup",
            signup_body("ada@example.com", "5550100199"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response.into_body()).await;
    assert_eq!(
        body["details"]["email"],
        "a user with this email address already exists"
    );

    let response = app
        .oneshot(post_json(
            "/signup",
            signup_body("bob@example.com", "5550100100"),
        ))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(
        body["details"]["phone"],
        "a user with this phone number already exists"
    );
}

#[tokio::test]
async fn test_signup_unknown_key_is_bad_request() {
    let mut body = signup_body("ada@example.com", "5550100100");
    body["role"] = json!("admin");

    let response = app().oneshot(post_json("/signup", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "body contains unknown key \"role\"");
}

#[tokio::test]
async fn test_login_failures() {
    let app = app();
    app.clone()
        .oneshot(post_json(
            "/signup",
            signup_body("ada@example.com", "5550100100"),
        ))
        .await
        .unwrap();

    for credentials in [
        json!({"email": "ada@example.com", "password": "wrong horse battery"}),
        json!({"email": "bob@example.com", "password": "correct horse battery"}),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/login", credentials))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "invalid authentication credentials");
    }

    let response = app
        .oneshot(post_json("/login", json!({"email": "ada@example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["details"]["password"], "must be provided");
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let response = app()
        .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response.into_body()).await;
    assert_eq!(
        body["message"],
        "you must be authenticated to access this resource"
    );
}
