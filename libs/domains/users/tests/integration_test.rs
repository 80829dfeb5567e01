//! Integration tests for the Users domain
//!
//! Real PostgreSQL via testcontainers; run with
//! `cargo test -p domain_users -- --ignored`.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::assert_some};

fn new_user(email: &str, phone: &str) -> NewUser {
    NewUser {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.into(),
        phone: phone.into(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_lookup() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("insert_and_lookup");
    let email = builder.email("ada");

    let created = repo.insert(new_user(&email, &builder.phone(1))).await.unwrap();
    assert_eq!(created.version, 1);
    assert_eq!(created.email.as_deref(), Some(email.as_str()));

    let by_id = assert_some(repo.get(created.id).await.unwrap(), "user by id");
    assert_eq!(by_id.password_hash, created.password_hash);

    let by_email = assert_some(repo.get_by_email(&email).await.unwrap(), "user by email");
    assert_eq!(by_email.id, created.id);

    assert!(repo.get_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_constraints_become_field_errors() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("unique_constraints");

    repo.insert(new_user(&builder.email("ada"), &builder.phone(1)))
        .await
        .unwrap();

    match repo
        .insert(new_user(&builder.email("ada"), &builder.phone(2)))
        .await
    {
        Err(UserError::Validation(errors)) => assert!(errors.contains_key("email")),
        other => panic!("expected email error, got {:?}", other),
    }

    match repo
        .insert(new_user(&builder.email("bob"), &builder.phone(1)))
        .await
    {
        Err(UserError::Validation(errors)) => assert!(errors.contains_key("phone")),
        other => panic!("expected phone error, got {:?}", other),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_signup_and_login_through_postgres() {
    use axum_helpers::{JwtAuth, JwtConfig};

    let db = TestDatabase::new().await;
    let jwt = JwtAuth::new(&JwtConfig::new("this-is-a-valid-secret-with-32-chars!"));
    let service = UserService::new(PgUserRepository::new(db.connection()), jwt);

    let user = service
        .signup(SignupInput {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("5550100100".into()),
            password: Some("correct horse battery".into()),
        })
        .await
        .unwrap();

    let token = service
        .login(LoginInput {
            email: Some("ada@example.com".into()),
            password: Some("correct horse battery".into()),
        })
        .await
        .unwrap();

    let resolved = service.user_for_token(&token.token).await.unwrap();
    assert_eq!(resolved.id, user.id);
}
