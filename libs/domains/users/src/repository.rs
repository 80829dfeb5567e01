use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with an `email` or `phone` field error when either is taken.
    async fn insert(&self, input: NewUser) -> UserResult<User>;

    async fn get(&self, id: i64) -> UserResult<Option<User>>;

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<i64, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.email.as_deref() == Some(input.email.as_str()))
        {
            return Err(UserError::duplicate_email());
        }
        if users
            .values()
            .any(|u| u.phone.as_deref() == Some(input.phone.as_str()))
        {
            return Err(UserError::duplicate_phone());
        }

        let id = users.keys().next_back().copied().unwrap_or(0) + 1;
        let user = User {
            id,
            created_at: Utc::now(),
            first_name: Some(input.first_name),
            last_name: Some(input.last_name),
            email: Some(input.email),
            phone: Some(input.phone),
            password_hash: input.password_hash,
            version: 1,
        };
        users.insert(id, user.clone());

        tracing::info!(user_id = id, "Created user");
        Ok(user)
    }

    async fn get(&self, id: i64) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, phone: &str) -> NewUser {
        NewUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: phone.into(),
            password_hash: "$argon2id$stub".into(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert(new_user("ada@example.com", "5550100100"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.version, 1);
        assert_eq!(repo.get(1).await.unwrap(), Some(user.clone()));
        assert_eq!(
            repo.get_by_email("ada@example.com").await.unwrap(),
            Some(user)
        );
        assert!(repo.get_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_and_phone() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("ada@example.com", "5550100100"))
            .await
            .unwrap();

        match repo.insert(new_user("ada@example.com", "5550100199")).await {
            Err(UserError::Validation(errors)) => assert!(errors.contains_key("email")),
            other => panic!("expected email error, got {:?}", other),
        }

        match repo.insert(new_user("bob@example.com", "5550100100")).await {
            Err(UserError::Validation(errors)) => assert!(errors.contains_key("phone")),
            other => panic!("expected phone error, got {:?}", other),
        }
    }
}
