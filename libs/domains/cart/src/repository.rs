use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CartResult;
use crate::models::{CartItem, CartLine};

/// Repository trait for cart persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// The user's items, oldest first.
    async fn list(&self, user_id: i64) -> CartResult<Vec<CartItem>>;

    /// Insert the line, or replace the quantity when the user already has
    /// this product in the cart.
    async fn upsert(&self, line: CartLine) -> CartResult<CartItem>;

    /// Returns false when the product was not in the user's cart
    async fn remove(&self, user_id: i64, product_id: i64) -> CartResult<bool>;
}

/// In-memory implementation of CartRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartRepository {
    items: Arc<RwLock<BTreeMap<(i64, i64), CartItem>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn list(&self, user_id: i64) -> CartResult<Vec<CartItem>> {
        let items = self.items.read().await;
        let mut cart: Vec<CartItem> = items
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .map(|(_, item)| item.clone())
            .collect();
        cart.sort_by_key(|item| item.id);
        Ok(cart)
    }

    async fn upsert(&self, line: CartLine) -> CartResult<CartItem> {
        let mut items = self.items.write().await;
        let next_id = items.values().map(|i| i.id).max().unwrap_or(0) + 1;

        let item = items
            .entry((line.user_id, line.product_id))
            .and_modify(|item| item.quantity = line.quantity)
            .or_insert_with(|| CartItem {
                id: next_id,
                product_id: line.product_id,
                quantity: line.quantity,
                created_at: Utc::now(),
            });

        Ok(item.clone())
    }

    async fn remove(&self, user_id: i64, product_id: i64) -> CartResult<bool> {
        Ok(self
            .items
            .write()
            .await
            .remove(&(user_id, product_id))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(user_id: i64, product_id: i64, quantity: i32) -> CartLine {
        CartLine {
            user_id,
            product_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_quantity() {
        let repo = InMemoryCartRepository::new();

        let first = repo.upsert(line(1, 10, 2)).await.unwrap();
        let second = repo.upsert(line(1, 10, 5)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 5);
        assert_eq!(repo.list(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_carts_are_per_user() {
        let repo = InMemoryCartRepository::new();
        repo.upsert(line(1, 10, 1)).await.unwrap();
        repo.upsert(line(1, 11, 1)).await.unwrap();
        repo.upsert(line(2, 10, 3)).await.unwrap();

        let ids: Vec<i64> = repo
            .list(1)
            .await
            .unwrap()
            .iter()
            .map(|i| i.product_id)
            .collect();
        assert_eq!(ids, vec![10, 11]);

        assert!(repo.remove(2, 10).await.unwrap());
        assert!(!repo.remove(2, 10).await.unwrap());
        assert!(repo.list(2).await.unwrap().is_empty());
        assert_eq!(repo.list(1).await.unwrap().len(), 2);
    }
}
