use axum_helpers::validation::{Validate, Validator};
use domain_products::ProductRepository;
use std::sync::Arc;

use crate::error::{CartError, CartResult};
use crate::models::{AddCartItem, CartItem, CartLine};
use crate::repository::CartRepository;

/// Cart operations for one authenticated user at a time.
///
/// Product existence is checked through the catalog repository `P`.
pub struct CartService<R: CartRepository, P: ProductRepository> {
    repository: Arc<R>,
    products: Arc<P>,
}

impl<R: CartRepository, P: ProductRepository> Clone for CartService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            products: Arc::clone(&self.products),
        }
    }
}

impl<R: CartRepository, P: ProductRepository> CartService<R, P> {
    pub fn new(repository: R, products: P) -> Self {
        Self {
            repository: Arc::new(repository),
            products: Arc::new(products),
        }
    }

    pub async fn list(&self, user_id: i64) -> CartResult<Vec<CartItem>> {
        self.repository.list(user_id).await
    }

    /// Validate the line, then insert it or replace its quantity.
    pub async fn add_item(&self, user_id: i64, input: AddCartItem) -> CartResult<CartItem> {
        let mut v = Validator::new();
        input.validate(&mut v);
        if !v.valid() {
            return Err(CartError::Validation(v.into_errors()));
        }

        let quantity = input.quantity_or_default();
        let product_id = input
            .product_id
            .ok_or_else(|| CartError::Internal("validated cart item missing product_id".into()))?;

        if self.products.get(product_id).await?.is_none() {
            return Err(CartError::unknown_product());
        }

        self.repository
            .upsert(CartLine {
                user_id,
                product_id,
                quantity,
            })
            .await
    }

    pub async fn remove_item(&self, user_id: i64, product_id: i64) -> CartResult<()> {
        if self.repository.remove(user_id, product_id).await? {
            Ok(())
        } else {
            Err(CartError::ItemNotFound(product_id))
        }
    }

    pub async fn checkout(&self, _user_id: i64) -> CartResult<()> {
        Err(CartError::NotImplemented("checkout"))
    }

    pub async fn instant_buy(&self, _user_id: i64) -> CartResult<()> {
        Err(CartError::NotImplemented("instant buy"))
    }
}
