use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::filters::SortDirection;
use crate::models::{NewProduct, Product, ProductQuery};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product and return it with its id
    async fn insert(&self, input: NewProduct) -> ProductResult<Product>;

    async fn get(&self, id: i64) -> ProductResult<Option<Product>>;

    /// One page of matching products plus the number of matches overall.
    ///
    /// Rows with equal sort values come back in storage order.
    async fn search(&self, query: ProductQuery) -> ProductResult<(Vec<Product>, i64)>;

    /// Returns false when no product had this id
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

fn matches(product: &Product, query: &ProductQuery) -> bool {
    let name_ok = query.name.is_empty()
        || product
            .product_name
            .to_lowercase()
            .contains(&query.name.to_lowercase());
    name_ok && product.product_price <= query.max_price
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, input: NewProduct) -> ProductResult<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product {
            id,
            product_name: input.product_name,
            product_price: input.product_price,
            product_rating: input.product_rating,
            image: input.image,
            created_at: Utc::now(),
        };

        self.products.write().await.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get(&self, id: i64) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn search(&self, query: ProductQuery) -> ProductResult<(Vec<Product>, i64)> {
        let products = self.products.read().await;

        // BTreeMap iteration is id order, the "storage order" for ties
        let mut result: Vec<Product> = products
            .values()
            .filter(|p| matches(p, &query))
            .cloned()
            .collect();
        let total = result.len() as i64;

        let filters = &query.filters;
        match filters.sort_column() {
            "name" => result.sort_by(|a, b| a.product_name.cmp(&b.product_name)),
            "price" => result.sort_by_key(|p| p.product_price),
            "rating" => result.sort_by_key(|p| p.product_rating),
            _ => result.sort_by_key(|p| p.id),
        }
        if filters.sort_direction() == SortDirection::Desc {
            result.reverse();
        }

        let page = result
            .into_iter()
            .skip(filters.offset().max(0) as usize)
            .take(filters.limit().max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let removed = self.products.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}
