use axum_helpers::validation::{Validate, Validator};
use std::sync::Arc;

use crate::error::{ProductError, ProductResult};
use crate::filters::{Filters, Metadata, calculate_metadata, validate_filters};
use crate::models::{CreateProduct, Product, ProductQuery};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and store a new product
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut v = Validator::new();
        input.validate(&mut v);
        if !v.valid() {
            return Err(ProductError::Validation(v.into_errors()));
        }

        let new_product = input
            .into_new_product()
            .ok_or_else(|| ProductError::Internal("validated product missing a field".into()))?;

        self.repository.insert(new_product).await
    }

    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// One page of products whose name contains `name` and whose price is at
    /// most `max_price`, with pagination metadata for the whole match set.
    pub async fn get_all(
        &self,
        name: &str,
        max_price: i64,
        filters: Filters,
    ) -> ProductResult<(Vec<Product>, Metadata)> {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters);
        if !v.valid() {
            return Err(ProductError::Validation(v.into_errors()));
        }

        let (page, page_size) = (filters.page, filters.page_size);
        let (products, total) = self
            .repository
            .search(ProductQuery {
                name: name.to_string(),
                max_price,
                filters,
            })
            .await?;

        Ok((products, calculate_metadata(total, page, page_size)))
    }

    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}
