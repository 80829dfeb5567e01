use axum_helpers::validation::{Validate, Validator, is_url};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::filters::{Filters, Metadata};

/// Sort keys accepted by product search.
pub const PRODUCT_SORT_SAFE_LIST: &[&str] = &[
    "id", "name", "price", "rating", "-id", "-name", "-price", "-rating",
];

/// Search price ceiling when the query string has no `price`.
pub const DEFAULT_MAX_PRICE: i64 = i32::MAX as i64;

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    /// Price in the smallest currency unit
    pub product_price: i64,
    pub product_rating: i32,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Admin payload for a new product.
///
/// Every field is optional so a missing field is reported by the product
/// rules instead of failing JSON decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateProduct {
    #[schema(example = "Desk lamp")]
    pub product_name: Option<String>,
    #[schema(example = 2499)]
    pub product_price: Option<i64>,
    #[schema(example = 4)]
    pub product_rating: Option<i32>,
    #[schema(example = "https://cdn.example.com/lamp.png")]
    pub image: Option<String>,
}

impl Validate for CreateProduct {
    fn validate(&self, v: &mut Validator) {
        validate_product(v, self);
    }
}

/// Product field rules.
///
/// Rating must be strictly between 0 and 5, so a rating of 5 is rejected.
pub fn validate_product(v: &mut Validator, p: &CreateProduct) {
    match p.product_name.as_deref() {
        None | Some("") => v.add_error("product_name", "must be provided"),
        Some(name) => {
            v.check(name.len() >= 3, "product_name", "must be at least 3 bytes long");
            v.check(
                name.len() <= 30,
                "product_name",
                "must not be more than 30 bytes long",
            );
        }
    }

    match p.product_price {
        None => v.add_error("product_price", "must be provided"),
        Some(price) => v.check(price > 0, "product_price", "must be greater than zero"),
    }

    match p.product_rating {
        None => v.add_error("product_rating", "must be provided"),
        Some(rating) => {
            v.check(rating > 0, "product_rating", "must be greater than zero");
            v.check(rating < 5, "product_rating", "must be less than 5");
        }
    }

    match p.image.as_deref() {
        None | Some("") => v.add_error("image", "must be provided"),
        Some(image) => v.check(is_url(image), "image", "must be a valid URL"),
    }
}

/// Validated product ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_name: String,
    pub product_price: i64,
    pub product_rating: i32,
    pub image: String,
}

impl CreateProduct {
    /// `None` unless every field is present; run [`validate_product`] first.
    pub fn into_new_product(self) -> Option<NewProduct> {
        Some(NewProduct {
            product_name: self.product_name?,
            product_price: self.product_price?,
            product_rating: self.product_rating?,
            image: self.image?,
        })
    }
}

/// Search criteria for [`crate::ProductRepository::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    /// Case-insensitive substring of the name; empty matches everything
    pub name: String,
    /// Inclusive upper bound on price
    pub max_price: i64,
    pub filters: Filters,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductEnvelope {
    pub product: Product,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListEnvelope {
    pub products: Vec<Product>,
    pub metadata: Metadata,
}
