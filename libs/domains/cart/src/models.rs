use axum_helpers::validation::{Validate, Validator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAX_QUANTITY: i32 = 100;

/// One product line in a user's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Add-to-cart payload. A missing quantity means 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddCartItem {
    #[schema(example = 42)]
    pub product_id: Option<i64>,
    #[schema(example = 2, minimum = 1, maximum = 100)]
    pub quantity: Option<i32>,
}

impl Validate for AddCartItem {
    fn validate(&self, v: &mut Validator) {
        match self.product_id {
            None => v.add_error("product_id", "must be provided"),
            Some(id) => v.check(id > 0, "product_id", "must be greater than zero"),
        }

        if let Some(quantity) = self.quantity {
            v.check(quantity >= 1, "quantity", "must be at least 1");
            v.check(
                quantity <= MAX_QUANTITY,
                "quantity",
                "must not be more than 100",
            );
        }
    }
}

impl AddCartItem {
    pub fn quantity_or_default(&self) -> i32 {
        self.quantity.unwrap_or(1)
    }
}

/// Row to upsert for `(user_id, product_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartEnvelope {
    pub cart: Vec<CartItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemEnvelope {
    pub cart_item: CartItem,
}
