//! Cart routes

use axum::Router;
use domain_cart::{CartService, PgCartRepository, handlers};
use domain_products::PgProductRepository;

use crate::state::AppState;

/// `/cart`
pub fn router(state: &AppState) -> Router {
    let service = CartService::new(
        PgCartRepository::new(state.db.clone()),
        PgProductRepository::new(state.db.clone()),
    );
    handlers::router(service)
}
