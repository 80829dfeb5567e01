//! API routes module

pub mod cart;
pub mod health;
pub mod products;
pub mod users;

use axum::{Router, middleware, routing::get};
use domain_users::{PgUserRepository, authenticate};

use crate::state::AppState;

/// All API routes, without the `/v1` prefix `create_router` adds.
///
/// Every route runs behind `authenticate`, so anonymous requests carry
/// `Identity::Anonymous` and handlers that need a user reject them.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .nest("/products", products::router(state))
        .nest("/admin/products", products::admin_router(state))
        .nest("/cart", cart::router(state))
        .layer(middleware::from_fn_with_state(
            users::service(state),
            authenticate::<PgUserRepository>,
        ))
}

/// `GET /ready` with a real database check.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
