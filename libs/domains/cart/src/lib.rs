//! Cart Domain
//!
//! Per-user cart lines keyed by `(user_id, product_id)`. Adding a product
//! that is already in the cart replaces its quantity. Checkout and instant
//! buy answer 501.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← CurrentUser required on every route
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌────────────────────┐
//! │   Service   │ ───▶ │ ProductRepository  │  ← product must exist
//! └──────┬──────┘      └────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or PostgreSQL upsert
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_cart::{handlers, CartService, InMemoryCartRepository};
//! use domain_products::InMemoryProductRepository;
//!
//! let service = CartService::new(InMemoryCartRepository::new(), InMemoryProductRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CartError, CartResult};
pub use handlers::ApiDoc;
pub use models::{AddCartItem, CartItem, CartLine, MAX_QUANTITY};
pub use postgres::PgCartRepository;
pub use repository::{CartRepository, InMemoryCartRepository};
pub use service::CartService;
