//! Products Domain
//!
//! Catalog search with pagination, single product lookup and admin
//! create/delete.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← query decoding, JSON envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← product rules, filters, metadata
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or PostgreSQL (sea-orm)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service.clone());
//! let admin = handlers::admin_router(service);
//! ```

pub mod entity;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use filters::{Filters, Metadata, SortDirection, calculate_metadata, validate_filters};
pub use handlers::{AdminApiDoc, ApiDoc};
pub use models::{
    CreateProduct, DEFAULT_MAX_PRICE, NewProduct, PRODUCT_SORT_SAFE_LIST, Product, ProductQuery,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
