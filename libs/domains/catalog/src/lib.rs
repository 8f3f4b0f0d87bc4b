//! Catalog Domain
//!
//! Categories, products and product images, plus the read-only API that
//! exposes published products by slug.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← GET /products/, GET /products/{slug}/
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │   Service   │ ──▶ │ Serializers │  ← ProductAction picks list or detail shape
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │ Repository  │ ◀── │   Queries   │  ← published(), in_stock(), first_image() ...
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Category, ProductItem, ProductImage
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, CatalogService, InMemoryCatalogRepository};
//!
//! let service = CatalogService::new(InMemoryCatalogRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod serializers;
pub mod service;
pub mod slug;

pub use error::{CatalogError, CatalogResult};
pub use models::{
    Category, CreateCategory, CreateProductImage, CreateProductItem, ProductImage, ProductItem,
    UpdateProductItem,
};
pub use postgres::PgCatalogRepository;
pub use query::{ImageQuery, ProductPredicate, ProductQuery};
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use serializers::{ProductAction, ProductImageRepr, ProductItemRepr, ProductSerializer};
pub use service::CatalogService;
