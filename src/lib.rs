//! # Storefront
//!
//! Product and order services for a small e-commerce backend.
//!
//! - **Products**: [`ProductService`] maps [`ProductRequest`]s onto a
//!   [`ProductRepository`] and stored products back onto [`ProductResponse`]s.
//!   [`product::router`] exposes it over HTTP at `/api/product`.
//! - **Orders**: [`OrderRepository`] offers save / find / delete keyed by a numeric id.
//!
//! Storage is pluggable: [`MemoryDatabase`] ships with the crate, and the
//! `sea-orm-db` feature adds SeaORM-backed repositories.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = MemoryDatabase::open();
//!     let products = ProductService::new(Arc::new(MemoryProductRepository::new(db)));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, storefront::app(Arc::new(products))).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod lifecycle;
pub mod order;
pub mod product;

pub use config::{ConfigService, ServerConfig};
pub use error::{Result, StorefrontError};
pub use infrastructure::MemoryDatabase;
pub use order::{Order, OrderRepository};
pub use product::{ProductRepository, ProductRequest, ProductResponse, ProductService};

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// The product HTTP surface with request tracing.
pub fn app(products: Arc<ProductService>) -> Router {
    product::router(products).layer(TraceLayer::new_for_http())
}

pub mod prelude {
    pub use crate::config::{ConfigService, ServerConfig};
    pub use crate::error::{Result, StorefrontError};
    pub use crate::infrastructure::MemoryDatabase;
    pub use crate::lifecycle::{
        LifecycleError, LifecycleManager, OnModuleDestroy, OnModuleInit, shutdown_signal,
    };
    pub use crate::order::{MemoryOrderRepository, Order, OrderRepository};
    pub use crate::product::{
        MemoryProductRepository, NoopObserver, ProductObserver, ProductRepository,
        ProductRequest, ProductResponse, ProductService, TracingObserver,
    };
}
