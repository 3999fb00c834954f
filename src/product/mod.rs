pub mod controller;
#[cfg(feature = "sea-orm-db")]
pub mod entity;
pub mod model;
pub mod observer;
pub mod repository;
pub mod service;

pub use controller::router;
pub use model::{NewProduct, Product, ProductRequest, ProductResponse};
pub use observer::{NoopObserver, ProductObserver, TracingObserver};
pub use repository::{MemoryProductRepository, ProductRepository};
#[cfg(feature = "sea-orm-db")]
pub use repository::SeaOrmProductRepository;
pub use service::ProductService;
