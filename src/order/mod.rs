//! Order persistence. There is no order business logic; callers use the
//! repository directly.

#[cfg(feature = "sea-orm-db")]
pub mod entity;
pub mod model;
pub mod repository;

pub use model::Order;
pub use repository::{MemoryOrderRepository, OrderRepository};
#[cfg(feature = "sea-orm-db")]
pub use repository::SeaOrmOrderRepository;
