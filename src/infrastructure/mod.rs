//! Storage backends shared by the product and order repositories.

mod memory;
#[cfg(feature = "sea-orm-db")]
mod postgres;

pub use memory::MemoryDatabase;
#[cfg(feature = "sea-orm-db")]
pub use postgres::PostgresDatabase;
