//! Product storage: the repository trait and its backends.

use super::model::{NewProduct, Product};
use crate::error::{Result, StorefrontError};
use crate::infrastructure::MemoryDatabase;
use async_trait::async_trait;
use uuid::Uuid;

const TABLE: &str = "products";

/// Storage for products. Implementations own identity assignment.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist `product` under a fresh id and return the stored record.
    async fn save(&self, product: NewProduct) -> Result<Product>;

    /// Every stored product, in whatever order the backend yields them.
    async fn find_all(&self) -> Result<Vec<Product>>;
}

/// Products kept in a [`MemoryDatabase`], keyed by uuid v4 ids.
pub struct MemoryProductRepository {
    db: MemoryDatabase,
}

impl MemoryProductRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn save(&self, product: NewProduct) -> Result<Product> {
        let product = product.with_id(Uuid::new_v4().to_string());
        let data = serde_json::to_string(&product)?;
        self.db.upsert(TABLE, &product.id, data)?;
        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        self.db
            .scan(TABLE)?
            .iter()
            .map(|json| serde_json::from_str::<Product>(json).map_err(StorefrontError::from))
            .collect()
    }
}

#[cfg(feature = "sea-orm-db")]
pub use self::sea_orm_impl::SeaOrmProductRepository;

#[cfg(feature = "sea-orm-db")]
mod sea_orm_impl {
    use super::*;
    use crate::product::entity;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};

    /// Products kept in the `products` table.
    pub struct SeaOrmProductRepository {
        conn: DatabaseConnection,
    }

    impl SeaOrmProductRepository {
        pub fn new(conn: DatabaseConnection) -> Self {
            Self { conn }
        }
    }

    #[async_trait]
    impl ProductRepository for SeaOrmProductRepository {
        async fn save(&self, product: NewProduct) -> Result<Product> {
            let model = entity::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                name: Set(product.name),
                description: Set(product.description),
                price: Set(product.price),
            }
            .insert(&self.conn)
            .await?;
            Ok(model.into())
        }

        async fn find_all(&self) -> Result<Vec<Product>> {
            let models = entity::Entity::find().all(&self.conn).await?;
            Ok(models.into_iter().map(Product::from).collect())
        }
    }
}
