//! Order storage: the repository trait and its backends.

use super::model::Order;
use crate::error::{Result, StorefrontError};
use crate::infrastructure::MemoryDatabase;
use async_trait::async_trait;

const TABLE: &str = "orders";

/// Storage for orders keyed by a numeric id.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert when `order.id` is `None` (assigning a fresh id), otherwise
    /// replace the row with that id, creating it if absent.
    async fn save(&self, order: Order) -> Result<Order>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>>;

    async fn find_all(&self) -> Result<Vec<Order>>;

    /// Deleting an id that does not exist is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// Orders kept in a [`MemoryDatabase`] with a per-table id sequence.
pub struct MemoryOrderRepository {
    db: MemoryDatabase,
}

impl MemoryOrderRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn save(&self, mut order: Order) -> Result<Order> {
        let id = match order.id {
            Some(id) => {
                self.db.observe_id(TABLE, id)?;
                id
            }
            None => self.db.next_id(TABLE)?,
        };
        order.id = Some(id);
        self.db
            .upsert(TABLE, &id.to_string(), serde_json::to_string(&order)?)?;
        Ok(order)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>> {
        match self.db.get(TABLE, &id.to_string())? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        self.db
            .scan(TABLE)?
            .iter()
            .map(|json| serde_json::from_str::<Order>(json).map_err(StorefrontError::from))
            .collect()
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        if !self.db.remove(TABLE, &id.to_string())? {
            tracing::debug!(order_id = id, "Delete of missing order ignored");
        }
        Ok(())
    }
}

#[cfg(feature = "sea-orm-db")]
pub use self::sea_orm_impl::SeaOrmOrderRepository;

#[cfg(feature = "sea-orm-db")]
mod sea_orm_impl {
    use super::*;
    use crate::order::entity;
    use sea_orm::{
        ActiveModelTrait,
        ActiveValue::{NotSet, Set},
        ConnectionTrait, DatabaseConnection, EntityTrait, Insert,
        sea_query::OnConflict,
    };

    /// Moves the `orders.id` serial past the largest stored id, so an insert
    /// without an id never collides with a row saved under an explicit one.
    const ADVANCE_ID_SEQUENCE: &str = "SELECT setval(pg_get_serial_sequence('orders', 'id'), \
         GREATEST((SELECT MAX(id) FROM orders), 1))";

    /// `INSERT ... ON CONFLICT (id) DO UPDATE`, so a save with an id is one statement.
    pub(super) fn upsert_statement(id: i64, order_number: String) -> Insert<entity::ActiveModel> {
        entity::Entity::insert(entity::ActiveModel {
            id: Set(id),
            order_number: Set(order_number),
        })
        .on_conflict(
            OnConflict::column(entity::Column::Id)
                .update_column(entity::Column::OrderNumber)
                .to_owned(),
        )
    }

    /// Order storage backed by the `orders` table.
    pub struct SeaOrmOrderRepository {
        conn: DatabaseConnection,
    }

    impl SeaOrmOrderRepository {
        pub fn new(conn: DatabaseConnection) -> Self {
            Self { conn }
        }
    }

    #[async_trait]
    impl OrderRepository for SeaOrmOrderRepository {
        async fn save(&self, order: Order) -> Result<Order> {
            let model = match order.id {
                None => {
                    entity::ActiveModel {
                        id: NotSet,
                        order_number: Set(order.order_number),
                    }
                    .insert(&self.conn)
                    .await?
                }
                Some(id) => {
                    let model = upsert_statement(id, order.order_number)
                        .exec_with_returning(&self.conn)
                        .await?;
                    self.conn.execute_unprepared(ADVANCE_ID_SEQUENCE).await?;
                    model
                }
            };
            Ok(model.into())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Order>> {
            let model = entity::Entity::find_by_id(id).one(&self.conn).await?;
            Ok(model.map(Order::from))
        }

        async fn find_all(&self) -> Result<Vec<Order>> {
            let models = entity::Entity::find().all(&self.conn).await?;
            Ok(models.into_iter().map(Order::from).collect())
        }

        async fn delete_by_id(&self, id: i64) -> Result<()> {
            entity::Entity::delete_by_id(id).exec(&self.conn).await?;
            Ok(())
        }
    }
}
