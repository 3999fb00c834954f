use crate::error::{Result, StorefrontError};
use crate::lifecycle::{self, LifecycleError, OnModuleDestroy, OnModuleInit};
use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};

/// SeaORM connection pool with lifecycle hooks.
///
/// Tables (`products`, `orders`) are provisioned outside this crate.
pub struct PostgresDatabase {
    url: String,
    conn: Option<DatabaseConnection>,
}

impl PostgresDatabase {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            conn: None,
        }
    }

    /// A handle to the pool. Fails until `on_module_init` has run.
    pub fn connection(&self) -> Result<DatabaseConnection> {
        self.conn
            .clone()
            .ok_or_else(|| StorefrontError::storage("database connection not initialized"))
    }
}

#[async_trait]
impl OnModuleInit for PostgresDatabase {
    async fn on_module_init(&mut self) -> lifecycle::Result<()> {
        tracing::info!("PostgresDatabase: initializing connection pool...");
        let conn = Database::connect(self.url.as_str())
            .await
            .map_err(|e| LifecycleError::init_failed(e.to_string()))?;
        self.conn = Some(conn);
        tracing::info!("PostgresDatabase: connection pool initialized");
        Ok(())
    }
}

#[async_trait]
impl OnModuleDestroy for PostgresDatabase {
    async fn on_module_destroy(&mut self) -> lifecycle::Result<()> {
        if let Some(conn) = self.conn.take() {
            tracing::info!("PostgresDatabase: closing connection pool...");
            if let Err(e) = conn.close().await {
                tracing::error!("PostgresDatabase: close failed: {}", e);
            }
        }
        Ok(())
    }
}
