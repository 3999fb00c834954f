use anyhow::Context;
use std::sync::Arc;
use storefront::prelude::*;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting product service...");

    let config = ServerConfig::from_config(&ConfigService::from_env())
        .context("failed to load configuration")?;

    let mut lifecycle = LifecycleManager::new();
    let repository = product_repository(&config, &mut lifecycle).await?;
    let products = Arc::new(ProductService::new(repository));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, storefront::app(products))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Initiating graceful shutdown...");
    lifecycle
        .call_module_destroy_with_timeout(config.shutdown_timeout)
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(feature = "sea-orm-db")]
async fn product_repository(
    config: &ServerConfig,
    lifecycle: &mut LifecycleManager,
) -> anyhow::Result<Arc<dyn ProductRepository>> {
    use storefront::infrastructure::PostgresDatabase;
    use storefront::product::SeaOrmProductRepository;

    let Some(url) = config.database_url.as_deref() else {
        return memory_repository(config, lifecycle).await;
    };

    let db = Arc::new(RwLock::new(PostgresDatabase::new(url)));
    lifecycle.register(Arc::clone(&db), "PostgresDatabase");
    lifecycle
        .call_module_init_with_timeout(config.startup_timeout)
        .await?;

    let conn = db.read().await.connection()?;
    Ok(Arc::new(SeaOrmProductRepository::new(conn)))
}

#[cfg(not(feature = "sea-orm-db"))]
async fn product_repository(
    config: &ServerConfig,
    lifecycle: &mut LifecycleManager,
) -> anyhow::Result<Arc<dyn ProductRepository>> {
    if config.database_url.is_some() {
        tracing::warn!("DATABASE_URL is set but the sea-orm-db feature is off; using memory store");
    }
    memory_repository(config, lifecycle).await
}

async fn memory_repository(
    config: &ServerConfig,
    lifecycle: &mut LifecycleManager,
) -> anyhow::Result<Arc<dyn ProductRepository>> {
    let db = MemoryDatabase::new();
    lifecycle.register(Arc::new(RwLock::new(db.clone())), "MemoryDatabase");
    lifecycle
        .call_module_init_with_timeout(config.startup_timeout)
        .await?;
    Ok(Arc::new(MemoryProductRepository::new(db)))
}
