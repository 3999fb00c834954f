//! Lifecycle Manager
//!
//! Registers backends and runs their init and destroy hooks.

use super::{LifecycleError, OnModuleDestroy, OnModuleInit, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

struct Hook<T: ?Sized> {
    service: Arc<RwLock<T>>,
    name: String,
}

/// Runs init and destroy hooks for registered backends.
///
/// ```rust,ignore
/// let mut manager = LifecycleManager::new();
/// manager.register(Arc::clone(&db), "MemoryDatabase");
///
/// manager.call_module_init().await?;
/// // ... serve ...
/// manager.call_module_destroy().await?;
/// ```
#[derive(Default)]
pub struct LifecycleManager {
    on_init_hooks: Vec<Hook<dyn OnModuleInit>>,
    on_destroy_hooks: Vec<Hook<dyn OnModuleDestroy>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend for init only.
    pub fn register_init<T>(&mut self, service: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnModuleInit + 'static,
    {
        self.on_init_hooks.push(Hook {
            service,
            name: name.into(),
        });
    }

    /// Register a backend for destroy only.
    pub fn register_destroy<T>(&mut self, service: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnModuleDestroy + 'static,
    {
        self.on_destroy_hooks.push(Hook {
            service,
            name: name.into(),
        });
    }

    /// Register a backend for both init and destroy.
    pub fn register<T>(&mut self, service: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnModuleInit + OnModuleDestroy + 'static,
    {
        let name = name.into();
        self.register_init(Arc::clone(&service), name.clone());
        self.register_destroy(service, name);
    }

    /// Execute all OnModuleInit hooks in registration order.
    ///
    /// Stops at the first failing hook.
    pub async fn call_module_init(&self) -> Result<()> {
        tracing::info!("Calling OnModuleInit hooks...");

        for hook in &self.on_init_hooks {
            tracing::debug!("Initializing: {}", hook.name);
            let mut service = hook.service.write().await;
            service.on_module_init().await.map_err(|e| {
                tracing::error!("OnModuleInit failed for {}: {}", hook.name, e);
                LifecycleError::hook_failed(&hook.name, e.to_string())
            })?;
        }

        tracing::info!(
            "OnModuleInit complete ({} hooks executed)",
            self.on_init_hooks.len()
        );
        Ok(())
    }

    /// [`call_module_init`](Self::call_module_init) bounded by `timeout`.
    pub async fn call_module_init_with_timeout(&self, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.call_module_init())
            .await
            .map_err(|_| {
                LifecycleError::timeout("OnModuleInit", format!("Timeout after {:?}", timeout))
            })?
    }

    /// Execute all OnModuleDestroy hooks in **reverse** registration order.
    ///
    /// A failing hook is logged and the remaining hooks still run.
    pub async fn call_module_destroy(&self) -> Result<()> {
        tracing::info!("Calling OnModuleDestroy hooks...");

        for hook in self.on_destroy_hooks.iter().rev() {
            tracing::debug!("Destroying: {}", hook.name);
            let mut service = hook.service.write().await;
            if let Err(e) = service.on_module_destroy().await {
                tracing::error!("OnModuleDestroy failed for {}: {}", hook.name, e);
            }
        }

        tracing::info!(
            "OnModuleDestroy complete ({} hooks executed)",
            self.on_destroy_hooks.len()
        );
        Ok(())
    }

    /// [`call_module_destroy`](Self::call_module_destroy) bounded by `timeout`.
    pub async fn call_module_destroy_with_timeout(&self, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.call_module_destroy())
            .await
            .map_err(|_| {
                LifecycleError::timeout("OnModuleDestroy", format!("Timeout after {:?}", timeout))
            })?
    }

    pub fn init_hook_count(&self) -> usize {
        self.on_init_hooks.len()
    }

    pub fn destroy_hook_count(&self) -> usize {
        self.on_destroy_hooks.len()
    }
}
