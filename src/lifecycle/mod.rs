//! Lifecycle hooks for storage backends.
//!
//! ```text
//! 1. Configuration loading
//!    ↓
//! 2. OnModuleInit (each backend, registration order)
//!    ↓
//! 3. Server start
//!    ↓
//! [Running...]
//!    ↓
//! 4. Shutdown signal (SIGTERM/SIGINT)
//!    ↓
//! 5. OnModuleDestroy (each backend, reverse order)
//! ```

mod error;
mod manager;
mod shutdown;

pub use error::{LifecycleError, Result};
pub use manager::LifecycleManager;
pub use shutdown::shutdown_signal;

use async_trait::async_trait;

/// Called before the application starts accepting requests.
///
/// Backends open connections or mark themselves ready here.
#[async_trait]
pub trait OnModuleInit: Send + Sync {
    async fn on_module_init(&mut self) -> Result<()>;
}

/// Called during shutdown, after the server stopped accepting requests.
///
/// Backends are destroyed in **reverse order** of registration.
#[async_trait]
pub trait OnModuleDestroy: Send + Sync {
    async fn on_module_destroy(&mut self) -> Result<()>;
}
