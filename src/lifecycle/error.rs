//! Lifecycle error types

use thiserror::Error;

/// Errors raised while running lifecycle hooks
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A backend could not start
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// A phase did not finish in time
    #[error("Timeout during {phase}: {message}")]
    Timeout { phase: String, message: String },

    /// A registered hook returned an error
    #[error("Hook execution failed for {service}: {message}")]
    HookFailed { service: String, message: String },
}

impl LifecycleError {
    pub fn init_failed(msg: impl Into<String>) -> Self {
        Self::InitializationFailed(msg.into())
    }

    pub fn timeout(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timeout {
            phase: phase.into(),
            message: message.into(),
        }
    }

    pub fn hook_failed(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HookFailed {
            service: service.into(),
            message: message.into(),
        }
    }
}

/// Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;
