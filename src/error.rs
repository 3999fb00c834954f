//! Crate error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Errors surfaced by repositories, services and configuration.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Raised by a storage collaborator. Services pass it through untouched.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// A configuration value could not be parsed.
    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}

impl StorefrontError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        StorefrontError::Storage(format!("Document encoding error: {}", err))
    }
}

#[cfg(feature = "sea-orm-db")]
impl From<sea_orm::DbErr> for StorefrontError {
    fn from(err: sea_orm::DbErr) -> Self {
        StorefrontError::Storage(format!("Database error: {}", err))
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let message = match &self {
            StorefrontError::Storage(_) => "Storage operation failed".to_string(),
            StorefrontError::Config { .. } => self.to_string(),
        };

        (
            status,
            Json(json!({
                "statusCode": status.as_u16(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        )
            .into_response()
    }
}
