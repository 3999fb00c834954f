//! Environment-backed configuration.
//!
//! [`ConfigService`] holds raw string values; [`ServerConfig`] is the typed view
//! the binary starts from.

use crate::error::{Result, StorefrontError};
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Key/value configuration, seeded from the process environment.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Load `.env` (if present) and then every environment variable.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_pairs(env::vars())
    }

    /// Build a store from explicit pairs, without touching the environment.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let service = Self::default();
        for (key, value) in pairs {
            service.config.insert(key.into(), value.into());
        }
        service
    }

    /// Raw value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Set or replace `key`.
    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Parse `key` into `T`, falling back to `default` when unset.
    pub fn parse<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map_err(|e| StorefrontError::config(key, format!("{:?}: {}", raw, e))),
            None => Ok(default),
        }
    }
}

/// Settings for the product service binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// When set (and the `sea-orm-db` feature is on) products live in this database.
    pub database_url: Option<String>,
    /// Upper bound on running every init hook before the server binds.
    pub startup_timeout: Duration,
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Read HOST, PORT, DATABASE_URL, STARTUP_TIMEOUT_SECS and SHUTDOWN_TIMEOUT_SECS.
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let host = config.get_or("HOST", "0.0.0.0");
        let port = config.parse::<u16>("PORT", 8080)?;
        let database_url = config.get("DATABASE_URL").filter(|url| !url.is_empty());
        let startup_timeout =
            Duration::from_secs(config.parse::<u64>("STARTUP_TIMEOUT_SECS", 30)?);
        let shutdown_timeout =
            Duration::from_secs(config.parse::<u64>("SHUTDOWN_TIMEOUT_SECS", 30)?);

        Ok(Self {
            host,
            port,
            database_url,
            startup_timeout,
            shutdown_timeout,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
