use crate::error::{Result, StorefrontError};
use crate::lifecycle::{self, OnModuleDestroy, OnModuleInit};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Table {
    // Insertion order; a replaced row keeps its slot.
    rows: IndexMap<String, String>,
    sequence: i64,
}

/// Process-local document store.
///
/// Rows are JSON documents grouped by table and keyed by id. Clones share the
/// same storage, so repositories and the lifecycle manager can each hold one.
/// Every operation fails with [`StorefrontError::Storage`] while disconnected.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<HashMap<String, Table>>>,
    connected: Arc<AtomicBool>,
}

impl MemoryDatabase {
    /// A disconnected database; `on_module_init` (or [`connect`](Self::connect)) opens it.
    pub fn new() -> Self {
        Self::default()
    }

    /// A database that is ready for use.
    pub fn open() -> Self {
        let db = Self::new();
        db.connect();
        db
    }

    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn tables(&self) -> Result<MutexGuard<'_, HashMap<String, Table>>> {
        if !self.is_connected() {
            return Err(StorefrontError::storage("memory database is not connected"));
        }
        self.tables
            .lock()
            .map_err(|_| StorefrontError::storage("memory database lock poisoned"))
    }

    /// Insert a row, replacing any row with the same id.
    pub fn upsert(&self, table: &str, id: &str, data: String) -> Result<()> {
        let mut tables = self.tables()?;
        tables
            .entry(table.to_string())
            .or_default()
            .rows
            .insert(id.to_string(), data);
        Ok(())
    }

    pub fn get(&self, table: &str, id: &str) -> Result<Option<String>> {
        let tables = self.tables()?;
        Ok(tables.get(table).and_then(|t| t.rows.get(id).cloned()))
    }

    pub fn scan(&self, table: &str) -> Result<Vec<String>> {
        let tables = self.tables()?;
        Ok(tables
            .get(table)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    /// Returns whether a row was removed.
    pub fn remove(&self, table: &str, id: &str) -> Result<bool> {
        let mut tables = self.tables()?;
        Ok(tables
            .get_mut(table)
            .is_some_and(|t| t.rows.shift_remove(id).is_some()))
    }

    /// Next value of the table's numeric id sequence, starting at 1.
    pub fn next_id(&self, table: &str) -> Result<i64> {
        let mut tables = self.tables()?;
        let t = tables.entry(table.to_string()).or_default();
        t.sequence += 1;
        Ok(t.sequence)
    }

    /// Move the sequence past an explicitly chosen id.
    pub fn observe_id(&self, table: &str, id: i64) -> Result<()> {
        let mut tables = self.tables()?;
        let t = tables.entry(table.to_string()).or_default();
        t.sequence = t.sequence.max(id);
        Ok(())
    }
}

#[async_trait]
impl OnModuleInit for MemoryDatabase {
    async fn on_module_init(&mut self) -> lifecycle::Result<()> {
        tracing::info!("MemoryDatabase: opening store");
        self.connect();
        Ok(())
    }
}

#[async_trait]
impl OnModuleDestroy for MemoryDatabase {
    async fn on_module_destroy(&mut self) -> lifecycle::Result<()> {
        tracing::info!("MemoryDatabase: closing store");
        self.disconnect();
        Ok(())
    }
}
