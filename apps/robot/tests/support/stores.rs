//! Store wrappers that inject concurrency into a single test thread.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use robot::errors::domain::DomainError;
use robot::store::{MemoryTableStore, TableRecord, TableStore};
use serde_json::Value;

/// Lets another writer touch the table between the robot's read and write.
pub struct InterleavingStore {
    pub inner: MemoryTableStore,
    interfere: AtomicBool,
}

impl InterleavingStore {
    pub fn new(inner: MemoryTableStore) -> Self {
        Self {
            inner,
            interfere: AtomicBool::new(false),
        }
    }

    /// The next `update_hand` is preceded by a rewrite of the current hand.
    pub fn interfere_once(&self) {
        self.interfere.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TableStore for InterleavingStore {
    async fn get(&self, table_id: &str) -> Result<Option<TableRecord>, DomainError> {
        self.inner.get(table_id).await
    }

    async fn update_hand(
        &self,
        table_id: &str,
        hand: Value,
        expected_version: Option<i32>,
    ) -> Result<i32, DomainError> {
        if self.interfere.swap(false, Ordering::SeqCst) {
            if let Some(current) = self.inner.table(table_id) {
                self.inner.update_hand(table_id, current.hand, None).await?;
            }
        }
        self.inner.update_hand(table_id, hand, expected_version).await
    }
}
