//! In-process table store used by tests and local runs.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::{json, Value as JsonValue};
use tokio::sync::broadcast;
use tracing::debug;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::feed::ChangeNotification;
use crate::store::{Seating, TableRecord, TableStore};

const CHANGE_BUFFER: usize = 256;

/// One successful `update_hand`, in commit order.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRecord {
    pub table_id: String,
    pub hand: JsonValue,
    pub version: i32,
}

/// Tables kept in a concurrent map.
///
/// Every mutation (insert, hand update, removal) is announced on a broadcast
/// channel, so a worker subscribed to it sees the same feedback a database
/// trigger would produce.
pub struct MemoryTableStore {
    tables: DashMap<String, TableRecord>,
    writes: Mutex<Vec<WriteRecord>>,
    changes: broadcast::Sender<ChangeNotification>,
}

impl Default for MemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTableStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            tables: DashMap::new(),
            writes: Mutex::new(Vec::new()),
            changes,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotification> {
        self.changes.subscribe()
    }

    /// Creates or replaces a table at version 1.
    pub fn insert(&self, id: impl Into<String>, players: Seating, hand: JsonValue) {
        let record = TableRecord::new(id, players, hand);
        let after = snapshot(&record);
        let before = self
            .tables
            .insert(record.id.clone(), record.clone())
            .map(|old| snapshot(&old));
        self.announce(ChangeNotification::new(record.id).with_images(before, Some(after)));
    }

    pub fn remove(&self, table_id: &str) -> Option<TableRecord> {
        let (_, removed) = self.tables.remove(table_id)?;
        self.announce(
            ChangeNotification::new(table_id).with_images(Some(snapshot(&removed)), None),
        );
        Some(removed)
    }

    pub fn table(&self, table_id: &str) -> Option<TableRecord> {
        self.tables.get(table_id).map(|entry| entry.value().clone())
    }

    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes.lock().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    fn announce(&self, change: ChangeNotification) {
        // No receivers is fine.
        let _ = self.changes.send(change);
    }
}

fn snapshot(record: &TableRecord) -> JsonValue {
    json!({
        "players": record.players,
        "hand": record.hand,
        "version": record.version,
    })
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn get(&self, table_id: &str) -> Result<Option<TableRecord>, DomainError> {
        Ok(self.table(table_id))
    }

    async fn update_hand(
        &self,
        table_id: &str,
        hand: JsonValue,
        expected_version: Option<i32>,
    ) -> Result<i32, DomainError> {
        let (before, after) = {
            let mut entry = self.tables.get_mut(table_id).ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Table, format!("Table not found at {table_id}"))
            })?;
            let record = entry.value_mut();
            if let Some(expected) = expected_version {
                if record.version != expected {
                    return Err(DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                            expected, record.version
                        ),
                    ));
                }
            }
            let before = snapshot(record);
            record.hand = hand.clone();
            record.version += 1;
            self.writes.lock().push(WriteRecord {
                table_id: table_id.to_string(),
                hand,
                version: record.version,
            });
            (before, record.clone())
        };

        debug!(table_id, version = after.version, "Hand written");
        self.announce(
            ChangeNotification::new(table_id).with_images(Some(before), Some(snapshot(&after))),
        );
        Ok(after.version)
    }
}
