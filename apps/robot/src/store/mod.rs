//! Persistence substrate the robot reads tables from and writes hands to.

pub mod memory;
pub mod sea;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::errors::domain::DomainError;
pub use crate::repos::tables::{Seating, TableRecord};

pub use memory::{MemoryTableStore, WriteRecord};
pub use sea::SeaTableStore;

#[async_trait]
pub trait TableStore: Send + Sync {
    /// Current persisted table, or `None` if there is none at `table_id`.
    async fn get(&self, table_id: &str) -> Result<Option<TableRecord>, DomainError>;

    /// Replaces the `hand` field and returns the new version.
    ///
    /// With `expected_version` the write only happens while the stored
    /// version still matches; otherwise it fails with an optimistic-lock
    /// conflict. A missing table is `NotFound` either way.
    async fn update_hand(
        &self,
        table_id: &str,
        hand: JsonValue,
        expected_version: Option<i32>,
    ) -> Result<i32, DomainError>;
}
