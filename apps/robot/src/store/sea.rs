//! `TableStore` over a SeaORM connection.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value as JsonValue};
use tracing::warn;

use crate::adapters::tables_sea::TableCreate;
use crate::errors::domain::DomainError;
use crate::feed::{ChangeNotification, ChangePublisher};
use crate::repos::tables as tables_repo;
use crate::store::{TableRecord, TableStore};

pub struct SeaTableStore {
    db: DatabaseConnection,
    publisher: Option<Arc<dyn ChangePublisher>>,
}

impl SeaTableStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, publisher: None }
    }

    /// Announce every created table and committed hand through `publisher`.
    pub fn with_publisher(mut self, publisher: Arc<dyn ChangePublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Inserts a new table at version 1 and announces it like any other write.
    pub async fn create_table(&self, dto: TableCreate) -> Result<TableRecord, DomainError> {
        let table = tables_repo::create_table(&self.db, dto).await?;
        let after = json!({
            "players": table.players,
            "hand": table.hand,
            "version": table.version,
        });
        self.announce(ChangeNotification::new(table.id.as_str()).with_images(None, Some(after)))
            .await;
        Ok(table)
    }

    async fn announce(&self, change: ChangeNotification) {
        let Some(publisher) = &self.publisher else {
            return;
        };
        // Write is committed; publish failures are only logged.
        if let Err(err) = publisher.publish(&change).await {
            warn!(table_id = %change.table_id, error = %err, "Failed to publish table change");
        }
    }
}

#[async_trait]
impl TableStore for SeaTableStore {
    async fn get(&self, table_id: &str) -> Result<Option<TableRecord>, DomainError> {
        tables_repo::find_by_id(&self.db, table_id).await
    }

    async fn update_hand(
        &self,
        table_id: &str,
        hand: JsonValue,
        expected_version: Option<i32>,
    ) -> Result<i32, DomainError> {
        let table = tables_repo::update_hand(&self.db, table_id, hand, expected_version).await?;

        self.announce(ChangeNotification::new(table_id).with_images(
            None,
            Some(json!({ "hand": table.hand, "version": table.version })),
        ))
        .await;

        Ok(table.version)
    }
}
