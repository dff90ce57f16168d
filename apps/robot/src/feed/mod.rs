//! Change notifications: what the worker listens to and stores emit.

pub mod broker;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// A table document changed (created, updated or deleted).
///
/// Delivery is at-least-once and unordered. `before`/`after` are carried
/// for observers; the dispatcher only looks at `table_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub table_id: String,
    #[serde(default)]
    pub before: Option<JsonValue>,
    #[serde(default)]
    pub after: Option<JsonValue>,
}

impl ChangeNotification {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            before: None,
            after: None,
        }
    }

    pub fn with_images(mut self, before: Option<JsonValue>, after: Option<JsonValue>) -> Self {
        self.before = before;
        self.after = after;
        self
    }
}

/// Wire form of a notification on the pub/sub channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEnvelope {
    TableChanged(ChangeNotification),
}

impl From<ChangeNotification> for ChangeEnvelope {
    fn from(change: ChangeNotification) -> Self {
        ChangeEnvelope::TableChanged(change)
    }
}

impl From<ChangeEnvelope> for ChangeNotification {
    fn from(envelope: ChangeEnvelope) -> Self {
        match envelope {
            ChangeEnvelope::TableChanged(change) => change,
        }
    }
}

/// Sink for change notifications emitted after a table write.
#[async_trait]
pub trait ChangePublisher: Send + Sync {
    async fn publish(&self, change: &ChangeNotification) -> Result<(), AppError>;
}
