use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::store::{TableRecord, TableStore};

/// Writes a new hand document back to the table it was read from.
#[async_trait]
pub trait HandCommitter: Send + Sync {
    fn policy(&self) -> CommitPolicy;

    /// Persists `hand` for `table` and returns the table's new version.
    async fn commit(
        &self,
        store: &dyn TableStore,
        table: &TableRecord,
        hand: JsonValue,
    ) -> Result<i32, DomainError>;
}

/// Unconditional write; concurrent invocations race and the later one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastWriterWins;

#[async_trait]
impl HandCommitter for LastWriterWins {
    fn policy(&self) -> CommitPolicy {
        CommitPolicy::LastWriterWins
    }

    async fn commit(
        &self,
        store: &dyn TableStore,
        table: &TableRecord,
        hand: JsonValue,
    ) -> Result<i32, DomainError> {
        store.update_hand(&table.id, hand, None).await
    }
}

/// Writes only if nobody wrote since `table` was read.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionChecked;

#[async_trait]
impl HandCommitter for VersionChecked {
    fn policy(&self) -> CommitPolicy {
        CommitPolicy::VersionChecked
    }

    async fn commit(
        &self,
        store: &dyn TableStore,
        table: &TableRecord,
        hand: JsonValue,
    ) -> Result<i32, DomainError> {
        store.update_hand(&table.id, hand, Some(table.version)).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    #[default]
    LastWriterWins,
    VersionChecked,
}

impl CommitPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CommitPolicy::LastWriterWins => "last_writer_wins",
            CommitPolicy::VersionChecked => "version_checked",
        }
    }

    pub fn committer(self) -> Arc<dyn HandCommitter> {
        match self {
            CommitPolicy::LastWriterWins => Arc::new(LastWriterWins),
            CommitPolicy::VersionChecked => Arc::new(VersionChecked),
        }
    }
}

impl FromStr for CommitPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_writer_wins" => Ok(CommitPolicy::LastWriterWins),
            "version_checked" => Ok(CommitPolicy::VersionChecked),
            other => Err(AppError::config(format!(
                "Unknown commit policy '{other}', expected last_writer_wins or version_checked"
            ))),
        }
    }
}
