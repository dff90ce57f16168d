//! Table repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use serde_json::Value as JsonValue;

use crate::adapters::tables_sea as tables_adapter;
use crate::adapters::tables_sea::{HandUpdate, TableCreate};
use crate::domain::state::PLAYERS;
use crate::entities::tables;
use crate::errors::domain::DomainError;

/// Player labels by seat; `None` for an empty or unusable slot.
pub type Seating = [Option<String>; PLAYERS];

/// A table as the robot sees it.
///
/// The hand stays raw JSON here; it is parsed into an aggregate by whoever
/// needs to reason about it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    pub id: String,
    pub players: Seating,
    pub hand: JsonValue,
    pub version: i32,
}

impl TableRecord {
    pub fn new(id: impl Into<String>, players: Seating, hand: JsonValue) -> Self {
        Self {
            id: id.into(),
            players,
            hand,
            version: 1,
        }
    }

    /// Label seated at `seat`, if any.
    pub fn player(&self, seat: usize) -> Option<&str> {
        self.players.get(seat).and_then(|p| p.as_deref())
    }
}

/// Reads a stored players array into exactly four seats.
///
/// Non-string and empty entries leave the seat empty; missing entries are
/// padded, extra entries are ignored.
pub fn seating_from_json(players: Option<&JsonValue>) -> Seating {
    let mut seating: Seating = Default::default();
    if let Some(JsonValue::Array(items)) = players {
        for (slot, item) in seating.iter_mut().zip(items) {
            *slot = item
                .as_str()
                .filter(|label| !label.is_empty())
                .map(str::to_string);
        }
    }
    seating
}

/// Seating from plain labels; empty strings stay unseated.
pub fn seating_from_labels<S: AsRef<str>>(labels: &[S]) -> Seating {
    let mut seating: Seating = Default::default();
    for (slot, label) in seating.iter_mut().zip(labels) {
        let label = label.as_ref();
        if !label.is_empty() {
            *slot = Some(label.to_string());
        }
    }
    seating
}

impl From<tables::Model> for TableRecord {
    fn from(model: tables::Model) -> Self {
        Self {
            players: seating_from_json(model.players.as_ref()),
            hand: model.hand.unwrap_or(JsonValue::Null),
            id: model.id,
            version: model.version,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: &str,
) -> Result<Option<TableRecord>, DomainError> {
    let table = tables_adapter::find_by_id(conn, table_id).await?;
    Ok(table.map(TableRecord::from))
}

pub async fn create_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TableCreate,
) -> Result<TableRecord, DomainError> {
    let table = tables_adapter::create_table(conn, dto).await?;
    Ok(TableRecord::from(table))
}

/// Writes a new hand document and returns the stored table afterwards.
pub async fn update_hand<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: &str,
    hand: JsonValue,
    expected_version: Option<i32>,
) -> Result<TableRecord, DomainError> {
    let mut dto = HandUpdate::new(table_id, hand);
    if let Some(version) = expected_version {
        dto = dto.with_expected_version(version);
    }
    let table = tables_adapter::update_hand(conn, dto).await?;
    Ok(TableRecord::from(table))
}
