//! DTOs for tables_sea adapter.

use serde_json::Value as JsonValue;

/// DTO for creating a table (seeding and tests).
#[derive(Debug, Clone)]
pub struct TableCreate {
    pub id: String,
    pub players: Vec<String>,
    pub hand: Option<JsonValue>,
}

impl TableCreate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            players: Vec::new(),
            hand: None,
        }
    }

    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players = players.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hand(mut self, hand: JsonValue) -> Self {
        self.hand = Some(hand);
        self
    }
}

/// Partial update of the `hand` column.
///
/// `expected_version: None` writes unconditionally; `Some(v)` writes only if
/// the stored version is still `v`.
#[derive(Debug, Clone)]
pub struct HandUpdate {
    pub id: String,
    pub hand: JsonValue,
    pub expected_version: Option<i32>,
}

impl HandUpdate {
    pub fn new(id: impl Into<String>, hand: JsonValue) -> Self {
        Self {
            id: id.into(),
            hand,
            expected_version: None,
        }
    }

    pub fn with_expected_version(mut self, version: i32) -> Self {
        self.expected_version = Some(version);
        self
    }
}
