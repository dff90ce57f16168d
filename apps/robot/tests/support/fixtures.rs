//! Table and hand builders shared by the integration tests.

use std::sync::Arc;

use robot::domain::{deal, BridgeHand, HandAggregate};
use robot::repos::tables::{seating_from_labels, Seating};
use robot::robot::ROBOT_PLAYER;
use robot::store::MemoryTableStore;
use serde_json::{json, Value};

pub const TABLE: &str = "table-1";

pub fn robots() -> Seating {
    seating_from_labels(&[ROBOT_PLAYER; 4])
}

pub fn seats(labels: [&str; 4]) -> Seating {
    seating_from_labels(&labels)
}

/// A full 52-card deal with nothing bid yet.
pub fn fresh_hand(dealer: u8, seed: u64) -> Value {
    BridgeHand::new(dealer, deal(seed))
        .and_then(|hand| hand.to_document())
        .expect("fresh hand")
}

/// A full deal where seat 3 opened 1NT and everyone passed, so seat 0 leads.
pub fn contract_reached(seed: u64) -> Value {
    let mut doc = fresh_hand(2, seed);
    doc["bids"] = json!(["1N", "P", "P", "P"]);
    doc
}

/// Seat 0 led the ace of hearts; seat 1 holds 7S 2H 9S and must follow.
pub fn must_follow_hearts() -> Value {
    json!({
        "dealer": 2,
        "deal": [["AH", "3C", "4C"], ["7S", "2H", "9S"], ["KD", "5C", "6C"], ["QD", "8C", "TC"]],
        "bids": ["1N", "P", "P", "P"],
        "plays": ["AH"],
    })
}

pub fn store_with(players: Seating, hand: Value) -> Arc<MemoryTableStore> {
    let store = MemoryTableStore::new();
    store.insert(TABLE, players, hand);
    Arc::new(store)
}

pub fn stored_hand(store: &MemoryTableStore) -> BridgeHand {
    let table = store.table(TABLE).expect("table exists");
    BridgeHand::from_document(&table.hand).expect("stored hand parses")
}
