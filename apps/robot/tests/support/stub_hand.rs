//! A hand aggregate with scripted behavior, for exercising the robot without
//! bridge rules.

use robot::domain::{HandAggregate, Phase, Seat};
use robot::errors::domain::{DomainError, ValidationKind};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Every move is rejected.
    Reject,
    /// Every move is accepted but changes nothing.
    Stall,
    /// Every move is accepted and counted; the turn never ends.
    Advance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StubHand {
    pub playing: bool,
    pub turn: Option<Seat>,
    pub holding: Vec<u8>,
    pub behavior: Behavior,
    pub moves: usize,
    pub budget: usize,
}

impl StubHand {
    pub fn document(behavior: Behavior, playing: bool) -> Value {
        json!({
            "playing": playing,
            "turn": 0,
            "holding": [1, 2, 3],
            "behavior": behavior,
            "moves": 0,
            "budget": 2,
        })
    }

    fn apply(&self) -> Result<Self, DomainError> {
        match self.behavior {
            Behavior::Reject => Err(DomainError::validation(
                ValidationKind::InvalidBid,
                "stub rejects everything",
            )),
            Behavior::Stall => Ok(self.clone()),
            Behavior::Advance => Ok(Self {
                moves: self.moves + 1,
                ..self.clone()
            }),
        }
    }
}

impl HandAggregate for StubHand {
    type Bid = u8;
    type Card = u8;

    fn phase(&self) -> Phase {
        if self.playing {
            Phase::Playing
        } else {
            Phase::Bidding
        }
    }

    fn current_turn(&self) -> Option<Seat> {
        self.turn
    }

    fn holding(&self, _seat: Seat) -> Vec<u8> {
        self.holding.clone()
    }

    fn apply_bid(&self, _bid: u8, _turn: Seat) -> Result<Self, DomainError> {
        self.apply()
    }

    fn apply_play(&self, _card: u8, _turn: Seat) -> Result<Self, DomainError> {
        self.apply()
    }

    fn pass_bid() -> u8 {
        0
    }

    fn moves_made(&self) -> usize {
        self.moves
    }

    fn move_budget(&self) -> usize {
        self.budget
    }

    fn to_document(&self) -> Result<Value, DomainError> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::validation(ValidationKind::HandCorrupt, e.to_string()))
    }

    fn from_document(doc: &Value) -> Result<Self, DomainError> {
        serde_json::from_value(doc.clone())
            .map_err(|e| DomainError::validation(ValidationKind::HandCorrupt, e.to_string()))
    }
}
