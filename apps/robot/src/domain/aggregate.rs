//! The narrow interface the robot needs from a hand.
//!
//! The robot never looks inside a hand; everything it decides flows through
//! these methods. `BridgeHand` is the production implementation, tests plug
//! in stubs.

use std::fmt::{Debug, Display};

use serde_json::Value as JsonValue;

use crate::domain::state::{Phase, Seat};
use crate::errors::domain::DomainError;

pub trait HandAggregate: Sized + Send + Sync {
    type Bid: Copy + Debug + Display + Send + Sync;
    type Card: Copy + Debug + Display + Send + Sync;

    fn phase(&self) -> Phase;

    /// Seat expected to act next; `None` once nobody can act.
    fn current_turn(&self) -> Option<Seat>;

    /// Cards still held by `seat`, in their natural enumeration order.
    fn holding(&self, seat: Seat) -> Vec<Self::Card>;

    /// Returns the hand after `bid`, or an error leaving `self` untouched.
    fn apply_bid(&self, bid: Self::Bid, turn: Seat) -> Result<Self, DomainError>;

    /// Returns the hand after `card`, or an error leaving `self` untouched.
    fn apply_play(&self, card: Self::Card, turn: Seat) -> Result<Self, DomainError>;

    /// The call that never commits a player to anything.
    fn pass_bid() -> Self::Bid;

    /// Bids made plus cards played.
    fn moves_made(&self) -> usize;

    /// Upper bound on `moves_made` for this hand. Strictly increasing moves
    /// can therefore only happen a finite number of times.
    fn move_budget(&self) -> usize;

    fn to_document(&self) -> Result<JsonValue, DomainError>;

    fn from_document(doc: &JsonValue) -> Result<Self, DomainError>;
}
