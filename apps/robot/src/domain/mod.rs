//! Domain layer: the hand aggregate and the card/bid types it is built from.

pub mod aggregate;
pub mod bidding;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod hand;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_hand;
#[cfg(test)]
mod tests_props_hand;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use aggregate::HandAggregate;
pub use bidding::{AuctionStatus, Bid, Contract, Doubling};
pub use cards_types::{Card, Rank, Strain, Suit};
pub use dealing::deal;
pub use hand::{BridgeHand, HandDocument};
pub use state::{Phase, Seat, PLAYERS};
