//! Seeded dealing, used to set up fresh hands for tables and tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::state::PLAYERS;
use crate::domain::{Card, Rank, Suit};

/// Full 52-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Shuffle a deck with `seed` and deal thirteen cards to each seat.
///
/// Each hand is sorted so holdings enumerate in a stable order.
pub fn deal(seed: u64) -> [Vec<Card>; PLAYERS] {
    let mut deck = full_deck();
    let mut rng = StdRng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (i, card) in deck.into_iter().enumerate() {
        hands[i % PLAYERS].push(card);
    }
    for hand in hands.iter_mut() {
        hand.sort();
    }
    hands
}
