//! Trick-play rules: following suit and deciding who won a trick.

use crate::domain::state::Seat;
use crate::domain::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Cards from `holding` that may be played, in holding order.
pub fn legal_plays(holding: &[Card], lead: Option<Suit>) -> Vec<Card> {
    match lead {
        Some(lead) if hand_has_suit(holding, lead) => {
            holding.iter().copied().filter(|c| c.suit == lead).collect()
        }
        _ => holding.to_vec(),
    }
}

/// True if `a` beats `b` in a trick led with `lead`.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Option<Suit>) -> bool {
    if let Some(trump) = trump {
        let a_trump = a.suit == trump;
        let b_trump = b.suit == trump;
        if a_trump != b_trump {
            return a_trump;
        }
        if a_trump && b_trump {
            return a.rank > b.rank;
        }
    }
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows != b_follows {
        return a_follows;
    }
    a_follows && b_follows && a.rank > b.rank
}

/// Winner of a trick given its plays in order. `None` for an empty trick.
pub fn trick_winner(plays: &[(Seat, Card)], trump: Option<Suit>) -> Option<Seat> {
    let (_, lead_card) = plays.first()?;
    let lead = lead_card.suit;
    plays
        .iter()
        .copied()
        .reduce(|best, next| {
            if card_beats(next.1, best.1, lead, trump) {
                next
            } else {
                best
            }
        })
        .map(|(seat, _)| seat)
}
