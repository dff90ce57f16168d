// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::bidding::{legal_bids, AuctionStatus};
use crate::domain::{bidding, Bid, Card, Rank, Seat, Strain, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    (0usize..13).prop_map(|i| Rank::ALL[i])
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

pub fn strain() -> impl Strategy<Value = Strain> {
    prop_oneof![
        Just(Strain::Clubs),
        Just(Strain::Diamonds),
        Just(Strain::Hearts),
        Just(Strain::Spades),
        Just(Strain::NoTrump),
    ]
}

pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..4
}

/// A legal auction prefix built by repeatedly picking from the legal calls.
/// `choices` drives the picks; the auction stops early if it closes.
pub fn auction() -> impl Strategy<Value = (Seat, Vec<Bid>)> {
    (seat(), prop::collection::vec(any::<prop::sample::Index>(), 0..24)).prop_map(
        |(dealer, choices)| {
            let mut bids = Vec::new();
            for choice in choices {
                if bidding::auction_status(dealer, &bids) != AuctionStatus::Open {
                    break;
                }
                let options = legal_bids(dealer, &bids);
                bids.push(*choice.get(&options));
            }
            (dealer, bids)
        },
    )
}
