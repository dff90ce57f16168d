//! Auction rules: call ranking, doubles, and when the auction closes.

use std::fmt;
use std::str::FromStr;

use crate::domain::state::{nth_from, same_side, Seat};
use crate::domain::Strain;
use crate::errors::domain::{DomainError, ValidationKind};

/// Longest legal auction: three passes, then every call from 1C to 7NT each
/// followed by pass, pass, double, pass, pass, redouble, pass, pass, and the
/// closing three passes.
pub const MAX_AUCTION_LEN: usize = 319;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Bid {
    Pass,
    Double,
    Redouble,
    Call { level: u8, strain: Strain },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Doubling {
    Undoubled,
    Doubled,
    Redoubled,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub declarer: Seat,
    pub doubling: Doubling,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AuctionStatus {
    Open,
    PassedOut,
    Closed(Contract),
}

/// Seat that made the `index`-th call. The auction starts left of the dealer.
#[inline]
pub fn bidder_at(dealer: Seat, index: usize) -> Seat {
    nth_from(dealer, index + 1)
}

pub fn auction_status(dealer: Seat, bids: &[Bid]) -> AuctionStatus {
    let Some(last_call) = bids.iter().rposition(|b| matches!(b, Bid::Call { .. })) else {
        return if bids.len() >= 4 {
            AuctionStatus::PassedOut
        } else {
            AuctionStatus::Open
        };
    };

    let trailing_passes = bids.len() - 1 - last_call_or_double(bids);
    if trailing_passes < 3 {
        return AuctionStatus::Open;
    }

    let Bid::Call { level, strain } = bids[last_call] else {
        return AuctionStatus::Open;
    };

    let doubling = bids[last_call + 1..]
        .iter()
        .fold(Doubling::Undoubled, |acc, b| match b {
            Bid::Double => Doubling::Doubled,
            Bid::Redouble => Doubling::Redoubled,
            _ => acc,
        });

    let side = bidder_at(dealer, last_call);
    let declarer = bids
        .iter()
        .enumerate()
        .find(|(i, b)| {
            matches!(b, Bid::Call { strain: s, .. } if *s == strain)
                && same_side(bidder_at(dealer, *i), side)
        })
        .map(|(i, _)| bidder_at(dealer, i))
        .unwrap_or(side);

    AuctionStatus::Closed(Contract {
        level,
        strain,
        declarer,
        doubling,
    })
}

fn last_call_or_double(bids: &[Bid]) -> usize {
    bids.iter().rposition(|b| *b != Bid::Pass).unwrap_or(0)
}

/// Check `bid` against the auction so far, for the seat whose turn it is.
pub fn validate_bid(dealer: Seat, bids: &[Bid], bid: Bid) -> Result<(), DomainError> {
    if auction_status(dealer, bids) != AuctionStatus::Open {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Auction is closed",
        ));
    }

    let who = bidder_at(dealer, bids.len());
    let last_action = bids
        .iter()
        .enumerate()
        .rev()
        .find(|(_, b)| **b != Bid::Pass)
        .map(|(i, b)| (bidder_at(dealer, i), *b));

    match bid {
        Bid::Pass => Ok(()),
        Bid::Call { level, strain } => {
            if !(1..=7).contains(&level) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    format!("Level {level} outside 1..=7"),
                ));
            }
            let last_call = bids.iter().rev().find_map(|b| match b {
                Bid::Call { level, strain } => Some((*level, *strain)),
                _ => None,
            });
            match last_call {
                Some(prev) if (level, strain) <= prev => Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    format!("{bid} does not outrank {}", Bid::Call { level: prev.0, strain: prev.1 }),
                )),
                _ => Ok(()),
            }
        }
        Bid::Double => match last_action {
            Some((by, Bid::Call { .. })) if !same_side(by, who) => Ok(()),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidBid,
                "Double needs an undoubled opposing call",
            )),
        },
        Bid::Redouble => match last_action {
            Some((by, Bid::Double)) if !same_side(by, who) => Ok(()),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidBid,
                "Redouble needs an opposing double",
            )),
        },
    }
}

/// All calls the next bidder may make, cheapest first.
pub fn legal_bids(dealer: Seat, bids: &[Bid]) -> Vec<Bid> {
    let mut candidates = vec![Bid::Pass, Bid::Double, Bid::Redouble];
    for level in 1..=7 {
        for strain in [
            Strain::Clubs,
            Strain::Diamonds,
            Strain::Hearts,
            Strain::Spades,
            Strain::NoTrump,
        ] {
            candidates.push(Bid::Call { level, strain });
        }
    }
    candidates
        .into_iter()
        .filter(|b| validate_bid(dealer, bids, *b).is_ok())
        .collect()
}

fn strain_char(strain: Strain) -> char {
    match strain {
        Strain::Clubs => 'C',
        Strain::Diamonds => 'D',
        Strain::Hearts => 'H',
        Strain::Spades => 'S',
        Strain::NoTrump => 'N',
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bid::Pass => write!(f, "P"),
            Bid::Double => write!(f, "X"),
            Bid::Redouble => write!(f, "XX"),
            Bid::Call { level, strain } => write!(f, "{level}{}", strain_char(*strain)),
        }
    }
}

impl FromStr for Bid {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DomainError::validation(ValidationKind::ParseBid, format!("Parse bid: {s}"));
        match s {
            "P" => return Ok(Bid::Pass),
            "X" => return Ok(Bid::Double),
            "XX" => return Ok(Bid::Redouble),
            _ => {}
        }
        let mut chars = s.chars();
        let (Some(level_ch), Some(strain_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(err());
        };
        let level = level_ch
            .to_digit(10)
            .filter(|d| (1..=7).contains(d))
            .ok_or_else(err)? as u8;
        let strain = match strain_ch {
            'C' => Strain::Clubs,
            'D' => Strain::Diamonds,
            'H' => Strain::Hearts,
            'S' => Strain::Spades,
            'N' => Strain::NoTrump,
            _ => return Err(err()),
        };
        Ok(Bid::Call { level, strain })
    }
}
