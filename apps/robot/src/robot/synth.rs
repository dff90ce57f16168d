use std::fmt::{Display, Formatter, Result as FmtResult};

use tracing::{debug, warn};

use crate::domain::{HandAggregate, Phase, Seat};

/// A move the robot made on behalf of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move<B, C> {
    Bid(B),
    Play(C),
}

impl<B: Display, C: Display> Display for Move<B, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Move::Bid(bid) => write!(f, "bid {bid}"),
            Move::Play(card) => write!(f, "play {card}"),
        }
    }
}

pub type HandMove<H> = Move<<H as HandAggregate>::Bid, <H as HandAggregate>::Card>;

/// The hand after the robot's move, and the move itself.
#[derive(Debug)]
pub struct Synthesized<H: HandAggregate> {
    pub hand: H,
    pub mv: HandMove<H>,
}

/// Proposes a move for `seat`, or `None` when nothing is accepted.
///
/// Bidding always passes. Playing tries the holding in order and keeps the
/// first card the hand accepts. Rejections are expected and never surface.
pub fn synthesize_move<H: HandAggregate>(hand: &H, seat: Seat) -> Option<Synthesized<H>> {
    let synthesized = match hand.phase() {
        Phase::Bidding => pass(hand, seat),
        Phase::Playing => first_fit(hand, seat),
        Phase::Terminal => {
            warn!(seat, "Terminal hand still reports a turn");
            return None;
        }
    };

    if synthesized.is_none() {
        warn!(seat, phase = ?hand.phase(), "No move produced for robot seat");
    }
    synthesized
}

fn pass<H: HandAggregate>(hand: &H, seat: Seat) -> Option<Synthesized<H>> {
    let bid = H::pass_bid();
    match hand.apply_bid(bid, seat) {
        Ok(next) => Some(Synthesized {
            hand: next,
            mv: Move::Bid(bid),
        }),
        Err(err) => {
            debug!(seat, %bid, error = %err, "Pass rejected");
            None
        }
    }
}

fn first_fit<H: HandAggregate>(hand: &H, seat: Seat) -> Option<Synthesized<H>> {
    for card in hand.holding(seat) {
        match hand.apply_play(card, seat) {
            Ok(next) => {
                return Some(Synthesized {
                    hand: next,
                    mv: Move::Play(card),
                })
            }
            Err(err) => debug!(seat, %card, error = %err, "Card rejected"),
        }
    }
    None
}
