//! `BridgeHand`: the persisted hand aggregate.
//!
//! The stored document keeps only the deal and the move history. Everything
//! else (phase, turn, holdings, tricks) is replayed from it, so a document
//! that loads is always internally consistent.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::aggregate::HandAggregate;
use crate::domain::bidding::{self, AuctionStatus, Bid, Contract, MAX_AUCTION_LEN};
use crate::domain::state::{next_seat, Phase, Seat, PLAYERS};
use crate::domain::tricks::{legal_plays, trick_winner};
use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Canonical stored form of a hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandDocument {
    pub dealer: Seat,
    pub deal: [Vec<Card>; PLAYERS],
    pub bids: Vec<Bid>,
    pub plays: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeHand {
    doc: HandDocument,
    phase: Phase,
    turn: Option<Seat>,
    contract: Option<Contract>,
    holdings: [Vec<Card>; PLAYERS],
    trick: Vec<(Seat, Card)>,
    tricks_won: [u8; PLAYERS],
}

impl BridgeHand {
    /// Fresh hand with nothing bid or played.
    pub fn new(dealer: Seat, deal: [Vec<Card>; PLAYERS]) -> Result<Self, DomainError> {
        Self::replay(HandDocument {
            dealer,
            deal,
            bids: Vec::new(),
            plays: Vec::new(),
        })
    }

    pub fn bids(&self) -> &[Bid] {
        &self.doc.bids
    }

    pub fn plays(&self) -> &[Card] {
        &self.doc.plays
    }

    pub fn contract(&self) -> Option<Contract> {
        self.contract
    }

    pub fn tricks_won(&self, seat: Seat) -> u8 {
        self.tricks_won[seat as usize % PLAYERS]
    }

    /// Rebuild all derived state from a document, validating every move.
    fn replay(doc: HandDocument) -> Result<Self, DomainError> {
        if doc.dealer as usize >= PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidSeat,
                format!("Dealer seat {} outside 0..{PLAYERS}", doc.dealer),
            ));
        }
        validate_deal(&doc.deal)?;

        let mut hand = BridgeHand {
            holdings: doc.deal.clone(),
            doc: HandDocument {
                bids: Vec::with_capacity(doc.bids.len()),
                plays: Vec::with_capacity(doc.plays.len()),
                ..doc.clone()
            },
            phase: Phase::Terminal,
            turn: None,
            contract: None,
            trick: Vec::with_capacity(PLAYERS),
            tricks_won: [0; PLAYERS],
        };

        if hand.holdings.iter().all(Vec::is_empty) {
            if !doc.bids.is_empty() || !doc.plays.is_empty() {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    "Moves recorded on a hand with no deal",
                ));
            }
            return Ok(hand);
        }

        hand.settle_auction();
        for bid in doc.bids {
            hand.push_bid(bid)?;
        }
        for card in doc.plays {
            hand.push_play(card)?;
        }
        Ok(hand)
    }

    fn settle_auction(&mut self) {
        match bidding::auction_status(self.doc.dealer, &self.doc.bids) {
            AuctionStatus::Open => {
                self.phase = Phase::Bidding;
                self.turn = Some(bidding::bidder_at(self.doc.dealer, self.doc.bids.len()));
            }
            AuctionStatus::PassedOut => {
                self.phase = Phase::Terminal;
                self.turn = None;
            }
            AuctionStatus::Closed(contract) => {
                self.contract = Some(contract);
                self.phase = Phase::Playing;
                self.turn = Some(next_seat(contract.declarer));
            }
        }
    }

    fn require_turn(&self, phase: Phase, who: Seat) -> Result<(), DomainError> {
        if self.phase != phase {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Expected {phase:?}, hand is {:?}", self.phase),
            ));
        }
        if self.turn != Some(who) {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("Seat {who} acted out of turn"),
            ));
        }
        Ok(())
    }

    fn push_bid(&mut self, bid: Bid) -> Result<(), DomainError> {
        let who = self.turn.unwrap_or(self.doc.dealer);
        self.require_turn(Phase::Bidding, who)?;
        bidding::validate_bid(self.doc.dealer, &self.doc.bids, bid)?;
        self.doc.bids.push(bid);
        self.settle_auction();
        Ok(())
    }

    fn push_play(&mut self, card: Card) -> Result<(), DomainError> {
        let who = self.turn.unwrap_or(self.doc.dealer);
        self.require_turn(Phase::Playing, who)?;

        let holding = &self.holdings[who as usize];
        let Some(pos) = holding.iter().position(|&c| c == card) else {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("{card} not held by seat {who}"),
            ));
        };
        let lead = self.trick.first().map(|(_, c)| c.suit);
        if !legal_plays(holding, lead).contains(&card) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("Seat {who} must follow suit"),
            ));
        }

        self.holdings[who as usize].remove(pos);
        self.doc.plays.push(card);
        self.trick.push((who, card));

        if self.trick.len() < PLAYERS {
            self.turn = Some(next_seat(who));
            return Ok(());
        }

        let trump = self.contract.and_then(|c| c.strain.trump_suit());
        let winner = trick_winner(&self.trick, trump).unwrap_or(who);
        self.tricks_won[winner as usize] += 1;
        self.trick.clear();

        if self.holdings.iter().all(Vec::is_empty) {
            self.phase = Phase::Terminal;
            self.turn = None;
        } else {
            self.turn = Some(winner);
        }
        Ok(())
    }
}

fn validate_deal(deal: &[Vec<Card>; PLAYERS]) -> Result<(), DomainError> {
    let size = deal[0].len();
    if deal.iter().any(|h| h.len() != size) {
        return Err(DomainError::validation_other(
            "Every seat must be dealt the same number of cards",
        ));
    }
    let mut seen = std::collections::HashSet::with_capacity(size * PLAYERS);
    for card in deal.iter().flatten() {
        if !seen.insert(*card) {
            return Err(DomainError::validation_other(format!(
                "{card} dealt more than once"
            )));
        }
    }
    Ok(())
}

impl HandAggregate for BridgeHand {
    type Bid = Bid;
    type Card = Card;

    fn phase(&self) -> Phase {
        self.phase
    }

    fn current_turn(&self) -> Option<Seat> {
        self.turn
    }

    fn holding(&self, seat: Seat) -> Vec<Card> {
        self.holdings
            .get(seat as usize)
            .cloned()
            .unwrap_or_default()
    }

    fn apply_bid(&self, bid: Bid, turn: Seat) -> Result<Self, DomainError> {
        self.require_turn(Phase::Bidding, turn)?;
        let mut next = self.clone();
        next.push_bid(bid)?;
        Ok(next)
    }

    fn apply_play(&self, card: Card, turn: Seat) -> Result<Self, DomainError> {
        self.require_turn(Phase::Playing, turn)?;
        let mut next = self.clone();
        next.push_play(card)?;
        Ok(next)
    }

    fn pass_bid() -> Bid {
        Bid::Pass
    }

    fn moves_made(&self) -> usize {
        self.doc.bids.len() + self.doc.plays.len()
    }

    fn move_budget(&self) -> usize {
        MAX_AUCTION_LEN + self.doc.deal.iter().map(Vec::len).sum::<usize>()
    }

    fn to_document(&self) -> Result<JsonValue, DomainError> {
        serde_json::to_value(&self.doc).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("hand serialization failed: {e}"),
            )
        })
    }

    fn from_document(doc: &JsonValue) -> Result<Self, DomainError> {
        let parsed = if doc.is_null() {
            HandDocument::default()
        } else {
            HandDocument::deserialize(doc).map_err(|e| {
                DomainError::validation(ValidationKind::HandCorrupt, format!("hand document: {e}"))
            })?
        };
        Self::replay(parsed).map_err(|e| match e {
            DomainError::Validation(_, detail) => DomainError::validation(
                ValidationKind::HandCorrupt,
                format!("hand document replay: {detail}"),
            ),
            other => other,
        })
    }
}
