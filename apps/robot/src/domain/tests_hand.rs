use serde_json::json;

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::{Bid, BridgeHand, Card, HandAggregate, Phase, Seat, Strain, PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

/// Three cards a seat. Seat 1 holds [7S, 2H, 9S], so after a heart lead
/// only 2H is playable for it.
fn small_deal() -> [Vec<Card>; PLAYERS] {
    [
        try_parse_cards(["AH", "KS", "QD"]).unwrap(),
        try_parse_cards(["7S", "2H", "9S"]).unwrap(),
        try_parse_cards(["3C", "4C", "5C"]).unwrap(),
        try_parse_cards(["6D", "7D", "8D"]).unwrap(),
    ]
}

fn bid(token: &str) -> Bid {
    token.parse().unwrap()
}

fn card(token: &str) -> Card {
    token.parse().unwrap()
}

/// Dealer 2, seat 3 opens 1NT and everyone passes: seat 3 declares, seat 0 leads.
fn hand_in_play() -> BridgeHand {
    let mut hand = BridgeHand::new(2, small_deal()).unwrap();
    for (seat, token) in [(3, "1N"), (0, "P"), (1, "P"), (2, "P")] {
        hand = hand.apply_bid(bid(token), seat).unwrap();
    }
    hand
}

#[test]
fn new_hand_starts_bidding_left_of_dealer() {
    let hand = BridgeHand::new(2, small_deal()).unwrap();
    assert_eq!(hand.phase(), Phase::Bidding);
    assert_eq!(hand.current_turn(), Some(3));
    assert_eq!(hand.moves_made(), 0);
}

#[test]
fn four_passes_end_the_hand() {
    let mut hand = BridgeHand::new(0, small_deal()).unwrap();
    for seat in [1, 2, 3, 0] {
        hand = hand.apply_bid(Bid::Pass, seat).unwrap();
    }
    assert_eq!(hand.phase(), Phase::Terminal);
    assert_eq!(hand.current_turn(), None);
    assert_eq!(hand.moves_made(), 4);
}

#[test]
fn out_of_turn_bid_is_rejected_without_mutation() {
    let hand = BridgeHand::new(0, small_deal()).unwrap();
    let before = hand.clone();
    let err = hand.apply_bid(Bid::Pass, 2).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::OutOfTurn, _)
    ));
    assert_eq!(hand, before);
}

#[test]
fn closed_auction_moves_to_play_with_lead_left_of_declarer() {
    let hand = hand_in_play();
    assert_eq!(hand.phase(), Phase::Playing);
    let contract = hand.contract().unwrap();
    assert_eq!(contract.strain, Strain::NoTrump);
    assert_eq!(contract.declarer, 3);
    assert_eq!(hand.current_turn(), Some(0));
}

#[test]
fn bids_are_refused_once_play_starts() {
    let hand = hand_in_play();
    assert!(matches!(
        hand.apply_bid(Bid::Pass, 0),
        Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
    ));
}

#[test]
fn follow_suit_is_enforced_on_play() {
    let hand = hand_in_play().apply_play(card("AH"), 0).unwrap();
    assert_eq!(hand.current_turn(), Some(1));
    assert_eq!(hand.holding(1), vec![card("7S"), card("2H"), card("9S")]);

    assert!(matches!(
        hand.apply_play(card("7S"), 1),
        Err(DomainError::Validation(ValidationKind::MustFollowSuit, _))
    ));
    assert!(matches!(
        hand.apply_play(card("AS"), 1),
        Err(DomainError::Validation(ValidationKind::CardNotInHand, _))
    ));
    let after = hand.apply_play(card("2H"), 1).unwrap();
    assert_eq!(after.holding(1), vec![card("7S"), card("9S")]);
}

#[test]
fn trick_winner_leads_next_and_hand_terminates() {
    let mut hand = hand_in_play();
    let mut moves = hand.moves_made();
    while let Some(seat) = hand.current_turn() {
        let holding = hand.holding(seat);
        let next = holding
            .iter()
            .find_map(|c| hand.apply_play(*c, seat).ok())
            .expect("some card is always playable");
        assert_eq!(next.moves_made(), moves + 1);
        moves += 1;
        hand = next;
    }
    assert_eq!(hand.phase(), Phase::Terminal);
    assert_eq!(hand.plays().len(), 12);
    let tricks: u8 = (0..4).map(|s: Seat| hand.tricks_won(s)).sum();
    assert_eq!(tricks, 3);
    // AH wins the first trick at no-trump, so seat 0 leads the second.
    assert!(hand.tricks_won(0) >= 1);
}

#[test]
fn document_round_trip_is_lossless() {
    let hand = hand_in_play().apply_play(card("AH"), 0).unwrap();
    let doc = hand.to_document().unwrap();
    assert_eq!(doc["dealer"], json!(2));
    assert_eq!(doc["bids"], json!(["1N", "P", "P", "P"]));
    assert_eq!(doc["plays"], json!(["AH"]));

    let back = BridgeHand::from_document(&doc).unwrap();
    assert_eq!(back, hand);
    assert_eq!(back.to_document().unwrap(), doc);
}

#[test]
fn empty_or_null_document_is_a_terminal_hand() {
    for doc in [json!({}), serde_json::Value::Null] {
        let hand = BridgeHand::from_document(&doc).unwrap();
        assert_eq!(hand.phase(), Phase::Terminal);
        assert_eq!(hand.current_turn(), None);
        assert!(hand.holding(0).is_empty());
    }
}

#[test]
fn corrupt_documents_are_reported_as_such() {
    let duplicated = json!({
        "dealer": 0,
        "deal": [["AS"], ["AS"], ["2C"], ["3C"]],
    });
    let illegal_history = json!({
        "dealer": 0,
        "deal": [["AS"], ["KS"], ["2C"], ["3C"]],
        "bids": ["1C", "1C"],
    });
    let bad_token = json!({
        "dealer": 0,
        "deal": [["AS"], ["KS"], ["2C"], ["ZZ"]],
    });
    let moves_without_deal = json!({ "bids": ["P"] });

    for doc in [duplicated, illegal_history, bad_token, moves_without_deal] {
        let err = BridgeHand::from_document(&doc).unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(ValidationKind::HandCorrupt, _)),
            "{doc} should be corrupt, got {err:?}"
        );
    }
}

#[test]
fn move_budget_covers_the_longest_auction_and_every_card() {
    let hand = BridgeHand::new(0, small_deal()).unwrap();
    assert_eq!(hand.move_budget(), 319 + 12);
}
