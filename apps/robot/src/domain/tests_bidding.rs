use crate::domain::bidding::{auction_status, bidder_at, legal_bids, validate_bid};
use crate::domain::{AuctionStatus, Bid, Doubling, Strain};
use crate::errors::domain::{DomainError, ValidationKind};

fn bids(tokens: &[&str]) -> Vec<Bid> {
    tokens.iter().map(|t| t.parse().unwrap()).collect()
}

#[test]
fn four_passes_pass_the_hand_out() {
    assert_eq!(auction_status(0, &bids(&["P", "P", "P"])), AuctionStatus::Open);
    assert_eq!(
        auction_status(0, &bids(&["P", "P", "P", "P"])),
        AuctionStatus::PassedOut
    );
}

#[test]
fn three_passes_after_a_call_close_the_auction() {
    let AuctionStatus::Closed(contract) = auction_status(0, &bids(&["1C", "P", "P", "P"])) else {
        panic!("auction should be closed");
    };
    assert_eq!(contract.level, 1);
    assert_eq!(contract.strain, Strain::Clubs);
    assert_eq!(contract.declarer, bidder_at(0, 0));
    assert_eq!(contract.doubling, Doubling::Undoubled);
}

#[test]
fn passes_before_the_opening_call_do_not_close() {
    assert_eq!(
        auction_status(1, &bids(&["P", "P", "P", "1S"])),
        AuctionStatus::Open
    );
}

#[test]
fn declarer_is_first_of_the_side_to_name_the_strain() {
    // Dealer 3: seat 0 opens 1H, partner (seat 2) raises to 2H.
    let AuctionStatus::Closed(contract) =
        auction_status(3, &bids(&["1H", "P", "2H", "P", "P", "P"]))
    else {
        panic!("auction should be closed");
    };
    assert_eq!(contract.level, 2);
    assert_eq!(contract.declarer, 0);
}

#[test]
fn calls_must_outrank_the_previous_call() {
    let history = bids(&["1N"]);
    let err = validate_bid(0, &history, "1S".parse().unwrap()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidBid, _)
    ));
    assert!(validate_bid(0, &history, "2C".parse().unwrap()).is_ok());
    assert!(validate_bid(0, &history, "1N".parse().unwrap()).is_err());
}

#[test]
fn level_outside_one_to_seven_is_rejected() {
    let bid = Bid::Call {
        level: 8,
        strain: Strain::Clubs,
    };
    assert!(matches!(
        validate_bid(0, &[], bid),
        Err(DomainError::Validation(ValidationKind::InvalidBid, _))
    ));
}

#[test]
fn doubles_only_against_opponents() {
    // Dealer 0: seat 1 opens, seat 2 may double, seat 3 (partner of 1) may not.
    let after_open = bids(&["1D"]);
    assert!(validate_bid(0, &after_open, Bid::Double).is_ok());

    let after_pass = bids(&["1D", "P"]);
    assert!(validate_bid(0, &after_pass, Bid::Double).is_err());

    assert!(validate_bid(0, &[], Bid::Double).is_err());
}

#[test]
fn redouble_only_by_the_doubled_side() {
    let doubled = bids(&["1D", "X"]);
    assert!(validate_bid(0, &doubled, Bid::Redouble).is_ok());
    assert!(validate_bid(0, &doubled, Bid::Double).is_err());

    let doubled_then_pass = bids(&["1D", "X", "P"]);
    assert!(validate_bid(0, &doubled_then_pass, Bid::Redouble).is_err());
}

#[test]
fn doubling_is_carried_into_the_contract() {
    let AuctionStatus::Closed(contract) =
        auction_status(0, &bids(&["1C", "X", "XX", "P", "P", "P"]))
    else {
        panic!("auction should be closed");
    };
    assert_eq!(contract.doubling, Doubling::Redoubled);
}

#[test]
fn no_bids_after_the_auction_closes() {
    let closed = bids(&["P", "P", "P", "P"]);
    assert!(matches!(
        validate_bid(0, &closed, Bid::Pass),
        Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
    ));
    assert!(legal_bids(0, &closed).is_empty());
}

#[test]
fn opening_legal_bids_are_pass_and_all_calls() {
    let options = legal_bids(0, &[]);
    assert_eq!(options.len(), 1 + 35);
    assert_eq!(options[0], Bid::Pass);
}

#[test]
fn bid_tokens_round_trip_through_display() {
    for token in ["P", "X", "XX", "1C", "3H", "7N"] {
        assert_eq!(token.parse::<Bid>().unwrap().to_string(), token);
    }
    for bad in ["", "0C", "8S", "1Z", "PP", "1NT"] {
        assert!(bad.parse::<Bid>().is_err(), "{bad} should not parse");
    }
}
