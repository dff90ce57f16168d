/// Property-based tests for the hand aggregate.
use proptest::prelude::*;

use crate::domain::bidding::{auction_status, validate_bid};
use crate::domain::test_gens;
use crate::domain::{deal, AuctionStatus, Bid, BridgeHand, HandAggregate, Phase};
use crate::robot::{synthesize_move, Move};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Pass is legal whenever the auction is still open.
    #[test]
    fn prop_pass_always_legal_while_open((dealer, bids) in test_gens::auction()) {
        if auction_status(dealer, &bids) == AuctionStatus::Open {
            prop_assert!(validate_bid(dealer, &bids, Bid::Pass).is_ok());
        }
    }

    /// Whatever was bid before, a robot seat on turn in an open auction passes.
    #[test]
    fn prop_robot_passes_after_any_bidding_history(
        (dealer, bids) in test_gens::auction(),
        seed in any::<u64>(),
    ) {
        let mut hand = BridgeHand::new(dealer, deal(seed)).unwrap();
        let mut history = bids.into_iter();
        while hand.phase() == Phase::Bidding {
            let turn = hand.current_turn().unwrap();
            let synthesized = synthesize_move(&hand, turn).unwrap();
            prop_assert_eq!(synthesized.mv, Move::Bid(Bid::Pass));
            prop_assert_eq!(synthesized.hand.bids().last(), Some(&Bid::Pass));
            match history.next() {
                Some(bid) => hand = hand.apply_bid(bid, turn).unwrap(),
                None => break,
            }
        }
    }

    /// Any legal auction replays from its stored document to the same hand.
    #[test]
    fn prop_legal_auctions_reload_identically(
        (dealer, bids) in test_gens::auction(),
        seed in any::<u64>(),
    ) {
        let mut hand = BridgeHand::new(dealer, deal(seed)).unwrap();
        for bid in bids {
            let turn = hand.current_turn().unwrap();
            hand = hand.apply_bid(bid, turn).unwrap();
        }
        let reloaded = BridgeHand::from_document(&hand.to_document().unwrap()).unwrap();
        prop_assert_eq!(reloaded, hand);
    }

    /// First-fit play from any reachable position advances one move at a time
    /// and finishes inside the move budget.
    #[test]
    fn prop_first_fit_play_terminates_within_budget(
        seed in any::<u64>(),
        dealer in test_gens::seat(),
        strain in test_gens::strain(),
    ) {
        let mut hand = BridgeHand::new(dealer, deal(seed)).unwrap();
        let opener = hand.current_turn().unwrap();
        hand = hand.apply_bid(Bid::Call { level: 1, strain }, opener).unwrap();

        let budget = hand.move_budget();
        while let Some(seat) = hand.current_turn() {
            let before = hand.moves_made();
            let next = match hand.phase() {
                Phase::Bidding => hand.apply_bid(Bid::Pass, seat).ok(),
                _ => hand.holding(seat).into_iter().find_map(|c| hand.apply_play(c, seat).ok()),
            };
            let next = next.ok_or_else(|| {
                TestCaseError::fail(format!("no legal move for seat {seat}"))
            })?;
            prop_assert_eq!(next.moves_made(), before + 1);
            prop_assert!(next.moves_made() <= budget);
            hand = next;
        }
        prop_assert_eq!(hand.phase(), Phase::Terminal);
        prop_assert_eq!(hand.moves_made(), 4 + 52);
    }

    #[test]
    fn prop_cards_round_trip_through_text(card in test_gens::card()) {
        prop_assert_eq!(card.to_string().parse::<crate::domain::Card>().unwrap(), card);
    }
}
