use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::tricks::{card_beats, legal_plays, trick_winner};
use crate::domain::{Card, Suit};

fn card(token: &str) -> Card {
    token.parse().unwrap()
}

#[test]
fn must_follow_the_led_suit_in_holding_order() {
    let holding = try_parse_cards(["7S", "2H", "9S", "KH"]).unwrap();
    assert_eq!(
        legal_plays(&holding, Some(Suit::Hearts)),
        vec![card("2H"), card("KH")]
    );
}

#[test]
fn void_in_led_suit_may_play_anything() {
    let holding = try_parse_cards(["7S", "2H", "9S"]).unwrap();
    assert_eq!(legal_plays(&holding, Some(Suit::Diamonds)), holding);
    assert_eq!(legal_plays(&holding, None), holding);
}

#[test]
fn highest_of_led_suit_wins_without_trumps() {
    let plays = [
        (0, card("TH")),
        (1, card("AS")),
        (2, card("QH")),
        (3, card("2H")),
    ];
    assert_eq!(trick_winner(&plays, None), Some(2));
}

#[test]
fn any_trump_beats_the_led_suit() {
    let plays = [
        (1, card("AH")),
        (2, card("2C")),
        (3, card("KH")),
        (0, card("3D")),
    ];
    assert_eq!(trick_winner(&plays, Some(Suit::Clubs)), Some(2));
    assert!(card_beats(card("2C"), card("AH"), Suit::Hearts, Some(Suit::Clubs)));
    assert!(!card_beats(card("AS"), card("2H"), Suit::Hearts, None));
}

#[test]
fn empty_trick_has_no_winner() {
    assert_eq!(trick_winner(&[], None), None);
}
