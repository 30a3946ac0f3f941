//! Scenario builders shared by the integration tests.

#![allow(dead_code)]

use ftk_search::cards::{Card, CardCounts, CardToken};
use ftk_search::core::{GameState, StateBuilder, STARTING_LIFE};
use ftk_search::zones::Zone;

/// A full-deck state with a chosen hand, discard pile and draw order.
///
/// `top` lists the cards to be drawn first, in draw order, face-down. Every
/// other card of the deck sits face-down underneath in canonical order.
pub fn stacked(hand: &[Card], discard: &[Card], top: &[Card]) -> GameState {
    stacked_at(STARTING_LIFE, hand, discard, top)
}

/// Like `stacked`, with `life` life points.
pub fn stacked_at(life: i32, hand: &[Card], discard: &[Card], top: &[Card]) -> GameState {
    let mut b = StateBuilder::new(0);
    b.set_life(life);
    let mut rest = CardCounts::deck();
    for &card in hand.iter().chain(discard).chain(top) {
        assert!(rest.remove(card), "more {card} than the deck holds");
    }
    for &card in hand {
        b.push(Zone::Hand, CardToken::new(card)).unwrap();
    }
    for &card in discard {
        b.push(Zone::Discard, CardToken::new(card)).unwrap();
    }
    for card in rest.to_cards() {
        b.push(Zone::DrawPile, CardToken::hidden(card)).unwrap();
    }
    for &card in top.iter().rev() {
        b.push(Zone::DrawPile, CardToken::hidden(card)).unwrap();
    }
    b.build()
}

/// Four pieces in hand plus `extra`; the right leg is elsewhere.
pub fn four_pieces(extra: &[Card]) -> Vec<Card> {
    let mut hand = vec![Card::Exodia, Card::LeftArm, Card::RightArm, Card::LeftLeg];
    hand.extend_from_slice(extra);
    hand
}
