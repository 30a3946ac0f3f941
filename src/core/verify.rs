//! Structural invariant checks for a built state.
//!
//! These are not enforced on every mutation. `ComboRules` runs them on each
//! successor when verification is switched on, and the tests run them along
//! random walks.

use super::codec::encode;
use super::state::{is_sorted, GameState};
use crate::cards::{Card, CardCounts, LIBRARY_MAX_COUNTERS};
use crate::error::{Result, SolverError};
use crate::zones::Zone;

/// Check every structural invariant of `state`.
///
/// On failure the error carries the state's encoding and trace.
pub fn verify(state: &GameState) -> Result<()> {
    match first_violation(state) {
        None => Ok(()),
        Some(reason) => Err(SolverError::Invariant {
            reason,
            encoding: encode(state),
            trace: state.trace().cloned().collect(),
        }),
    }
}

fn first_violation(state: &GameState) -> Option<String> {
    for zone in Zone::ALL {
        let tokens = state.zone(zone);
        if let Some(cap) = zone.capacity() {
            if tokens.len() > cap {
                return Some(format!("{zone} holds {} cards, capacity {cap}", tokens.len()));
            }
        }
        if zone.is_sorted() && !is_sorted(tokens) {
            return Some(format!("{zone} is not sorted"));
        }
        if let Some(token) = tokens.iter().find(|t| t.is_hidden() && t.payload().is_some()) {
            return Some(format!("face-down {} in {zone} carries a payload", token.card()));
        }
    }

    for token in state.main() {
        if token.card() == Card::Library && token.payload() == Some(0) {
            return Some("Library stores zero counters as a payload".to_string());
        }
        if token.counters() > LIBRARY_MAX_COUNTERS {
            return Some(format!("{} has {} counters", token.card(), token.counters()));
        }
    }

    for token in state.resource() {
        if token.card() != Card::Burial || token.is_hidden() {
            continue;
        }
        match token.payload() {
            Some(index) if usize::from(index) < state.main().len() => {}
            Some(index) => {
                return Some(format!(
                    "{} points at main-zone slot {index} of {}",
                    token.card(),
                    state.main().len()
                ))
            }
            None => return Some(format!("{} has no target", token.card())),
        }
    }

    let counts = state.card_counts();
    if counts != CardCounts::deck() {
        return Some(format!(
            "zones hold {} cards, not the deck composition",
            counts.total()
        ));
    }

    if !state.draw_pile().has_single_known_segment() {
        return Some("draw pile has a known card below an unknown one".to_string());
    }

    if state.life() < 0 {
        return Some(format!("life points below zero: {}", state.life()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{decode, GameState};

    #[test]
    fn test_dealt_state_is_valid() {
        for seed in 0..20 {
            assert_eq!(verify(&GameState::deal(seed)), Ok(()));
        }
    }

    #[test]
    fn test_missing_cards_detected() {
        let state = decode("1|8000|1|0|||E||||0").unwrap();
        let err = verify(&state).unwrap_err();
        assert!(matches!(err, SolverError::Invariant { .. }));
    }

    #[test]
    fn test_unsorted_hand_detected() {
        let text = "1|8000|1|0|||XE||||0";
        match verify(&decode(text).unwrap()) {
            Err(SolverError::Invariant { reason, encoding, .. }) => {
                assert_eq!(reason, "hand is not sorted");
                assert_eq!(encoding, text);
            }
            other => panic!("expected invariant error, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_modifier_detected() {
        let mut b = crate::core::StateBuilder::new(0);
        b.push(Zone::Resource, crate::cards::CardToken::with_payload(Card::Burial, 2))
            .unwrap();
        let reason = first_violation(&b.build()).unwrap();
        assert!(reason.contains("main-zone slot 2"));
    }
}
