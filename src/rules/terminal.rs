//! Win detection with a one-ply lookahead.

use super::action::{ActionContext, Source, Target};
use super::registry::ActionRegistry;
use crate::cards::Card;
use crate::core::GameState;
use crate::error::Result;
use crate::zones::Zone;

/// Life above zero and all five sealed pieces in hand.
#[must_use]
pub fn is_won(state: &GameState) -> bool {
    state.life() > 0 && Card::PIECES.iter().all(|&piece| state.has(Zone::Hand, piece))
}

/// Is `state` a win, directly or one Grave Recall away?
///
/// With `lookahead` on, a state missing exactly one piece that sits in the
/// discard pile is checked for a Recall in hand that can discard a spare
/// card to fetch it. If one does, `state` is replaced by the winning child so
/// its trace records how the win was secured.
pub fn is_terminal(state: &mut GameState, registry: &ActionRegistry, lookahead: bool) -> Result<bool> {
    if is_won(state) {
        return Ok(true);
    }
    if !lookahead || state.is_lost() {
        return Ok(false);
    }

    let mut missing = Card::PIECES.iter().filter(|&&p| !state.has(Zone::Hand, p));
    let (Some(&piece), None) = (missing.next(), missing.next()) else {
        return Ok(false);
    };
    if !state.has(Zone::Discard, piece) {
        return Ok(false);
    }
    let Some(action) = registry.get(Card::Recall) else {
        return Ok(false);
    };
    let Some(index) = state.hand().iter().position(|t| t.card() == Card::Recall) else {
        return Ok(false);
    };

    let source = Source {
        zone: Zone::Hand,
        index,
        token: state.hand()[index],
    };
    let winner = {
        let ctx = ActionContext::new(state, source, true);
        let mut found = None;
        for target in action.legal_targets(&ctx) {
            if !matches!(target, Target::Pair(spare, fetch) if fetch == piece && !spare.is_piece()) {
                continue;
            }
            let child = action.resolve(&ctx, &target)?.build();
            if is_won(&child) {
                found = Some(child);
                break;
            }
        }
        found
    };

    match winner {
        Some(child) => {
            *state = child;
            Ok(true)
        }
        None => Ok(false),
    }
}
