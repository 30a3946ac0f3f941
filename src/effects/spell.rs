//! Steps shared by every spell.
//!
//! A spell is activated from hand into a free resource slot, every Library
//! on the field gains a counter, the effect resolves, and the spell goes to
//! the discard pile (unless it stays on the field as an equip).

use crate::cards::{Card, CardToken};
use crate::core::{GameState, StateBuilder};
use crate::error::{Result, SolverError};
use crate::rules::ActionContext;
use crate::zones::Zone;

/// Can a spell be activated from hand in this state?
pub(crate) fn can_activate(ctx: &ActionContext<'_>) -> bool {
    ctx.source.zone == Zone::Hand && ctx.state.free_slots(Zone::Resource) > 0
}

/// Does the draw pile hold at least `count` cards?
pub(crate) fn pile_has(state: &GameState, count: usize) -> bool {
    state.draw_pile().len() >= count
}

/// Take the source spell out of the hand and charge Libraries.
pub(crate) fn activate(ctx: &ActionContext<'_>) -> Result<StateBuilder> {
    if !can_activate(ctx) {
        return Err(SolverError::IllegalAction(format!(
            "{} cannot be activated from {}",
            ctx.source.card(),
            ctx.source.zone
        )));
    }
    let mut b = ctx.builder();
    b.remove_at(Zone::Hand, ctx.source.index)?;
    b.add_spell_counters();
    let card = ctx.source.card();
    b.note(|| format!("Activate {}", card.name()));
    Ok(b)
}

/// Send a resolved spell to the discard pile.
pub(crate) fn finish(b: &mut StateBuilder, card: Card) -> Result<()> {
    b.push(Zone::Discard, CardToken::new(card))
}
