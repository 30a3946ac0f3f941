//! Monster actions: the normal summon and the Library's draw.

use crate::cards::{CardToken, LIBRARY_MAX_COUNTERS};
use crate::core::StateBuilder;
use crate::error::{Result, SolverError};
use crate::rules::{ActionContext, CardAction, Target};
use crate::zones::Zone;

/// Normal summon from hand. One per turn, needs a main-zone slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalSummon;

impl NormalSummon {
    fn is_legal(ctx: &ActionContext<'_>) -> bool {
        ctx.source.zone == Zone::Hand
            && !ctx.state.summoned()
            && ctx.state.free_slots(Zone::Main) > 0
    }
}

impl CardAction for NormalSummon {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if Self::is_legal(ctx) {
            vec![Target::None]
        } else {
            Vec::new()
        }
    }

    fn resolve(&self, ctx: &ActionContext<'_>, _target: &Target) -> Result<StateBuilder> {
        if !Self::is_legal(ctx) {
            return Err(SolverError::IllegalAction(format!(
                "cannot normal summon {}",
                ctx.source.card()
            )));
        }
        let mut b = ctx.builder();
        let token = b.remove_at(Zone::Hand, ctx.source.index)?;
        b.push(Zone::Main, token.plain())?;
        b.set_summoned(true);
        let card = token.card();
        b.note(|| format!("Normal summon {}", card.name()));
        Ok(b)
    }
}

/// Royal Magical Library.
///
/// From hand it is normal summoned. On the field, with three spell counters,
/// the counters are removed to draw one card.
#[derive(Clone, Copy, Debug, Default)]
pub struct Library;

impl Library {
    fn can_draw(ctx: &ActionContext<'_>) -> bool {
        ctx.source.zone == Zone::Main
            && ctx.source.token.counters() >= LIBRARY_MAX_COUNTERS
            && !ctx.state.draw_pile().is_empty()
    }
}

impl CardAction for Library {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        match ctx.source.zone {
            Zone::Hand => NormalSummon.legal_targets(ctx),
            Zone::Main if Self::can_draw(ctx) => vec![Target::None],
            _ => Vec::new(),
        }
    }

    fn resolve(&self, ctx: &ActionContext<'_>, target: &Target) -> Result<StateBuilder> {
        if ctx.source.zone == Zone::Hand {
            return NormalSummon.resolve(ctx, target);
        }
        if !Self::can_draw(ctx) {
            return Err(SolverError::IllegalAction(format!(
                "{} has {} counters",
                ctx.source.card(),
                ctx.source.token.counters()
            )));
        }
        let mut b = ctx.builder();
        b.replace_at(Zone::Main, ctx.source.index, CardToken::library(0))?;
        b.draw(1)?;
        b.note(|| format!("Remove {LIBRARY_MAX_COUNTERS} counters from Library, draw 1"));
        Ok(b)
    }
}
