//! Traps: set face-down from hand, some can be flipped later.

use crate::cards::CardToken;
use crate::core::StateBuilder;
use crate::error::{Result, SolverError};
use crate::rules::{ActionContext, CardAction, Target};
use crate::zones::Zone;

/// A trap that is set face-down into the resource zone.
///
/// With `flip_draws > 0` a set copy can be flipped on a later turn to draw
/// that many cards (Jar of Greed). A trap found face-down on turn 2 or later
/// counts as set on an earlier turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct SetTrap {
    pub flip_draws: usize,
}

impl SetTrap {
    /// A trap that does nothing once set.
    #[must_use]
    pub const fn inert() -> Self {
        Self { flip_draws: 0 }
    }

    /// A trap that draws when flipped.
    #[must_use]
    pub const fn drawing(flip_draws: usize) -> Self {
        Self { flip_draws }
    }

    fn can_set(ctx: &ActionContext<'_>) -> bool {
        ctx.source.zone == Zone::Hand && ctx.state.free_slots(Zone::Resource) > 0
    }

    fn can_flip(&self, ctx: &ActionContext<'_>) -> bool {
        ctx.source.zone == Zone::Resource
            && ctx.source.token.is_hidden()
            && self.flip_draws > 0
            && ctx.state.turn() > 1
            && ctx.state.draw_pile().len() >= self.flip_draws
    }
}

impl CardAction for SetTrap {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if Self::can_set(ctx) || self.can_flip(ctx) {
            vec![Target::None]
        } else {
            Vec::new()
        }
    }

    fn resolve(&self, ctx: &ActionContext<'_>, _target: &Target) -> Result<StateBuilder> {
        let card = ctx.source.card();
        let mut b = ctx.builder();
        if Self::can_set(ctx) {
            b.remove_at(Zone::Hand, ctx.source.index)?;
            b.push(Zone::Resource, CardToken::hidden(card))?;
            b.note(|| format!("Set {}", card.name()));
        } else if self.can_flip(ctx) {
            b.remove_at(Zone::Resource, ctx.source.index)?;
            b.push(Zone::Discard, CardToken::new(card))?;
            b.draw(self.flip_draws)?;
            let draws = self.flip_draws;
            b.note(|| format!("Flip {}, draw {draws}", card.name()));
        } else {
            return Err(SolverError::IllegalAction(format!(
                "{card} cannot act from {}",
                ctx.source.zone
            )));
        }
        Ok(b)
    }
}
