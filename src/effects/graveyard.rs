//! Spells that reach into the discard pile.

use smallvec::SmallVec;

use super::spell::{activate, can_activate, finish};
use crate::cards::{Card, CardToken};
use crate::core::{GameState, StateBuilder};
use crate::error::{Result, SolverError};
use crate::rules::{ActionContext, CardAction, Target};
use crate::zones::Zone;

/// Life points Premature Burial costs.
pub const BURIAL_COST: i32 = 800;

/// Distinct monsters in the discard pile, in canonical order.
fn discarded_monsters(state: &GameState) -> SmallVec<[Card; 8]> {
    let mut monsters: SmallVec<[Card; 8]> = state
        .discard()
        .iter()
        .map(|t| t.card())
        .filter(|c| c.is_monster())
        .collect();
    monsters.sort_unstable();
    monsters.dedup();
    monsters
}

/// Grave Recall: discard one card, then add a monster from the discard
/// pile to hand.
///
/// The discarded card is in the pile by the time the monster is chosen, so
/// a discarded monster can be fetched straight back.
#[derive(Clone, Copy, Debug, Default)]
pub struct Recall;

impl CardAction for Recall {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if !can_activate(ctx) {
            return Vec::new();
        }
        let mut costs: SmallVec<[Card; 8]> = ctx
            .state
            .hand()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != ctx.source.index)
            .map(|(_, t)| t.card())
            .collect();
        costs.sort_unstable();
        costs.dedup();

        let monsters = discarded_monsters(ctx.state);
        let mut targets = Vec::new();
        for &cost in &costs {
            for &fetch in &monsters {
                targets.push(Target::Pair(cost, fetch));
            }
            if cost.is_monster() && !monsters.contains(&cost) {
                targets.push(Target::Pair(cost, cost));
            }
        }
        targets
    }

    fn resolve(&self, ctx: &ActionContext<'_>, target: &Target) -> Result<StateBuilder> {
        let &Target::Pair(cost, fetch) = target else {
            return Err(SolverError::IllegalAction(format!(
                "{} needs a discard and a fetch, got {target:?}",
                Card::Recall
            )));
        };
        let mut b = activate(ctx)?;
        b.discard_from_hand(cost)?;
        let token = b.take(Zone::Discard, fetch)?;
        b.push(Zone::Hand, token.plain())?;
        b.note(|| format!("  discard {}, add {} to hand", cost.name(), fetch.name()));
        finish(&mut b, Card::Recall)?;
        Ok(b)
    }
}

/// Premature Burial: pay 800 LP, special summon a monster from the discard
/// pile and stay on the field equipped to it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Burial;

impl CardAction for Burial {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if !can_activate(ctx)
            || ctx.state.free_slots(Zone::Main) == 0
            || ctx.state.life() < BURIAL_COST
        {
            return Vec::new();
        }
        discarded_monsters(ctx.state)
            .into_iter()
            .map(Target::Card)
            .collect()
    }

    fn resolve(&self, ctx: &ActionContext<'_>, target: &Target) -> Result<StateBuilder> {
        let &Target::Card(monster) = target else {
            return Err(SolverError::IllegalAction(format!(
                "{} needs a monster, got {target:?}",
                Card::Burial
            )));
        };
        let mut b = activate(ctx)?;
        b.pay_life(BURIAL_COST)?;
        let token = b.take(Zone::Discard, monster)?;
        b.push(Zone::Main, token.plain())?;
        let slot = b.state().main().len() - 1;
        let slot = u8::try_from(slot)
            .map_err(|_| SolverError::IllegalAction(format!("main-zone slot {slot} out of range")))?;
        b.push(Zone::Resource, CardToken::with_payload(Card::Burial, slot))?;
        b.note(|| format!("  pay {BURIAL_COST} LP, special summon {}", monster.name()));
        Ok(b)
    }
}
