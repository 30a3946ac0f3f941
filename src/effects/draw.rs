//! Spells whose main job is drawing cards.

use smallvec::SmallVec;

use super::spell::{activate, can_activate, finish, pile_has};
use crate::cards::{Card, CardCounts};
use crate::core::StateBuilder;
use crate::error::{Result, SolverError};
use crate::rules::{ActionContext, CardAction, Target};
use crate::zones::{PilePosition, Zone};

/// Pay an optional life cost, then draw a fixed number of cards.
///
/// Upstart Goblin, Pot of Greed and Tithe of Blood.
#[derive(Clone, Copy, Debug)]
pub struct DrawSpell {
    pub cards: usize,
    pub life_cost: i32,
}

impl DrawSpell {
    #[must_use]
    pub const fn new(cards: usize) -> Self {
        Self {
            cards,
            life_cost: 0,
        }
    }

    #[must_use]
    pub const fn with_cost(mut self, life_cost: i32) -> Self {
        self.life_cost = life_cost;
        self
    }
}

impl CardAction for DrawSpell {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if can_activate(ctx) && pile_has(ctx.state, self.cards) && ctx.state.life() >= self.life_cost {
            vec![Target::None]
        } else {
            Vec::new()
        }
    }

    fn resolve(&self, ctx: &ActionContext<'_>, _target: &Target) -> Result<StateBuilder> {
        let mut b = activate(ctx)?;
        if self.life_cost > 0 {
            b.pay_life(self.life_cost)?;
        }
        b.draw(self.cards)?;
        let (cards, cost) = (self.cards, self.life_cost);
        b.note(|| match cost {
            0 => format!("  draw {cards}"),
            _ => format!("  pay {cost} LP, draw {cards}"),
        });
        finish(&mut b, ctx.source.card())?;
        Ok(b)
    }
}

/// Cards Pot of Desires banishes.
const DESIRES_BANISH: usize = 10;
/// Cards Pot of Desires draws.
const DESIRES_DRAW: usize = 2;

/// Pot of Desires: banish the top ten face-down, then draw two.
#[derive(Clone, Copy, Debug, Default)]
pub struct Desires;

impl CardAction for Desires {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if can_activate(ctx) && pile_has(ctx.state, DESIRES_BANISH + DESIRES_DRAW) {
            vec![Target::None]
        } else {
            Vec::new()
        }
    }

    fn resolve(&self, ctx: &ActionContext<'_>, _target: &Target) -> Result<StateBuilder> {
        let mut b = activate(ctx)?;
        for token in b.take_top(DESIRES_BANISH)? {
            b.push(Zone::Banished, token.concealed())?;
        }
        b.draw(DESIRES_DRAW)?;
        b.note(|| format!("  banish {DESIRES_BANISH} face-down, draw {DESIRES_DRAW}"));
        finish(&mut b, Card::Desires)?;
        Ok(b)
    }
}

/// Card Destruction: discard the rest of the hand, draw as many.
#[derive(Clone, Copy, Debug, Default)]
pub struct Destruction;

impl CardAction for Destruction {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        let rest = ctx.state.hand().len().saturating_sub(1);
        if can_activate(ctx) && rest > 0 && pile_has(ctx.state, rest) {
            vec![Target::None]
        } else {
            Vec::new()
        }
    }

    fn resolve(&self, ctx: &ActionContext<'_>, _target: &Target) -> Result<StateBuilder> {
        let mut b = activate(ctx)?;
        let count = b.state().hand().len();
        while !b.state().hand().is_empty() {
            let token = b.remove_at(Zone::Hand, 0)?;
            b.push(Zone::Discard, token.plain())?;
        }
        b.draw(count)?;
        b.note(|| format!("  discard {count}, draw {count}"));
        finish(&mut b, Card::Destruction)?;
        Ok(b)
    }
}

/// Magical Mallet: shuffle any cards from hand into the pile, then draw as
/// many.
///
/// Every sub-multiset of the rest of the hand is a target, including the
/// empty one (which still reshuffles the pile).
#[derive(Clone, Copy, Debug, Default)]
pub struct Mallet;

impl Mallet {
    fn subsets(counts: &CardCounts) -> Vec<SmallVec<[Card; 8]>> {
        let mut subsets: Vec<SmallVec<[Card; 8]>> = vec![SmallVec::new()];
        for (card, copies) in counts.iter() {
            let mut grown = Vec::with_capacity(subsets.len() * (usize::from(copies) + 1));
            for subset in &subsets {
                for n in 0..=copies {
                    let mut next = subset.clone();
                    next.extend(std::iter::repeat(card).take(usize::from(n)));
                    grown.push(next);
                }
            }
            subsets = grown;
        }
        subsets
    }
}

impl CardAction for Mallet {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if !can_activate(ctx) {
            return Vec::new();
        }
        let mut rest = ctx.state.hand_counts();
        rest.remove(ctx.source.card());
        Self::subsets(&rest).into_iter().map(Target::Cards).collect()
    }

    fn resolve(&self, ctx: &ActionContext<'_>, target: &Target) -> Result<StateBuilder> {
        let Target::Cards(cards) = target else {
            return Err(SolverError::IllegalAction(format!(
                "{} needs a set of cards, got {target:?}",
                Card::Mallet
            )));
        };
        let mut b = activate(ctx)?;
        for &card in cards {
            let token = b.take(Zone::Hand, card)?;
            b.push_pile(token.plain(), PilePosition::Top);
        }
        b.shuffle_draw_pile();
        b.draw(cards.len())?;
        let count = cards.len();
        b.note(|| format!("  shuffle {count} into the deck, draw {count}"));
        finish(&mut b, Card::Mallet)?;
        Ok(b)
    }
}
