//! Spells that rearrange the draw pile.

use smallvec::SmallVec;

use super::spell::{activate, can_activate, finish, pile_has};
use crate::cards::{Card, CardToken};
use crate::core::StateBuilder;
use crate::error::{Result, SolverError};
use crate::rules::{ActionContext, CardAction, Target};
use crate::zones::{PilePosition, Zone};

/// Cards Sealed Cache looks at.
pub const CACHE_DEPTH: usize = 3;

/// Sealed Cache: take the top three without looking, keep one, put the
/// rest on the bottom face-down.
///
/// The pick is made blind. Without prescience the choices are each distinct
/// known card plus a single unknown position, since unknown cards cannot be
/// told apart. With prescience every distinct card is a choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cache;

impl Cache {
    fn choices(top: &[CardToken], prescient: bool) -> Vec<usize> {
        let mut seen: SmallVec<[Card; CACHE_DEPTH]> = SmallVec::new();
        let mut unknown_taken = false;
        let mut positions = Vec::with_capacity(top.len());
        for (position, token) in top.iter().enumerate() {
            if token.is_hidden() && !prescient {
                if !unknown_taken {
                    unknown_taken = true;
                    positions.push(position);
                }
                continue;
            }
            if !seen.contains(&token.card()) {
                seen.push(token.card());
                positions.push(position);
            }
        }
        positions
    }
}

impl CardAction for Cache {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if !can_activate(ctx) || !pile_has(ctx.state, CACHE_DEPTH) {
            return Vec::new();
        }
        let top: SmallVec<[CardToken; CACHE_DEPTH]> = ctx
            .state
            .draw_pile()
            .iter_from_top()
            .take(CACHE_DEPTH)
            .copied()
            .collect();
        Self::choices(&top, ctx.prescient)
            .into_iter()
            .map(Target::Position)
            .collect()
    }

    fn resolve(&self, ctx: &ActionContext<'_>, target: &Target) -> Result<StateBuilder> {
        let &Target::Position(keep) = target else {
            return Err(SolverError::IllegalAction(format!(
                "{} needs a position, got {target:?}",
                Card::Cache
            )));
        };
        if keep >= CACHE_DEPTH {
            return Err(SolverError::IllegalAction(format!(
                "{} can only keep one of the top {CACHE_DEPTH}",
                Card::Cache
            )));
        }
        let mut b = activate(ctx)?;
        let taken = b.take_top(CACHE_DEPTH)?;
        let mut kept = None;
        for (position, token) in taken.into_iter().enumerate() {
            if position == keep {
                kept = Some(token.card());
                b.push(Zone::Hand, token.revealed())?;
            } else {
                b.push_pile(token.concealed(), PilePosition::Bottom);
            }
        }
        if let Some(card) = kept {
            b.note(|| format!("  keep {}, rest to the bottom", card.name()));
        }
        finish(&mut b, Card::Cache)?;
        Ok(b)
    }
}

/// Inverted Scroll: turn the draw pile upside down.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scroll;

impl CardAction for Scroll {
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target> {
        if can_activate(ctx) && !ctx.state.draw_pile().is_empty() {
            vec![Target::None]
        } else {
            Vec::new()
        }
    }

    fn resolve(&self, ctx: &ActionContext<'_>, _target: &Target) -> Result<StateBuilder> {
        let mut b = activate(ctx)?;
        b.flip_draw_pile();
        let top = b.state().draw_pile().top().map(|t| t.card());
        b.note(|| match top {
            Some(card) => format!("  deck turned over, {} on top", card.name()),
            None => "  deck turned over".to_string(),
        });
        finish(&mut b, Card::Scroll)?;
        Ok(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::rules::Source;

    /// Hand holding `card`; pile listed top first.
    fn state(card: Card, pile_top_first: &[CardToken]) -> GameState {
        let mut b = StateBuilder::new(0);
        b.push(Zone::Hand, CardToken::new(card)).unwrap();
        for &token in pile_top_first.iter().rev() {
            b.push(Zone::DrawPile, token).unwrap();
        }
        b.build()
    }

    fn ctx(state: &GameState, prescient: bool) -> ActionContext<'_> {
        ActionContext::new(
            state,
            Source {
                zone: Zone::Hand,
                index: 0,
                token: state.hand()[0],
            },
            prescient,
        )
    }

    #[test]
    fn test_cache_blind_choices() {
        let s = state(
            Card::Cache,
            &[
                CardToken::new(Card::Exodia),
                CardToken::hidden(Card::Wall),
                CardToken::hidden(Card::Upstart),
                CardToken::hidden(Card::Tithe),
            ],
        );
        assert_eq!(
            Cache.legal_targets(&ctx(&s, false)),
            vec![Target::Position(0), Target::Position(1)]
        );
        assert_eq!(
            Cache.legal_targets(&ctx(&s, true)),
            vec![Target::Position(0), Target::Position(1), Target::Position(2)]
        );
    }

    #[test]
    fn test_cache_prescient_skips_same_card() {
        let s = state(
            Card::Cache,
            &[
                CardToken::hidden(Card::Wall),
                CardToken::hidden(Card::Wall),
                CardToken::hidden(Card::Upstart),
            ],
        );
        assert_eq!(
            Cache.legal_targets(&ctx(&s, true)),
            vec![Target::Position(0), Target::Position(2)]
        );
    }

    #[test]
    fn test_cache_keeps_one() {
        let s = state(
            Card::Cache,
            &[
                CardToken::hidden(Card::Wall),
                CardToken::hidden(Card::Upstart),
                CardToken::hidden(Card::Tithe),
                CardToken::hidden(Card::Exodia),
            ],
        );
        let child = Cache
            .resolve(&ctx(&s, true), &Target::Position(1))
            .unwrap()
            .build();
        assert_eq!(child.hand(), &[CardToken::new(Card::Upstart)]);
        let order: Vec<Card> = child.draw_pile().iter_from_top().map(|t| t.card()).collect();
        assert_eq!(order, vec![Card::Exodia, Card::Wall, Card::Tithe]);
        assert_eq!(child.draw_pile().known_on_top(), 0);
    }

    #[test]
    fn test_scroll_reveals_bottom() {
        let s = state(
            Card::Scroll,
            &[CardToken::hidden(Card::Wall), CardToken::hidden(Card::Exodia)],
        );
        let child = Scroll.resolve(&ctx(&s, true), &Target::None).unwrap().build();
        assert!(child.reversed());
        assert_eq!(child.draw_pile().top(), Some(&CardToken::new(Card::Exodia)));
        assert!(child.draw_pile().is_top_known());
    }
}
