//! Successor generation.
//!
//! `next` walks every actionable card on the field and in hand, resolves
//! each legal target into a fresh state, and collects the results into a
//! `TransitionTable` keyed by canonical encoding. Identical outcomes reached
//! through different cards or targets collapse into one entry.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::trace;

use super::action::{ActionContext, Source};
use super::engine::ComboRules;
use super::scorer::Score;
use crate::cards::CardToken;
use crate::core::{GameState, StateBuilder, StateKey};
use crate::error::Result;
use crate::zones::Zone;

/// Zones whose cards can act, in scan order.
const ACTING_ZONES: [Zone; 3] = [Zone::Main, Zone::Resource, Zone::Hand];

/// A frozen child state with its key and score computed once.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Successor<S = GameState> {
    pub key: StateKey,
    pub state: S,
    pub score: Score,
}

/// Per-node table of distinct successors.
#[derive(Debug, Default)]
pub struct TransitionTable {
    entries: FxHashMap<StateKey, Successor>,
}

impl TransitionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &StateKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Freeze a builder and add it. Returns false if an equal state was
    /// already present.
    pub fn insert(&mut self, rules: &ComboRules, builder: StateBuilder) -> Result<bool> {
        let successor = rules.freeze(builder)?;
        if self.entries.contains_key(&successor.key) {
            return Ok(false);
        }
        self.entries.insert(successor.key.clone(), successor);
        Ok(true)
    }

    /// Entries in rank order.
    #[must_use]
    pub fn into_sorted(self) -> Vec<Successor> {
        let mut children: Vec<Successor> = self.entries.into_values().collect();
        children.sort_by(rank);
        children
    }
}

/// Successor order: score descending, then life spent ascending, then draw
/// pile size ascending, then known top first, then upright pile first. The
/// key breaks any remaining tie.
pub fn rank(a: &Successor, b: &Successor) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.state.life().cmp(&a.state.life()))
        .then_with(|| a.state.draw_pile().len().cmp(&b.state.draw_pile().len()))
        .then_with(|| {
            b.state
                .draw_pile()
                .is_top_known()
                .cmp(&a.state.draw_pile().is_top_known())
        })
        .then_with(|| a.state.reversed().cmp(&b.state.reversed()))
        .then_with(|| a.key.cmp(&b.key))
}

/// Ordered, deduplicated successors of `state`.
///
/// A lost state has none. Of several identical tokens in one zone only the
/// first is acted on.
pub fn next(rules: &ComboRules, state: &GameState, prescient: bool) -> Result<Vec<Successor>> {
    if state.is_lost() {
        return Ok(Vec::new());
    }

    let mut table = TransitionTable::new();
    for zone in ACTING_ZONES {
        let mut seen: SmallVec<[CardToken; 8]> = SmallVec::new();
        for (index, &token) in state.zone(zone).iter().enumerate() {
            if seen.contains(&token) {
                continue;
            }
            seen.push(token);

            let Some(action) = rules.registry().get(token.card()) else {
                continue;
            };
            let ctx = ActionContext::new(state, Source { zone, index, token }, prescient);
            for target in action.legal_targets(&ctx) {
                let builder = action.resolve(&ctx, &target)?;
                table.insert(rules, builder)?;
            }
        }
    }

    trace!(children = table.len(), "expanded state");
    Ok(table.into_sorted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::rules::Target;

    fn hand(cards: &[Card]) -> StateBuilder {
        let mut b = StateBuilder::new(0);
        for &card in cards {
            b.push(Zone::Hand, CardToken::new(card)).unwrap();
        }
        b
    }

    #[test]
    fn test_lost_state_has_no_successors() {
        let mut b = StateBuilder::new(0);
        for card in [Card::Wall, Card::Wall, Card::Wall, Card::Library, Card::Library] {
            b.push(Zone::Main, CardToken::new(card)).unwrap();
        }
        b.push(Zone::DrawPile, CardToken::hidden(Card::Upstart)).unwrap();
        b.set_life(0);
        let state = b.build();

        assert!(next(&ComboRules::new(), &state, true).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_sources_skipped() {
        let mut b = hand(&[Card::Wall, Card::Wall]);
        b.push(Zone::DrawPile, CardToken::hidden(Card::Upstart)).unwrap();
        let state = b.build();

        let children = next(&ComboRules::new(), &state, true).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].state.main(), &[CardToken::new(Card::Wall)]);
    }

    #[test]
    fn test_table_dedups_identical_outcomes() {
        let rules = ComboRules::new();
        let mut b = hand(&[Card::Recall, Card::TrapHole, Card::TrapHole]);
        b.push(Zone::Discard, CardToken::new(Card::Wall)).unwrap();
        let state = b.build();

        let action = rules.registry().get(Card::Recall).unwrap();
        let ctx = ActionContext::new(
            &state,
            Source {
                zone: Zone::Hand,
                index: 0,
                token: state.hand()[0],
            },
            true,
        );
        let target = Target::Pair(Card::TrapHole, Card::Wall);

        let mut table = TransitionTable::new();
        assert!(table.insert(&rules, action.resolve(&ctx, &target).unwrap()).unwrap());
        assert!(!table.insert(&rules, action.resolve(&ctx, &target).unwrap()).unwrap());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_dedups_distinct_targets() {
        // Keeping either of two face-down Walls leaves the same state behind.
        let rules = ComboRules::new();
        let mut b = hand(&[Card::Cache]);
        for card in [Card::TrapHole, Card::Wall, Card::Wall] {
            b.push(Zone::DrawPile, CardToken::hidden(card)).unwrap();
        }
        let state = b.build();

        let action = rules.registry().get(Card::Cache).unwrap();
        let ctx = ActionContext::new(
            &state,
            Source {
                zone: Zone::Hand,
                index: 0,
                token: state.hand()[0],
            },
            true,
        );

        let mut table = TransitionTable::new();
        assert!(table.insert(&rules, action.resolve(&ctx, &Target::Position(0)).unwrap()).unwrap());
        assert!(!table.insert(&rules, action.resolve(&ctx, &Target::Position(1)).unwrap()).unwrap());
        assert!(table.insert(&rules, action.resolve(&ctx, &Target::Position(2)).unwrap()).unwrap());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_dedups_distinct_sources() {
        let rules = ComboRules::new();
        let mut b = hand(&[Card::Recall, Card::Recall, Card::TrapHole]);
        b.push(Zone::Discard, CardToken::new(Card::Wall)).unwrap();
        let state = b.build();

        let action = rules.registry().get(Card::Recall).unwrap();
        let target = Target::Pair(Card::TrapHole, Card::Wall);
        let mut table = TransitionTable::new();
        for index in 0..2 {
            let ctx = ActionContext::new(
                &state,
                Source {
                    zone: Zone::Hand,
                    index,
                    token: state.hand()[index],
                },
                true,
            );
            table.insert(&rules, action.resolve(&ctx, &target).unwrap()).unwrap();
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_children_ranked_by_score() {
        let mut b = hand(&[Card::Upstart, Card::PotOfGreed, Card::Wall]);
        for _ in 0..5 {
            b.push(Zone::DrawPile, CardToken::hidden(Card::TrapHole)).unwrap();
        }
        let children = next(&ComboRules::new(), &b.build(), true).unwrap();

        assert_eq!(children.len(), 3);
        for pair in children.windows(2) {
            assert_ne!(rank(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn test_rank_prefers_less_life_spent() {
        let rules = ComboRules::new();
        let mut rich = StateBuilder::new(0);
        rich.set_life(8000);
        let mut poor = StateBuilder::new(0);
        poor.set_life(7000);

        let mut a = rules.freeze(rich).unwrap();
        let mut b = rules.freeze(poor).unwrap();
        a.score = Score::new(1.0);
        b.score = Score::new(1.0);
        assert_eq!(rank(&a, &b), Ordering::Less);
    }
}
