//! Heuristic scoring of states.
//!
//! The score is a sum of independent contributions read from a weight
//! table. The table is plain data (`ScoreWeights`) so it can be tuned or
//! loaded from JSON without touching the scorer.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::terminal::is_won;
use crate::cards::{Card, CardKind, LIBRARY_MAX_COUNTERS};
use crate::core::GameState;
use crate::error::{Result, SolverError};
use crate::zones::Zone;

/// A heuristic score. `Score::WIN` marks a won state.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// The terminal sentinel.
    pub const WIN: Score = Score(f64::INFINITY);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_win(self) -> bool {
        self.0 == f64::INFINITY
    }

    /// Total order, used for ranking successors.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_win() {
            f.write_str("WIN")
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

/// Weight table consumed by the scorer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Per sealed piece in hand.
    pub piece_in_hand: f64,
    /// Per sealed piece in the discard pile.
    pub piece_in_discard: f64,
    /// Per Library on the field.
    pub library_on_field: f64,
    /// Per spell counter on a Library.
    pub library_counter: f64,
    /// Value of each non-piece card in hand when it can be played.
    pub hand: BTreeMap<Card, f64>,
    /// Multiplier on a hand card's value when its zone is full or the
    /// summon is spent.
    pub undeployable_factor: f64,
    /// Per face-down trap that cannot be flipped.
    pub stuck_trap: f64,
    /// Per 1000 life points.
    pub life_per_thousand: f64,
    /// When the top of the draw pile is known.
    pub known_top: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        let hand = [
            (Card::Library, 15.0),
            (Card::Wall, 1.0),
            (Card::Upstart, 10.0),
            (Card::PotOfGreed, 14.0),
            (Card::Tithe, 8.0),
            (Card::Desires, 12.0),
            (Card::Destruction, 9.0),
            (Card::Mallet, 8.0),
            (Card::Recall, 10.0),
            (Card::Burial, 6.0),
            (Card::Cache, 9.0),
            (Card::Scroll, 4.0),
            (Card::JarOfGreed, 3.0),
            (Card::TrapHole, -1.0),
        ]
        .into_iter()
        .collect();

        Self {
            piece_in_hand: 100.0,
            piece_in_discard: -30.0,
            library_on_field: 20.0,
            library_counter: 5.0,
            hand,
            undeployable_factor: 0.25,
            stuck_trap: -6.0,
            life_per_thousand: 1.0,
            known_top: 2.0,
        }
    }
}

impl ScoreWeights {
    /// Load a table from JSON. Missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self> {
        let weights: Self =
            serde_json::from_str(json).map_err(|e| SolverError::Config(e.to_string()))?;
        weights.validate()?;
        Ok(weights)
    }

    /// Reject weights that would make scores non-finite.
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("piece_in_hand", self.piece_in_hand),
            ("piece_in_discard", self.piece_in_discard),
            ("library_on_field", self.library_on_field),
            ("library_counter", self.library_counter),
            ("undeployable_factor", self.undeployable_factor),
            ("stuck_trap", self.stuck_trap),
            ("life_per_thousand", self.life_per_thousand),
            ("known_top", self.known_top),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(SolverError::Config(format!("weight {name} is not finite")));
            }
        }
        if let Some((card, _)) = self.hand.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SolverError::Config(format!(
                "hand weight for {card} is not finite"
            )));
        }
        Ok(())
    }

    fn hand_value(&self, card: Card) -> f64 {
        self.hand.get(&card).copied().unwrap_or(0.0)
    }

    /// Score a state. Returns `Score::WIN` iff the state is won.
    #[must_use]
    pub fn score(&self, state: &GameState) -> Score {
        if is_won(state) {
            return Score::WIN;
        }

        let mut total = 0.0;

        for token in state.hand() {
            let card = token.card();
            if card.is_piece() {
                total += self.piece_in_hand;
                continue;
            }
            let value = self.hand_value(card);
            total += if can_deploy(state, card) {
                value
            } else {
                value * self.undeployable_factor
            };
        }

        for token in state.discard() {
            if token.card().is_piece() {
                total += self.piece_in_discard;
            }
        }

        for token in state.main() {
            if token.card() == Card::Library {
                total += self.library_on_field;
                total += f64::from(token.counters().min(LIBRARY_MAX_COUNTERS)) * self.library_counter;
            }
        }

        let stuck = state
            .resource()
            .iter()
            .filter(|t| t.is_hidden() && !can_flip(state, t.card()))
            .count();
        total += stuck as f64 * self.stuck_trap;

        total += f64::from(state.life().max(0)) / 1000.0 * self.life_per_thousand;

        if state.draw_pile().is_top_known() {
            total += self.known_top;
        }

        Score::new(total)
    }
}

/// Is there room to play `card` from hand right now?
fn can_deploy(state: &GameState, card: Card) -> bool {
    match card.kind() {
        CardKind::Monster => !state.summoned() && state.free_slots(Zone::Main) > 0,
        CardKind::Spell | CardKind::Trap => state.free_slots(Zone::Resource) > 0,
    }
}

/// Can a face-down card in the resource zone be flipped?
fn can_flip(state: &GameState, card: Card) -> bool {
    card == Card::JarOfGreed && state.turn() > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardToken;
    use crate::core::StateBuilder;

    fn hand(cards: &[Card]) -> StateBuilder {
        let mut b = StateBuilder::new(0);
        for &card in cards {
            b.push(Zone::Hand, CardToken::new(card)).unwrap();
        }
        b
    }

    #[test]
    fn test_win_is_sentinel() {
        let state = hand(&Card::PIECES).build();
        let score = ScoreWeights::default().score(&state);
        assert!(score.is_win());
        assert_eq!(score, Score::WIN);
    }

    #[test]
    fn test_more_pieces_score_higher() {
        let w = ScoreWeights::default();
        let two = w.score(&hand(&[Card::Exodia, Card::LeftArm]).build());
        let three = w.score(&hand(&[Card::Exodia, Card::LeftArm, Card::RightArm]).build());
        assert!(three > two);
    }

    #[test]
    fn test_full_resource_zone_discounts_spells() {
        let w = ScoreWeights::default();
        let free = w.score(&hand(&[Card::PotOfGreed]).build());

        let mut b = hand(&[Card::PotOfGreed]);
        for _ in 0..5 {
            b.push(Zone::Resource, CardToken::hidden(Card::TrapHole)).unwrap();
        }
        let blocked = w.score(&b.build());
        assert!(blocked < free);
    }

    #[test]
    fn test_stuck_traps_penalised() {
        let w = ScoreWeights::default();
        let mut b = StateBuilder::new(0);
        b.push(Zone::Resource, CardToken::hidden(Card::JarOfGreed)).unwrap();
        let turn_one = w.score(&b.clone().build());
        b.set_turn(2);
        let turn_two = w.score(&b.build());
        assert_eq!(turn_two.value() - turn_one.value(), -w.stuck_trap);
    }

    #[test]
    fn test_library_counters_add_up() {
        let w = ScoreWeights::default();
        let mut b = StateBuilder::new(0);
        b.push(Zone::Main, CardToken::library(2)).unwrap();
        b.set_life(0);
        let score = w.score(&b.build());
        assert_eq!(score.value(), w.library_on_field + 2.0 * w.library_counter);
    }

    #[test]
    fn test_from_json_partial() {
        let w = ScoreWeights::from_json(r#"{"piece_in_hand": 50.0, "hand": {"Wall": 7.0}}"#)
            .unwrap();
        assert_eq!(w.piece_in_hand, 50.0);
        assert_eq!(w.hand.get(&Card::Wall), Some(&7.0));
        assert_eq!(w.library_counter, ScoreWeights::default().library_counter);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ScoreWeights::from_json("{not json"),
            Err(SolverError::Config(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let w = ScoreWeights::default();
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(ScoreWeights::from_json(&json).unwrap(), w);
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::WIN.to_string(), "WIN");
        assert_eq!(Score::new(1.5).to_string(), "1.50");
    }
}
