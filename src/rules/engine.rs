//! Rules engine trait and the combo rules implementation.
//!
//! The search algorithms are generic over `RulesEngine`:
//! - ordered successors of a state
//! - the canonical key of a state
//! - terminal evaluation (which may rewrite the state)
//! - the display trace of a state
//!
//! The search never interprets game-specific concepts directly.

use super::registry::ActionRegistry;
use super::scorer::{Score, ScoreWeights};
use super::terminal::is_terminal;
use super::transition::{next, Successor};
use crate::core::{verify, GameState, StateBuilder, StateKey};
use crate::error::Result;

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `successors`: Return empty if the state cannot act; must be ranked
///   best first and free of duplicate keys
/// - `evaluate`: Must return `Score::WIN` iff the state is won, and may
///   replace the state with a proven winning descendant
/// - Everything must be deterministic so searches are reproducible
pub trait RulesEngine {
    /// State type the engine operates on.
    type State: Clone;

    /// Ranked, deduplicated successors.
    fn successors(&self, state: &Self::State, prescient: bool) -> Result<Vec<Successor<Self::State>>>;

    /// Canonical key of a state.
    fn key(&self, state: &Self::State) -> StateKey;

    /// Score a state, detecting wins.
    fn evaluate(&self, state: &mut Self::State) -> Result<Score>;

    /// Human-readable log of how the state was reached.
    fn trace(&self, state: &Self::State) -> Vec<String>;
}

/// Rules for the sealed-pieces combo deck.
///
/// ```
/// use ftk_search::rules::{ComboRules, ScoreWeights};
///
/// let rules = ComboRules::new()
///     .with_weights(ScoreWeights::default())
///     .with_lookahead(true)
///     .with_verify(false);
/// assert!(rules.lookahead());
/// ```
#[derive(Debug)]
pub struct ComboRules {
    registry: ActionRegistry,
    weights: ScoreWeights,
    lookahead: bool,
    verify: bool,
}

impl Default for ComboRules {
    fn default() -> Self {
        Self::new()
    }
}

impl ComboRules {
    /// Standard actions, default weights, lookahead on, verification off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ActionRegistry::standard(),
            weights: ScoreWeights::default(),
            lookahead: true,
            verify: false,
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_lookahead(mut self, lookahead: bool) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Check structural invariants on every frozen successor.
    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    #[must_use]
    pub fn lookahead(&self) -> bool {
        self.lookahead
    }

    #[must_use]
    pub fn verifies(&self) -> bool {
        self.verify
    }

    /// Heuristic score without terminal lookahead.
    #[must_use]
    pub fn score(&self, state: &GameState) -> Score {
        self.weights.score(state)
    }

    /// Terminal check with this engine's lookahead setting.
    pub fn is_terminal(&self, state: &mut GameState) -> Result<bool> {
        is_terminal(state, &self.registry, self.lookahead)
    }

    /// Ranked successors of `state`.
    pub fn next(&self, state: &GameState, prescient: bool) -> Result<Vec<Successor>> {
        next(self, state, prescient)
    }

    /// Build, optionally verify, evaluate and key a state.
    pub fn freeze(&self, builder: StateBuilder) -> Result<Successor> {
        let mut state = builder.build();
        if self.verify {
            verify(&state)?;
        }
        let score = self.evaluate(&mut state)?;
        Ok(Successor {
            key: StateKey::of(&state),
            state,
            score,
        })
    }
}

impl RulesEngine for ComboRules {
    type State = GameState;

    fn successors(&self, state: &GameState, prescient: bool) -> Result<Vec<Successor>> {
        self.next(state, prescient)
    }

    fn key(&self, state: &GameState) -> StateKey {
        StateKey::of(state)
    }

    fn evaluate(&self, state: &mut GameState) -> Result<Score> {
        if self.is_terminal(state)? {
            Ok(Score::WIN)
        } else {
            Ok(self.score(state))
        }
    }

    fn trace(&self, state: &GameState) -> Vec<String> {
        state.trace().cloned().collect()
    }
}
