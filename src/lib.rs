//! # ftk-search
//!
//! State-space search for first-turn combo wins in a single-player card game.
//!
//! Given a dealt hand, the solver explores every legal line of play looking
//! for one that assembles all five sealed pieces in hand, and reports that
//! line or proves none exists within the explored space.
//!
//! ## Design Principles
//!
//! 1. **The encoding is the identity**: two states are the same search node
//!    iff their canonical encodings are equal. Unordered zones are kept
//!    sorted so play order never splits a node.
//!
//! 2. **Build, then freeze**: successors are produced by mutating a
//!    `StateBuilder` and freezing it once. Frozen states are immutable.
//!
//! 3. **Cards behind one trait**: every card's behavior is a `CardAction`
//!    in a registry; successor generation knows nothing about card text.
//!
//! 4. **Bounded stack**: both search algorithms run on explicit frame
//!    stacks, whatever the depth of the game tree.
//!
//! ## Modules
//!
//! - `core`: State, builder, canonical codec, RNG, invariant checks
//! - `zones`: Zone identifiers and the reversible draw pile
//! - `cards`: Card catalog, tokens and deck composition
//! - `rules`: Action trait, successor generation, scoring, win detection
//! - `effects`: The action of every card in the deck
//! - `search`: Best-first and BULB search over a sharded visited set
//! - `error`: Error types

pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod search;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{decode, encode, verify, GameRng, GameState, StateBuilder, StateKey};

pub use crate::zones::{DrawPile, PilePosition, Zone};

pub use crate::cards::{Card, CardCounts, CardDefinition, CardKind, CardToken};

pub use crate::rules::{
    ActionContext, ActionRegistry, CardAction, ComboRules, RulesEngine, Score, ScoreWeights,
    Source, Successor, Target, TransitionTable,
};

pub use crate::error::{CodecError, Result, SolverError};

pub use crate::search::{
    search, search_with, SearchConfig, SearchOutcome, SearchStats, Solution, Solver, Visit,
    VisitedSet, Width,
};
