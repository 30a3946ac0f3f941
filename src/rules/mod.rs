//! Rules: what the cards may do and how states are ranked.
//!
//! - `CardAction` / `ActionRegistry`: per-card behavior behind one interface
//! - `next` / `TransitionTable`: deduplicated, ranked successor generation
//! - `ScoreWeights` / `Score`: heuristic scoring from a weight table
//! - `is_won` / `is_terminal`: win detection with one-ply lookahead
//! - `RulesEngine` / `ComboRules`: the seam the search is generic over

pub mod action;
pub mod engine;
pub mod registry;
pub mod scorer;
pub mod terminal;
pub mod transition;

pub use action::{ActionContext, CardAction, Source, Target};
pub use engine::{ComboRules, RulesEngine};
pub use registry::ActionRegistry;
pub use scorer::{Score, ScoreWeights};
pub use terminal::{is_terminal, is_won};
pub use transition::{next, rank, Successor, TransitionTable};
