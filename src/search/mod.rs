//! State-space search for a winning line.
//!
//! ## Overview
//!
//! Two algorithms share one sharded visited set:
//!
//! - **Best-first**: depth-first over rank-ordered children, every state
//!   expanded at most once. Selected when no width is configured.
//! - **BULB**: discrepancy-bounded beam search. Each round widens the
//!   search by one discrepancy until a win is found or the root is proven
//!   fully explored.
//!
//! Hitting the visited-state cutoff is an outcome, not an error.
//!
//! ## Usage
//!
//! ```rust
//! use ftk_search::core::{encode, GameState};
//! use ftk_search::search::{search, SearchConfig, Width};
//!
//! let start = encode(&GameState::deal(7));
//! let config = SearchConfig::default()
//!     .with_cutoff(200)
//!     .with_width(Some(Width::Count(2)));
//!
//! let outcome = search(&start, &config).unwrap();
//! if let Some(solution) = outcome.solution() {
//!     assert_eq!(solution.path[0], start);
//! }
//! ```

pub mod best_first;
pub mod bulb;
pub mod config;
pub mod outcome;
pub mod solver;
pub mod stats;
pub mod visited;

pub use config::{SearchConfig, Width};
pub use outcome::{SearchOutcome, Solution};
pub use solver::Solver;
pub use stats::SearchStats;
pub use visited::{Visit, VisitedSet};

use crate::core::{decode, verify};
use crate::error::Result;
use crate::rules::ComboRules;

/// Search from an encoded state with the standard rules.
pub fn search(encoding: &str, config: &SearchConfig) -> Result<SearchOutcome> {
    search_with(ComboRules::new(), encoding, config)
}

/// Search from an encoded state with custom rules.
///
/// When the rules verify their states, the decoded start is verified too.
pub fn search_with(rules: ComboRules, encoding: &str, config: &SearchConfig) -> Result<SearchOutcome> {
    let mut state = decode(encoding)?;
    if rules.verifies() {
        verify(&state)?;
    }
    if config.trace {
        state = state.with_trace();
    }
    Solver::new(rules, config.clone())?.solve(state)
}
