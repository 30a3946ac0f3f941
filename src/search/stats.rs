//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during a search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States whose successors were generated.
    pub expanded: u64,

    /// Nodes left with no unexplored child.
    pub backtracks: u64,

    /// Deepest stack reached.
    pub max_depth: usize,

    /// Discrepancy rounds run (beam search only).
    pub rounds: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate expansions per second.
    #[must_use]
    pub fn expansions_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.expanded as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    pub(crate) fn record_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }
}
