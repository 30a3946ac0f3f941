//! Search results.
//!
//! On the wire an outcome is a flat object:
//!
//! ```text
//! {"visited": 12, "path": [...], "trace": [...]}   found
//! {"visited": 12}                                   unreachable
//! {"visited": 12, "exhausted": true}                cutoff hit
//! ```

use serde::{Deserialize, Serialize};

/// A winning line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Distinct states visited.
    pub visited: usize,
    /// State encodings from the start to the win, inclusive.
    pub path: Vec<String>,
    /// Human-readable description of the actions taken.
    pub trace: Vec<String>,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Wire", try_from = "Wire")]
pub enum SearchOutcome {
    /// A win was found.
    Found(Solution),
    /// Every reachable state was explored without a win.
    Unreachable { visited: usize },
    /// The visited-state cutoff was exceeded.
    Exhausted { visited: usize },
}

impl SearchOutcome {
    /// Distinct states visited.
    #[must_use]
    pub fn visited(&self) -> usize {
        match self {
            SearchOutcome::Found(solution) => solution.visited,
            SearchOutcome::Unreachable { visited } | SearchOutcome::Exhausted { visited } => {
                *visited
            }
        }
    }

    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, SearchOutcome::Exhausted { .. })
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Found(_) => "found",
            SearchOutcome::Unreachable { .. } => "unreachable",
            SearchOutcome::Exhausted { .. } => "exhausted",
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Wire {
    visited: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    exhausted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<String>>,
}

impl From<SearchOutcome> for Wire {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found(Solution {
                visited,
                path,
                trace,
            }) => Wire {
                visited,
                exhausted: false,
                path: Some(path),
                trace: Some(trace),
            },
            SearchOutcome::Unreachable { visited } => Wire {
                visited,
                exhausted: false,
                path: None,
                trace: None,
            },
            SearchOutcome::Exhausted { visited } => Wire {
                visited,
                exhausted: true,
                path: None,
                trace: None,
            },
        }
    }
}

impl TryFrom<Wire> for SearchOutcome {
    type Error = String;

    fn try_from(wire: Wire) -> Result<Self, Self::Error> {
        match (wire.exhausted, wire.path) {
            (true, Some(_)) => Err("an exhausted search has no path".to_string()),
            (true, None) => Ok(SearchOutcome::Exhausted {
                visited: wire.visited,
            }),
            (false, Some(path)) => Ok(SearchOutcome::Found(Solution {
                visited: wire.visited,
                path,
                trace: wire.trace.unwrap_or_default(),
            })),
            (false, None) => Ok(SearchOutcome::Unreachable {
                visited: wire.visited,
            }),
        }
    }
}
