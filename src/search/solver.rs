//! The solver: owns the engine, the visited set and statistics.
//!
//! Generic over the rules engine. `solve` evaluates the root and hands off to
//! best-first search or discrepancy-bounded beam search depending on the
//! configured width.

use std::time::Instant;

use tracing::{debug, info};

use super::config::SearchConfig;
use super::outcome::{SearchOutcome, Solution};
use super::stats::SearchStats;
use super::visited::{Visit, VisitedSet};
use crate::error::Result;
use crate::rules::{RulesEngine, Successor};

/// A search invocation context.
///
/// Everything a search touches is owned here, so independent solvers can
/// run on separate threads without sharing anything.
pub struct Solver<E: RulesEngine> {
    pub(super) engine: E,
    pub(super) config: SearchConfig,
    pub(super) visited: VisitedSet,
    pub(super) stats: SearchStats,
}

impl<E: RulesEngine> Solver<E> {
    /// Create a solver. Fails if the configuration is unusable.
    pub fn new(engine: E, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let visited = VisitedSet::new(config.shard_capacity);
        Ok(Self {
            engine,
            config,
            visited,
            stats: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the last `solve`.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The visited set of the last `solve`.
    #[must_use]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Search for a win from `root`.
    pub fn solve(&mut self, root: E::State) -> Result<SearchOutcome> {
        let start = Instant::now();
        self.stats.reset();
        self.visited.clear();

        let mut state = root;
        let start_key = self.engine.key(&state);
        let score = self.engine.evaluate(&mut state)?;
        let key = self.engine.key(&state);
        debug!(key = %start_key, %score, "evaluated root");

        let outcome = if score.is_win() {
            self.visited.insert(key.clone(), Visit::Full);
            let mut path = vec![start_key.into_string()];
            if key.as_str() != path[0] {
                path.push(key.into_string());
            }
            SearchOutcome::Found(Solution {
                visited: self.visited.len(),
                path,
                trace: self.trace_of(&state),
            })
        } else {
            let root = Successor { key, state, score };
            match self.config.width {
                None => self.best_first(root)?,
                Some(width) => self.bulb(root, width)?,
            }
        };

        self.stats.time_us = start.elapsed().as_micros() as u64;
        info!(
            visited = outcome.visited(),
            result = outcome.label(),
            expanded = self.stats.expanded,
            time_us = self.stats.time_us,
            "search finished"
        );
        Ok(outcome)
    }

    /// Generate ranked children and record the expansion.
    pub(super) fn expand(
        &mut self,
        node: &Successor<E::State>,
        depth: usize,
    ) -> Result<Vec<Successor<E::State>>> {
        let children = self.engine.successors(&node.state, self.config.prescient)?;
        self.stats.expanded += 1;
        self.stats.record_depth(depth);
        tracing::trace!(key = %node.key, depth, children = children.len(), "expand");
        Ok(children)
    }

    /// Has the visited set grown past the cutoff?
    pub(super) fn over_cutoff(&self) -> bool {
        self.visited.len() > self.config.cutoff
    }

    pub(super) fn exhausted(&self) -> SearchOutcome {
        SearchOutcome::Exhausted {
            visited: self.visited.len(),
        }
    }

    pub(super) fn unreachable(&self) -> SearchOutcome {
        SearchOutcome::Unreachable {
            visited: self.visited.len(),
        }
    }

    /// Build the winning outcome from the chain of ancestors and the winner.
    pub(super) fn found<'a>(
        &self,
        ancestors: impl Iterator<Item = &'a Successor<E::State>>,
        winner: &Successor<E::State>,
    ) -> SearchOutcome
    where
        E::State: 'a,
    {
        let mut path: Vec<String> = ancestors.map(|n| n.key.as_str().to_string()).collect();
        path.push(winner.key.as_str().to_string());
        SearchOutcome::Found(Solution {
            visited: self.visited.len(),
            path,
            trace: self.trace_of(&winner.state),
        })
    }

    fn trace_of(&self, state: &E::State) -> Vec<String> {
        if self.config.trace {
            self.engine.trace(state)
        } else {
            Vec::new()
        }
    }
}
