//! Best-first exhaustive search.
//!
//! A depth-first probe that visits children in rank order. Each node is
//! marked visited on entry and stays marked after backtracking, so no state
//! is expanded twice. The first child scoring `Score::WIN` ends the search.
//!
//! The probe runs on an explicit stack of frames; game-tree depth never
//! touches the call stack.

use std::iter;
use std::vec;

use super::outcome::SearchOutcome;
use super::solver::Solver;
use super::visited::Visit;
use crate::error::Result;
use crate::rules::{RulesEngine, Successor};

struct Frame<S> {
    node: Successor<S>,
    children: vec::IntoIter<Successor<S>>,
}

impl<E: RulesEngine> Solver<E> {
    pub(super) fn best_first(&mut self, root: Successor<E::State>) -> Result<SearchOutcome> {
        let mut stack: Vec<Frame<E::State>> = Vec::new();
        let mut pending = Some(root);

        loop {
            if let Some(node) = pending.take() {
                self.visited.insert(node.key.clone(), Visit::Full);
                if self.over_cutoff() {
                    return Ok(self.exhausted());
                }

                let children = self.expand(&node, stack.len())?;
                if let Some(winner) = children.iter().find(|c| c.score.is_win()) {
                    let ancestors = stack.iter().map(|f| &f.node).chain(iter::once(&node));
                    return Ok(self.found(ancestors, winner));
                }
                stack.push(Frame {
                    node,
                    children: children.into_iter(),
                });
            }

            let Some(frame) = stack.last_mut() else {
                return Ok(self.unreachable());
            };
            let visited = &self.visited;
            match frame.children.find(|c| !visited.contains(&c.key)) {
                Some(child) => pending = Some(child),
                None => {
                    stack.pop();
                    self.stats.backtracks += 1;
                }
            }
        }
    }
}
