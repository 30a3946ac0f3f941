//! Beam search using limited discrepancy backtracking (BULB).
//!
//! Each node's ranked children are split into a first slice of the
//! configured width and the rest. Round `d` explores the first slice of
//! every node with the node's budget, and spends one discrepancy to explore
//! the rest with one less. Rounds run for `d = 0, 1, 2, ...` until a win is
//! found or the root is fully visited.
//!
//! A node becomes `Visit::Full` once all its children are full; later rounds
//! skip it outright. A node entered in the current round with at least the
//! requested budget is skipped too, so a round never explores a state twice.

use tracing::debug;

use super::config::Width;
use super::outcome::SearchOutcome;
use super::solver::Solver;
use super::visited::Visit;
use crate::error::Result;
use crate::rules::{RulesEngine, Successor};

struct Frame<S> {
    node: Successor<S>,
    children: Vec<Successor<S>>,
    next: usize,
    slice: usize,
    budget: u32,
    all_full: bool,
}

/// What a frame wants to do next.
enum Step<S> {
    Enter(Successor<S>, u32),
    Leave,
}

impl<E: RulesEngine> Solver<E> {
    pub(super) fn bulb(&mut self, root: Successor<E::State>, width: Width) -> Result<SearchOutcome> {
        let mut round: u32 = 0;
        loop {
            self.stats.rounds = round + 1;
            debug!(round, visited = self.visited.len(), "discrepancy round");

            if let Some(outcome) = self.bulb_round(&root, width, round)? {
                return Ok(outcome);
            }
            if self.visited.get(&root.key) == Some(Visit::Full) {
                return Ok(self.unreachable());
            }
            round += 1;
        }
    }

    /// One round from the root with `round` discrepancies.
    ///
    /// Returns `Some` when the search is over (win or cutoff).
    fn bulb_round(
        &mut self,
        root: &Successor<E::State>,
        width: Width,
        round: u32,
    ) -> Result<Option<SearchOutcome>> {
        let mut stack: Vec<Frame<E::State>> = Vec::new();
        if let Some(outcome) = self.bulb_enter(&mut stack, root.clone(), round, round, width)? {
            return Ok(Some(outcome));
        }

        while let Some(frame) = stack.last_mut() {
            let step = loop {
                if frame.next >= frame.children.len() {
                    break Step::Leave;
                }
                let index = frame.next;
                frame.next += 1;

                let budget = if index < frame.slice {
                    frame.budget
                } else if frame.budget > 0 {
                    frame.budget - 1
                } else {
                    // No discrepancy left for the rest of the children.
                    frame.next = frame.children.len();
                    frame.all_full = false;
                    break Step::Leave;
                };

                let child = &frame.children[index];
                match self.visited.get(&child.key) {
                    Some(Visit::Full) => {}
                    Some(Visit::Partial { round: r, budget: b }) if r == round && b >= budget => {
                        frame.all_full = false;
                    }
                    _ => break Step::Enter(child.clone(), budget),
                }
            };

            match step {
                Step::Enter(child, budget) => {
                    if let Some(outcome) = self.bulb_enter(&mut stack, child, budget, round, width)? {
                        return Ok(Some(outcome));
                    }
                }
                Step::Leave => {
                    let Some(done) = stack.pop() else { break };
                    let visit = if done.all_full {
                        Visit::Full
                    } else {
                        Visit::Partial {
                            round,
                            budget: done.budget,
                        }
                    };
                    self.visited.insert(done.node.key, visit);
                    self.stats.backtracks += 1;
                    if let Some(parent) = stack.last_mut() {
                        parent.all_full &= visit == Visit::Full;
                    }
                }
            }
        }
        Ok(None)
    }

    /// Mark `node` visited, expand it and push its frame.
    ///
    /// A node without children is full as soon as it is entered.
    fn bulb_enter(
        &mut self,
        stack: &mut Vec<Frame<E::State>>,
        node: Successor<E::State>,
        budget: u32,
        round: u32,
        width: Width,
    ) -> Result<Option<SearchOutcome>> {
        self.visited
            .insert(node.key.clone(), Visit::Partial { round, budget });
        if self.over_cutoff() {
            return Ok(Some(self.exhausted()));
        }

        let children = self.expand(&node, stack.len())?;
        if let Some(winner) = children.iter().find(|c| c.score.is_win()) {
            let ancestors = stack.iter().map(|f| &f.node).chain(std::iter::once(&node));
            return Ok(Some(self.found(ancestors, winner)));
        }

        let slice = width.first_slice(children.len());
        stack.push(Frame {
            node,
            children,
            next: 0,
            slice,
            budget,
            all_full: true,
        });
        Ok(None)
    }
}
