//! The card action interface.
//!
//! Every card with something to do implements `CardAction`. The transition
//! generator asks an action for its legal targets, then resolves each one
//! into a builder. Actions never see the transition table or the scorer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardToken};
use crate::core::{GameState, StateBuilder};
use crate::error::Result;
use crate::zones::Zone;

/// The card instance an action is performed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Zone the card sits in.
    pub zone: Zone,
    /// Index within that zone (storage order).
    pub index: usize,
    /// The token at that position.
    pub token: CardToken,
}

impl Source {
    #[must_use]
    pub fn card(&self) -> Card {
        self.token.card()
    }
}

/// Everything an action needs to decide and resolve.
#[derive(Clone, Copy, Debug)]
pub struct ActionContext<'a> {
    pub state: &'a GameState,
    pub source: Source,
    /// May hidden-information choices be made with full knowledge?
    pub prescient: bool,
}

impl<'a> ActionContext<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, source: Source, prescient: bool) -> Self {
        Self {
            state,
            source,
            prescient,
        }
    }

    /// A builder cloned from the parent state.
    #[must_use]
    pub fn builder(&self) -> StateBuilder {
        self.state.to_builder()
    }
}

/// One way of resolving an action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The action has a single resolution.
    None,
    /// A card chosen by identity.
    Card(Card),
    /// A card to pay with, then a card to receive.
    Pair(Card, Card),
    /// A position counted from the top of the draw pile.
    Position(usize),
    /// A sub-multiset of cards, sorted.
    Cards(SmallVec<[Card; 8]>),
}

/// A card's behavior.
///
/// `legal_targets` returns every semantically distinct resolution the
/// current state allows; an empty vec means the card cannot act. Symmetric
/// targets may be left out, and redundant ones may be kept, since the
/// transition table collapses identical outcomes.
///
/// `resolve` must not assume anything `legal_targets` did not check. It
/// returns the mutated builder; the caller freezes it.
pub trait CardAction: Send + Sync {
    /// Legal targets for the source card in this context.
    fn legal_targets(&self, ctx: &ActionContext<'_>) -> Vec<Target>;

    /// Apply one resolution to a copy of the state.
    fn resolve(&self, ctx: &ActionContext<'_>, target: &Target) -> Result<StateBuilder>;
}
