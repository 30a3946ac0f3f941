//! Action registry for card behavior lookup.
//!
//! The `ActionRegistry` maps each card to the action it performs. Cards with
//! no entry (the sealed pieces) are never actionable.

use rustc_hash::FxHashMap;

use super::action::CardAction;
use crate::cards::Card;

/// Registry of card actions.
///
/// ## Example
///
/// ```
/// use ftk_search::cards::Card;
/// use ftk_search::rules::ActionRegistry;
///
/// let registry = ActionRegistry::standard();
/// assert!(registry.get(Card::PotOfGreed).is_some());
/// assert!(registry.get(Card::Exodia).is_none());
/// ```
#[derive(Default)]
pub struct ActionRegistry {
    actions: FxHashMap<Card, Box<dyn CardAction>>,
}

impl ActionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every card of the deck wired to its action.
    #[must_use]
    pub fn standard() -> Self {
        crate::effects::standard_registry()
    }

    /// Register an action, returning the one it replaces.
    pub fn register(
        &mut self,
        card: Card,
        action: impl CardAction + 'static,
    ) -> Option<Box<dyn CardAction>> {
        self.actions.insert(card, Box::new(action))
    }

    /// Get a card's action.
    #[must_use]
    pub fn get(&self, card: Card) -> Option<&dyn CardAction> {
        self.actions.get(&card).map(|a| a.as_ref())
    }

    /// Check if a card has an action.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.actions.contains_key(&card)
    }

    /// Get the number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Cards with an action, in canonical order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        Card::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.cards()).finish()
    }
}
