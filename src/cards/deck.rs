//! Deck composition and card multisets.

use super::definition::Card;
use super::token::CardToken;

/// Cards in the deck.
pub const DECK_SIZE: usize = 40;

/// The full deck in canonical order, one entry per copy.
#[must_use]
pub fn deck_list() -> Vec<Card> {
    Card::ALL
        .iter()
        .flat_map(|&card| std::iter::repeat(card).take(usize::from(card.copies())))
        .collect()
}

/// A multiset of cards, counted per card identity.
///
/// Instance data (face-down flag, payloads) is ignored: two tokens of the
/// same card count as the same element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CardCounts([u8; Card::COUNT]);

impl CardCounts {
    /// An empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full deck composition.
    #[must_use]
    pub fn deck() -> Self {
        let mut counts = Self::new();
        for card in Card::ALL {
            counts.0[card as usize] = card.copies();
        }
        counts
    }

    /// Count the cards behind a sequence of tokens.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a CardToken>) -> Self {
        let mut counts = Self::new();
        for token in tokens {
            counts.add(token.card());
        }
        counts
    }

    /// Add one copy.
    pub fn add(&mut self, card: Card) {
        self.0[card as usize] = self.0[card as usize].saturating_add(1);
    }

    /// Remove one copy. Returns false if none was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let slot = &mut self.0[card as usize];
        if *slot == 0 {
            false
        } else {
            *slot -= 1;
            true
        }
    }

    /// Copies of `card` in the multiset.
    #[must_use]
    pub fn get(&self, card: Card) -> u8 {
        self.0[card as usize]
    }

    /// Does the multiset hold at least one `card`?
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.get(card) > 0
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|&n| usize::from(n)).sum()
    }

    /// Non-zero entries in canonical card order.
    pub fn iter(&self) -> impl Iterator<Item = (Card, u8)> + '_ {
        Card::ALL
            .iter()
            .map(move |&card| (card, self.get(card)))
            .filter(|&(_, n)| n > 0)
    }

    /// Expand back into a sorted card list.
    #[must_use]
    pub fn to_cards(&self) -> Vec<Card> {
        self.iter()
            .flat_map(|(card, n)| std::iter::repeat(card).take(usize::from(n)))
            .collect()
    }

    /// Merge another multiset into this one.
    pub fn extend(&mut self, other: &CardCounts) {
        for (card, n) in other.iter() {
            for _ in 0..n {
                self.add(card);
            }
        }
    }
}
