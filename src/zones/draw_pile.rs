//! The draw pile: an ordered zone with a reversible top.
//!
//! Cards are stored in a `Vec` where, in the normal orientation, the top of
//! the pile is the end of the vec. When the pile is turned upside down the
//! `reversed` flag flips and the top becomes index 0; the storage itself is
//! not reordered.
//!
//! Knowledge is tracked per token with the hidden flag. The player can only
//! ever know a run of cards adjacent to the top (cards they watched being
//! placed there, or the face-up top of a reversed pile), so the pile always
//! reads unknown*, known* going from bottom to top.

use serde::{Deserialize, Serialize};

use crate::cards::CardToken;
use crate::core::GameRng;

/// End of the draw pile to operate on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilePosition {
    /// The end cards are drawn from.
    Top,
    /// The opposite end.
    Bottom,
}

/// Ordered draw pile with a reversed flag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawPile {
    cards: Vec<CardToken>,
    reversed: bool,
}

impl DrawPile {
    /// Create a pile from storage-order tokens.
    #[must_use]
    pub fn new(cards: Vec<CardToken>, reversed: bool) -> Self {
        Self { cards, reversed }
    }

    /// Tokens in storage order.
    #[must_use]
    pub fn as_slice(&self) -> &[CardToken] {
        &self.cards
    }

    /// Is the pile upside down?
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Tokens from top to bottom.
    pub fn iter_from_top(&self) -> Box<dyn Iterator<Item = &CardToken> + '_> {
        if self.reversed {
            Box::new(self.cards.iter())
        } else {
            Box::new(self.cards.iter().rev())
        }
    }

    /// The top token, if any.
    #[must_use]
    pub fn top(&self) -> Option<&CardToken> {
        if self.reversed {
            self.cards.first()
        } else {
            self.cards.last()
        }
    }

    /// Is the top card known to the player?
    #[must_use]
    pub fn is_top_known(&self) -> bool {
        self.top().is_some_and(|t| !t.is_hidden())
    }

    /// Remove and return the top token.
    ///
    /// On a reversed pile the next card is face-up once exposed, so it
    /// becomes known.
    pub fn pop_top(&mut self) -> Option<CardToken> {
        let token = if self.reversed {
            if self.cards.is_empty() {
                None
            } else {
                Some(self.cards.remove(0))
            }
        } else {
            self.cards.pop()
        };
        if self.reversed {
            self.reveal_top();
        }
        token
    }

    /// Place a token at one end of the pile.
    pub fn push(&mut self, token: CardToken, position: PilePosition) {
        let at_end = match position {
            PilePosition::Top => !self.reversed,
            PilePosition::Bottom => self.reversed,
        };
        if at_end {
            self.cards.push(token);
        } else {
            self.cards.insert(0, token);
        }
    }

    /// Mark the top card as known.
    pub fn reveal_top(&mut self) {
        let top = if self.reversed {
            self.cards.first_mut()
        } else {
            self.cards.last_mut()
        };
        if let Some(token) = top {
            *token = token.revealed();
        }
    }

    /// Forget every card's identity.
    pub fn conceal_all(&mut self) {
        for token in &mut self.cards {
            *token = token.concealed();
        }
    }

    /// Turn the pile upside down.
    ///
    /// The player loses track of the cards that were on top (they are now at
    /// the bottom, face-down) and sees the new top card face-up.
    pub fn flip(&mut self) {
        self.reversed = !self.reversed;
        self.conceal_all();
        if self.reversed {
            self.reveal_top();
        }
    }

    /// Shuffle the pile in place. Every card becomes unknown except the
    /// face-up top of a reversed pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        self.conceal_all();
        rng.shuffle(&mut self.cards);
        if self.reversed {
            self.reveal_top();
        }
    }

    /// Number of known cards on top of the pile.
    #[must_use]
    pub fn known_on_top(&self) -> usize {
        self.iter_from_top().take_while(|t| !t.is_hidden()).count()
    }

    /// Does the pile read unknown*, known* from bottom to top?
    #[must_use]
    pub fn has_single_known_segment(&self) -> bool {
        let known = self.known_on_top();
        self.iter_from_top().skip(known).all(|t| t.is_hidden())
    }
}
