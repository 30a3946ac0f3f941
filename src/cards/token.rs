//! Card tokens - a card in a zone plus its per-instance state.
//!
//! A `CardToken` is a `Card` with two optional pieces of instance data:
//! - a face-down / unknown flag
//! - a small integer payload (spell counters on a Library, or the main-zone
//!   index a Premature Burial is attached to)
//!
//! Tokens are `Copy` and totally ordered so that unordered zones can be kept
//! sorted. Two states that differ only in the order cards entered an
//! unordered zone therefore collapse to one encoding.

use serde::{Deserialize, Serialize};

use super::definition::Card;

/// Maximum spell counters a Royal Magical Library can hold.
pub const LIBRARY_MAX_COUNTERS: u8 = 3;

/// A card instance inside a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardToken {
    card: Card,
    hidden: bool,
    payload: Option<u8>,
}

impl CardToken {
    /// A face-up token with no payload.
    #[must_use]
    pub const fn new(card: Card) -> Self {
        Self {
            card,
            hidden: false,
            payload: None,
        }
    }

    /// A face-down (unknown) token.
    #[must_use]
    pub const fn hidden(card: Card) -> Self {
        Self {
            card,
            hidden: true,
            payload: None,
        }
    }

    /// A face-up token carrying a payload.
    #[must_use]
    pub const fn with_payload(card: Card, payload: u8) -> Self {
        Self {
            card,
            hidden: false,
            payload: Some(payload),
        }
    }

    /// A Library carrying `counters` spell counters.
    ///
    /// Zero counters is stored as no payload so the encoding stays canonical.
    #[must_use]
    pub fn library(counters: u8) -> Self {
        if counters == 0 {
            Self::new(Card::Library)
        } else {
            Self::with_payload(Card::Library, counters)
        }
    }

    /// The card this token represents.
    #[must_use]
    pub const fn card(self) -> Card {
        self.card
    }

    /// Is this token face-down / unknown?
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        self.hidden
    }

    /// Raw payload value.
    #[must_use]
    pub const fn payload(self) -> Option<u8> {
        self.payload
    }

    /// Spell counters on this token (0 when it carries none).
    #[must_use]
    pub fn counters(self) -> u8 {
        if self.card == Card::Library {
            self.payload.unwrap_or(0)
        } else {
            0
        }
    }

    /// The same card, face-up.
    #[must_use]
    pub const fn revealed(self) -> Self {
        Self {
            hidden: false,
            ..self
        }
    }

    /// The same card, face-down with its payload dropped.
    #[must_use]
    pub const fn concealed(self) -> Self {
        Self {
            card: self.card,
            hidden: true,
            payload: None,
        }
    }

    /// A plain face-up copy: no payload, not hidden.
    ///
    /// Used whenever a card leaves the field and loses its instance state.
    #[must_use]
    pub const fn plain(self) -> Self {
        Self::new(self.card)
    }

    /// Replace the payload.
    #[must_use]
    pub const fn with(self, payload: Option<u8>) -> Self {
        Self { payload, ..self }
    }
}

impl From<Card> for CardToken {
    fn from(card: Card) -> Self {
        Self::new(card)
    }
}
