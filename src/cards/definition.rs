//! Card identities and the static catalog.
//!
//! `Card` identifies one of the distinct cards the deck is built from.
//! The catalog data (display name, kind, rules text, copies in the deck)
//! is static and only consumed by trace formatting and external tooling;
//! search logic never reads the rules text.

use serde::{Deserialize, Serialize};

/// Broad card category. Decides which zone a card is deployed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Deployed to the main zone.
    Monster,
    /// Activated from hand through a free resource slot.
    Spell,
    /// Set face-down into the resource zone.
    Trap,
}

/// Identifier for one of the distinct cards in the deck.
///
/// The declaration order is the canonical token order used to sort zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Exodia,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Library,
    Wall,
    Upstart,
    PotOfGreed,
    Tithe,
    Desires,
    Destruction,
    Mallet,
    Recall,
    Burial,
    Cache,
    Scroll,
    JarOfGreed,
    TrapHole,
}

/// Static catalog entry for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CardDefinition {
    /// The card this entry describes.
    pub card: Card,
    /// Single-character symbol used in state encodings.
    pub symbol: char,
    /// Display name.
    pub name: &'static str,
    /// Card category.
    pub kind: CardKind,
    /// Copies in the 40-card deck.
    pub copies: u8,
    /// Rules text as printed.
    pub text: &'static str,
}

const CATALOG: [CardDefinition; Card::COUNT] = [
    CardDefinition {
        card: Card::Exodia,
        symbol: 'E',
        name: "Exodia the Forbidden One",
        kind: CardKind::Monster,
        copies: 1,
        text: "If you have all five sealed pieces in your hand, you win the duel.",
    },
    CardDefinition {
        card: Card::LeftArm,
        symbol: 'L',
        name: "Left Arm of the Forbidden One",
        kind: CardKind::Monster,
        copies: 1,
        text: "A forbidden left arm sealed by magic.",
    },
    CardDefinition {
        card: Card::RightArm,
        symbol: 'R',
        name: "Right Arm of the Forbidden One",
        kind: CardKind::Monster,
        copies: 1,
        text: "A forbidden right arm sealed by magic.",
    },
    CardDefinition {
        card: Card::LeftLeg,
        symbol: 'F',
        name: "Left Leg of the Forbidden One",
        kind: CardKind::Monster,
        copies: 1,
        text: "A forbidden left leg sealed by magic.",
    },
    CardDefinition {
        card: Card::RightLeg,
        symbol: 'G',
        name: "Right Leg of the Forbidden One",
        kind: CardKind::Monster,
        copies: 1,
        text: "A forbidden right leg sealed by magic.",
    },
    CardDefinition {
        card: Card::Library,
        symbol: 'M',
        name: "Royal Magical Library",
        kind: CardKind::Monster,
        copies: 3,
        text: "Each time a Spell Card is activated, place 1 Spell Counter on this card \
               (max. 3). You can remove 3 Spell Counters from this card; draw 1 card.",
    },
    CardDefinition {
        card: Card::Wall,
        symbol: 'W',
        name: "Wall of Illusion",
        kind: CardKind::Monster,
        copies: 3,
        text: "A wall that returns attacking monsters to their owner's hand.",
    },
    CardDefinition {
        card: Card::Upstart,
        symbol: 'U',
        name: "Upstart Goblin",
        kind: CardKind::Spell,
        copies: 3,
        text: "Draw 1 card, then your opponent gains 1000 LP.",
    },
    CardDefinition {
        card: Card::PotOfGreed,
        symbol: 'P',
        name: "Pot of Greed",
        kind: CardKind::Spell,
        copies: 1,
        text: "Draw 2 cards.",
    },
    CardDefinition {
        card: Card::Tithe,
        symbol: 'T',
        name: "Tithe of Blood",
        kind: CardKind::Spell,
        copies: 3,
        text: "Pay 1000 LP; draw 1 card.",
    },
    CardDefinition {
        card: Card::Desires,
        symbol: 'D',
        name: "Pot of Desires",
        kind: CardKind::Spell,
        copies: 2,
        text: "Banish 10 cards from the top of your Deck, face-down; draw 2 cards.",
    },
    CardDefinition {
        card: Card::Destruction,
        symbol: 'C',
        name: "Card Destruction",
        kind: CardKind::Spell,
        copies: 2,
        text: "Discard your entire hand, then draw the same number of cards you discarded.",
    },
    CardDefinition {
        card: Card::Mallet,
        symbol: 'H',
        name: "Magical Mallet",
        kind: CardKind::Spell,
        copies: 2,
        text: "Shuffle any number of cards from your hand into the Deck, \
               then draw the same number of cards.",
    },
    CardDefinition {
        card: Card::Recall,
        symbol: 'N',
        name: "Grave Recall",
        kind: CardKind::Spell,
        copies: 3,
        text: "Discard 1 card; add 1 monster from your discard pile to your hand.",
    },
    CardDefinition {
        card: Card::Burial,
        symbol: 'B',
        name: "Premature Burial",
        kind: CardKind::Spell,
        copies: 2,
        text: "Pay 800 LP; Special Summon 1 monster from your discard pile and \
               equip it with this card.",
    },
    CardDefinition {
        card: Card::Cache,
        symbol: 'K',
        name: "Sealed Cache",
        kind: CardKind::Spell,
        copies: 3,
        text: "Take the top 3 cards of your Deck without looking at them. Add 1 to your \
               hand and place the others on the bottom of the Deck.",
    },
    CardDefinition {
        card: Card::Scroll,
        symbol: 'I',
        name: "Inverted Scroll",
        kind: CardKind::Spell,
        copies: 2,
        text: "Turn your Deck upside down.",
    },
    CardDefinition {
        card: Card::JarOfGreed,
        symbol: 'J',
        name: "Jar of Greed",
        kind: CardKind::Trap,
        copies: 3,
        text: "Draw 1 card.",
    },
    CardDefinition {
        card: Card::TrapHole,
        symbol: 'X',
        name: "Bottomless Trap Hole",
        kind: CardKind::Trap,
        copies: 3,
        text: "When your opponent Summons a monster with 1500 or more ATK: \
               destroy and banish it.",
    },
];

impl Card {
    /// Number of distinct cards.
    pub const COUNT: usize = 19;

    /// Every card, in canonical order.
    pub const ALL: [Card; Card::COUNT] = [
        Card::Exodia,
        Card::LeftArm,
        Card::RightArm,
        Card::LeftLeg,
        Card::RightLeg,
        Card::Library,
        Card::Wall,
        Card::Upstart,
        Card::PotOfGreed,
        Card::Tithe,
        Card::Desires,
        Card::Destruction,
        Card::Mallet,
        Card::Recall,
        Card::Burial,
        Card::Cache,
        Card::Scroll,
        Card::JarOfGreed,
        Card::TrapHole,
    ];

    /// The five sealed pieces that make up the win condition.
    pub const PIECES: [Card; 5] = [
        Card::Exodia,
        Card::LeftArm,
        Card::RightArm,
        Card::LeftLeg,
        Card::RightLeg,
    ];

    /// Catalog entry for this card.
    #[must_use]
    pub fn definition(self) -> &'static CardDefinition {
        &CATALOG[self as usize]
    }

    /// Encoding symbol.
    #[must_use]
    pub fn symbol(self) -> char {
        self.definition().symbol
    }

    /// Look up a card by its encoding symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Card> {
        CATALOG.iter().find(|d| d.symbol == symbol).map(|d| d.card)
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Card category.
    #[must_use]
    pub fn kind(self) -> CardKind {
        self.definition().kind
    }

    /// Copies of this card in the deck.
    #[must_use]
    pub fn copies(self) -> u8 {
        self.definition().copies
    }

    /// Is this one of the five sealed pieces?
    #[must_use]
    pub fn is_piece(self) -> bool {
        Card::PIECES.contains(&self)
    }

    #[must_use]
    pub fn is_monster(self) -> bool {
        self.kind() == CardKind::Monster
    }

    #[must_use]
    pub fn is_spell(self) -> bool {
        self.kind() == CardKind::Spell
    }

    #[must_use]
    pub fn is_trap(self) -> bool {
        self.kind() == CardKind::Trap
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_declaration_order() {
        for (i, card) in Card::ALL.iter().enumerate() {
            assert_eq!(*card as usize, i);
            assert_eq!(card.definition().card, *card);
        }
    }

    #[test]
    fn test_symbols_are_unique() {
        for card in Card::ALL {
            assert_eq!(Card::from_symbol(card.symbol()), Some(card));
        }
        assert_eq!(Card::from_symbol('?'), None);
        assert_eq!(Card::from_symbol('3'), None);
    }

    #[test]
    fn test_deck_has_forty_cards() {
        let total: u32 = Card::ALL.iter().map(|c| u32::from(c.copies())).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn test_pieces() {
        assert!(Card::Exodia.is_piece());
        assert!(Card::RightLeg.is_piece());
        assert!(!Card::Library.is_piece());
        assert!(Card::PIECES.iter().all(|c| c.is_monster() && c.copies() == 1));
    }

    #[test]
    fn test_kinds() {
        assert!(Card::Library.is_monster());
        assert!(Card::Mallet.is_spell());
        assert!(Card::JarOfGreed.is_trap());
        assert_eq!(format!("{}", Card::PotOfGreed), "Pot of Greed");
    }

    #[test]
    fn test_card_serialization() {
        let json = serde_json::to_string(&Card::Library).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Card::Library);
    }
}
