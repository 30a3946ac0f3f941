//! Card actions for the combo deck.
//!
//! Each family of cards gets one `CardAction` implementation:
//! - `draw`: fixed draws, Pot of Desires, Card Destruction, Magical Mallet
//! - `monster`: normal summon and the Library's counter draw
//! - `graveyard`: Grave Recall and Premature Burial
//! - `deck`: Sealed Cache and Inverted Scroll
//! - `trap`: setting and flipping traps
//!
//! `standard_registry` wires every card of the deck to its action.

pub mod deck;
pub mod draw;
pub mod graveyard;
pub mod monster;
mod spell;
pub mod trap;

pub use deck::{Cache, Scroll};
pub use draw::{Desires, Destruction, DrawSpell, Mallet};
pub use graveyard::{Burial, Recall};
pub use monster::{Library, NormalSummon};
pub use trap::SetTrap;

use crate::cards::Card;
use crate::rules::ActionRegistry;

/// Life points Tithe of Blood costs.
pub const TITHE_COST: i32 = 1000;

/// Registry with the standard action of every card.
#[must_use]
pub fn standard_registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(Card::Library, Library);
    registry.register(Card::Wall, NormalSummon);
    registry.register(Card::Upstart, DrawSpell::new(1));
    registry.register(Card::PotOfGreed, DrawSpell::new(2));
    registry.register(Card::Tithe, DrawSpell::new(1).with_cost(TITHE_COST));
    registry.register(Card::Desires, Desires);
    registry.register(Card::Destruction, Destruction);
    registry.register(Card::Mallet, Mallet);
    registry.register(Card::Recall, Recall);
    registry.register(Card::Burial, Burial);
    registry.register(Card::Cache, Cache);
    registry.register(Card::Scroll, Scroll);
    registry.register(Card::JarOfGreed, SetTrap::drawing(1));
    registry.register(Card::TrapHole, SetTrap::inert());
    registry
}
