//! Card system: identities, catalog, tokens and deck composition.
//!
//! ## Key Types
//!
//! - `Card`: One of the distinct cards in the deck
//! - `CardDefinition`: Static catalog data (name, kind, text, copies)
//! - `CardToken`: A card inside a zone, with face-down flag and payload
//! - `CardCounts`: Multiset of cards, used for conservation checks

pub mod deck;
pub mod definition;
pub mod token;

pub use deck::{deck_list, CardCounts, DECK_SIZE};
pub use definition::{Card, CardDefinition, CardKind};
pub use token::{CardToken, LIBRARY_MAX_COUNTERS};
