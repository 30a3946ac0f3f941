//! Zone identifiers and capacities.

use serde::{Deserialize, Serialize};

/// Slots in the main zone.
pub const MAIN_ZONE_CAPACITY: usize = 5;

/// Slots in the resource zone.
pub const RESOURCE_ZONE_CAPACITY: usize = 5;

/// One of the six card locations of a state.
///
/// The declaration order is the order zones appear in the state encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Monsters on the field.
    Main,
    /// Spells and traps on the field.
    Resource,
    Hand,
    Banished,
    Discard,
    /// Ordered deck; see `DrawPile`.
    DrawPile,
}

impl Zone {
    /// All zones in encoding order.
    pub const ALL: [Zone; 6] = [
        Zone::Main,
        Zone::Resource,
        Zone::Hand,
        Zone::Banished,
        Zone::Discard,
        Zone::DrawPile,
    ];

    /// Maximum cards allowed. `None` for unbounded zones.
    #[must_use]
    pub const fn capacity(self) -> Option<usize> {
        match self {
            Zone::Main => Some(MAIN_ZONE_CAPACITY),
            Zone::Resource => Some(RESOURCE_ZONE_CAPACITY),
            _ => None,
        }
    }

    /// Is this zone kept in canonical token order?
    ///
    /// Only the draw pile keeps its physical order.
    #[must_use]
    pub const fn is_sorted(self) -> bool {
        !matches!(self, Zone::DrawPile)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Main => "main zone",
            Zone::Resource => "resource zone",
            Zone::Hand => "hand",
            Zone::Banished => "banished pile",
            Zone::Discard => "discard pile",
            Zone::DrawPile => "draw pile",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities() {
        assert_eq!(Zone::Main.capacity(), Some(5));
        assert_eq!(Zone::Resource.capacity(), Some(5));
        assert_eq!(Zone::Hand.capacity(), None);
        assert_eq!(Zone::DrawPile.capacity(), None);
    }

    #[test]
    fn test_sorted_zones() {
        assert!(Zone::Hand.is_sorted());
        assert!(Zone::Main.is_sorted());
        assert!(!Zone::DrawPile.is_sorted());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Zone::Discard), "discard pile");
    }
}
