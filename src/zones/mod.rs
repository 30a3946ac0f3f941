//! Zone system for card locations.
//!
//! A state has six zones. Two are bounded (main and resource, five slots
//! each), four are unbounded. Every zone except the draw pile is kept sorted
//! so that card order never distinguishes two states.
//!
//! ## Key Types
//!
//! - `Zone`: Zone identifier with capacity and ordering rules
//! - `DrawPile`: Ordered deck with a reversible top and known-card tracking
//! - `PilePosition`: Top or bottom of the draw pile

pub mod draw_pile;
pub mod zone;

pub use draw_pile::{DrawPile, PilePosition};
pub use zone::{Zone, MAIN_ZONE_CAPACITY, RESOURCE_ZONE_CAPACITY};
