//! Core engine types: state, builder, codec, RNG and verification.
//!
//! This module knows the shape of a state but nothing about what the cards
//! do. Card behavior lives in `effects`, and `rules` ties the two together.

pub mod codec;
pub mod rng;
pub mod state;
pub mod verify;

pub use codec::{decode, encode, StateKey};
pub use rng::GameRng;
pub use state::{GameState, Pile, StateBuilder, OPENING_HAND, STARTING_LIFE};
pub use verify::verify;
