//! Error types.
//!
//! Running out of budget is not an error: a search that hits its cutoff
//! returns `SearchOutcome::Exhausted`. Everything here means the caller handed
//! in something broken, or a state went bad, and the current invocation
//! cannot continue.

use thiserror::Error;

use crate::cards::Card;
use crate::zones::Zone;

/// Failure to decode a state encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Wrong number of `|`-separated fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A numeric or flag field did not parse.
    #[error("invalid {field} field: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// A token symbol that names no card.
    #[error("unknown card symbol {symbol:?} in {zone}")]
    UnknownSymbol { symbol: char, zone: Zone },

    /// A `?` or payload digit with no card before it, or both on one token.
    #[error("misplaced token marker {marker:?} in {zone}")]
    MisplacedMarker { marker: char, zone: Zone },

    /// A payload digit the card cannot carry in that form.
    #[error("invalid payload {payload} on {card} in {zone}")]
    InvalidPayload { card: Card, payload: u8, zone: Zone },
}

/// Errors raised while generating successors or running a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The starting state could not be decoded.
    #[error("malformed state encoding: {0}")]
    Codec(#[from] CodecError),

    /// A handler asked for more cards than the draw pile holds.
    #[error("cannot draw {requested} card(s) from a draw pile of {remaining}")]
    DrawPastEnd { requested: usize, remaining: usize },

    /// A handler tried something the rules forbid (full zone, missing card,
    /// life points below zero).
    #[error("illegal action: {0}")]
    IllegalAction(String),

    /// A produced state broke a structural invariant.
    #[error("invariant violated: {reason} (state {encoding})")]
    Invariant {
        reason: String,
        encoding: String,
        trace: Vec<String>,
    },

    /// Search or scoring configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;
