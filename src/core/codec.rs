//! Canonical text encoding of a `GameState`.
//!
//! ```text
//! seed|life|turn|summoned|main|resource|hand|banished|discard|draw|reversed
//! ```
//!
//! Numbers are decimal and flags are `0`/`1`. Each zone is a run of tokens:
//! the card symbol alone, the symbol followed by `?` for a face-down card, or
//! the symbol followed by one digit for a payload. The draw pile is written in
//! storage order.
//!
//! The encoding is the identity of a state. Two states are the same search
//! node iff their encodings are equal, which is why `StateKey` wraps it.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::state::{GameState, Pile};
use crate::cards::{Card, CardToken};
use crate::error::CodecError;
use crate::zones::{DrawPile, Zone};

const FIELD_COUNT: usize = 11;
const HIDDEN_MARKER: char = '?';

/// Order in which zones appear in the encoding.
const ZONE_FIELDS: [Zone; 6] = [
    Zone::Main,
    Zone::Resource,
    Zone::Hand,
    Zone::Banished,
    Zone::Discard,
    Zone::DrawPile,
];

/// Canonical key of a state: its encoding.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Key of a state.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        Self(encode(state))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a state. The trace is not part of the encoding.
#[must_use]
pub fn encode(state: &GameState) -> String {
    let mut out = String::with_capacity(96);
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "{}|{}|{}|{}",
        state.seed(),
        state.life(),
        state.turn(),
        u8::from(state.summoned())
    );
    for zone in ZONE_FIELDS {
        out.push('|');
        for &token in state.zone(zone) {
            push_token(&mut out, token);
        }
    }
    out.push('|');
    out.push(if state.reversed() { '1' } else { '0' });
    out
}

fn push_token(out: &mut String, token: CardToken) {
    out.push(token.card().symbol());
    if token.is_hidden() {
        out.push(HIDDEN_MARKER);
    } else if let Some(payload) = token.payload() {
        // Payloads are single digits: counters top out at 3, indices at 4.
        out.push(char::from(b'0' + payload.min(9)));
    }
}

/// Decode an encoding produced by `encode`.
///
/// The result reproduces the encoding exactly; no canonicalisation is
/// applied, so `encode(&decode(s)?) == s` for every `s` that decodes. A
/// Library written with a `0` payload is rejected, since `encode` never
/// produces one.
///
/// Decoding checks syntax only. Use `verify` for the structural invariants.
pub fn decode(encoding: &str) -> Result<GameState, CodecError> {
    let fields: Vec<&str> = encoding.split('|').collect();
    if fields.len() != FIELD_COUNT {
        return Err(CodecError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let seed = parse_number::<u64>("seed", fields[0])?;
    let life = parse_number::<i32>("life", fields[1])?;
    let turn = parse_number::<u16>("turn", fields[2])?;
    let summoned = parse_flag("summoned", fields[3])?;

    let mut piles: [Pile; 6] = Default::default();
    for (slot, (&zone, field)) in piles.iter_mut().zip(ZONE_FIELDS.iter().zip(&fields[4..10])) {
        *slot = parse_zone(zone, field)?;
    }
    let reversed = parse_flag("reversed", fields[10])?;

    let [main, resource, hand, banished, discard, draw] = piles;
    Ok(GameState::from_parts(
        seed,
        life,
        turn,
        summoned,
        [main, resource, hand, banished, discard],
        DrawPile::new(draw.into_vec(), reversed),
    ))
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, CodecError> {
    value.parse().map_err(|_| CodecError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, CodecError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(CodecError::InvalidField {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_zone(zone: Zone, field: &str) -> Result<Pile, CodecError> {
    let mut tokens = Pile::new();
    let mut chars = field.chars().peekable();
    while let Some(symbol) = chars.next() {
        if symbol == HIDDEN_MARKER || symbol.is_ascii_digit() {
            return Err(CodecError::MisplacedMarker {
                marker: symbol,
                zone,
            });
        }
        let card = Card::from_symbol(symbol).ok_or(CodecError::UnknownSymbol { symbol, zone })?;

        let token = match chars.peek().copied() {
            Some(HIDDEN_MARKER) => {
                chars.next();
                if let Some(&digit) = chars.peek().filter(|c| c.is_ascii_digit()) {
                    return Err(CodecError::MisplacedMarker {
                        marker: digit,
                        zone,
                    });
                }
                CardToken::hidden(card)
            }
            Some(digit) if digit.is_ascii_digit() => {
                chars.next();
                let payload = digit as u8 - b'0';
                if card == Card::Library {
                    if payload == 0 {
                        return Err(CodecError::InvalidPayload { card, payload, zone });
                    }
                    CardToken::library(payload)
                } else {
                    CardToken::with_payload(card, payload)
                }
            }
            _ => CardToken::new(card),
        };
        tokens.push(token);
    }
    Ok(tokens)
}
