//! Game state: the immutable `GameState` and its mutable `StateBuilder`.
//!
//! ## Two-phase lifecycle
//!
//! A state is born either from `GameState::deal` or by cloning a parent into
//! a `StateBuilder`, mutating the builder through its operations, and calling
//! `build()`. `build()` canonicalises every sortable zone, after which the
//! `GameState` exposes read-only accessors only. Nothing the search holds can
//! be mutated behind its back.
//!
//! ## Equality
//!
//! The trace log is display-only. It is excluded from `PartialEq` and from
//! the state encoding, so two states reached by different action orders
//! compare equal.

use im::Vector;
use serde::Serialize;
use smallvec::SmallVec;

use super::rng::GameRng;
use crate::cards::{deck_list, Card, CardCounts, CardToken, LIBRARY_MAX_COUNTERS};
use crate::error::{Result, SolverError};
use crate::zones::{DrawPile, PilePosition, Zone};

/// Life points at the start of the duel.
pub const STARTING_LIFE: i32 = 8000;

/// Cards in the opening hand.
pub const OPENING_HAND: usize = 5;

/// Storage for every zone except the draw pile.
pub type Pile = SmallVec<[CardToken; 8]>;

/// Complete, immutable game state.
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    seed: u64,
    life: i32,
    turn: u16,
    summoned: bool,
    main: Pile,
    resource: Pile,
    hand: Pile,
    banished: Pile,
    discard: Pile,
    draw: DrawPile,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vector<String>>,
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
            && self.life == other.life
            && self.turn == other.turn
            && self.summoned == other.summoned
            && self.main == other.main
            && self.resource == other.resource
            && self.hand == other.hand
            && self.banished == other.banished
            && self.discard == other.discard
            && self.draw == other.draw
    }
}

impl Eq for GameState {}

impl GameState {
    /// Deal a random starting position.
    ///
    /// The 40-card deck is shuffled with `seed`, the opening hand is drawn
    /// from the top, and the state keeps the next seed of the stream for
    /// later reshuffles.
    #[must_use]
    pub fn deal(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut cards: Vec<CardToken> = deck_list().into_iter().map(CardToken::hidden).collect();
        rng.shuffle(&mut cards);

        let mut builder = StateBuilder::new(rng.next_seed());
        builder.state.draw = DrawPile::new(cards, false);
        for _ in 0..OPENING_HAND {
            if let Some(token) = builder.state.draw.pop_top() {
                builder.state.hand.push(token.revealed());
            }
        }
        builder.build()
    }

    /// Assemble a state from raw parts without canonicalising.
    ///
    /// Used by the decoder, which must reproduce an encoding exactly.
    pub(crate) fn from_parts(
        seed: u64,
        life: i32,
        turn: u16,
        summoned: bool,
        zones: [Pile; 5],
        draw: DrawPile,
    ) -> Self {
        let [main, resource, hand, banished, discard] = zones;
        Self {
            seed,
            life,
            turn,
            summoned,
            main,
            resource,
            hand,
            banished,
            discard,
            draw,
            trace: None,
        }
    }

    // === Scalars ===

    /// Seed for the next reshuffle in this lineage.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Life points.
    #[must_use]
    pub fn life(&self) -> i32 {
        self.life
    }

    /// Turn number (starts at 1).
    #[must_use]
    pub fn turn(&self) -> u16 {
        self.turn
    }

    /// Has the normal summon been used this turn?
    #[must_use]
    pub fn summoned(&self) -> bool {
        self.summoned
    }

    /// Is the draw pile upside down?
    #[must_use]
    pub fn reversed(&self) -> bool {
        self.draw.is_reversed()
    }

    /// Life points at or below zero.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.life <= 0
    }

    // === Zones ===

    /// Tokens in a zone. The draw pile is returned in storage order.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &[CardToken] {
        match zone {
            Zone::Main => &self.main,
            Zone::Resource => &self.resource,
            Zone::Hand => &self.hand,
            Zone::Banished => &self.banished,
            Zone::Discard => &self.discard,
            Zone::DrawPile => self.draw.as_slice(),
        }
    }

    #[must_use]
    pub fn main(&self) -> &[CardToken] {
        &self.main
    }

    #[must_use]
    pub fn resource(&self) -> &[CardToken] {
        &self.resource
    }

    #[must_use]
    pub fn hand(&self) -> &[CardToken] {
        &self.hand
    }

    #[must_use]
    pub fn banished(&self) -> &[CardToken] {
        &self.banished
    }

    #[must_use]
    pub fn discard(&self) -> &[CardToken] {
        &self.discard
    }

    /// The draw pile.
    #[must_use]
    pub fn draw_pile(&self) -> &DrawPile {
        &self.draw
    }

    /// Open slots in a bounded zone. `usize::MAX` for unbounded zones.
    #[must_use]
    pub fn free_slots(&self, zone: Zone) -> usize {
        zone.capacity()
            .map_or(usize::MAX, |cap| cap.saturating_sub(self.zone(zone).len()))
    }

    /// Does `zone` hold at least one copy of `card`?
    #[must_use]
    pub fn has(&self, zone: Zone, card: Card) -> bool {
        self.zone(zone).iter().any(|t| t.card() == card)
    }

    /// Multiset of the cards in the hand.
    #[must_use]
    pub fn hand_counts(&self) -> CardCounts {
        CardCounts::from_tokens(&self.hand)
    }

    /// Multiset union of all six zones.
    #[must_use]
    pub fn card_counts(&self) -> CardCounts {
        let mut counts = CardCounts::new();
        for zone in Zone::ALL {
            counts.extend(&CardCounts::from_tokens(self.zone(zone)));
        }
        counts
    }

    // === Trace ===

    /// Is the trace log being recorded?
    #[must_use]
    pub fn is_tracing(&self) -> bool {
        self.trace.is_some()
    }

    /// Trace lines, oldest first.
    pub fn trace(&self) -> impl Iterator<Item = &String> {
        self.trace.iter().flat_map(|t| t.iter())
    }

    /// Start recording a trace for this state's descendants.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        if self.trace.is_none() {
            self.trace = Some(Vector::new());
        }
        self
    }

    // === Derivation ===

    /// Clone into a builder for producing a successor.
    #[must_use]
    pub fn to_builder(&self) -> StateBuilder {
        StateBuilder {
            state: self.clone(),
        }
    }
}

/// Mutable state under construction.
///
/// Every operation that could break a rule returns an error instead of
/// silently clamping. Handlers check legality first; an error here means a
/// handler bug or a corrupt input state.
#[derive(Clone, Debug)]
pub struct StateBuilder {
    state: GameState,
}

impl StateBuilder {
    /// An empty board: no cards anywhere, full life, turn 1.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState {
                seed,
                life: STARTING_LIFE,
                turn: 1,
                summoned: false,
                main: Pile::new(),
                resource: Pile::new(),
                hand: Pile::new(),
                banished: Pile::new(),
                discard: Pile::new(),
                draw: DrawPile::default(),
                trace: None,
            },
        }
    }

    /// Read access to the state being built.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    // === Scalars ===

    pub fn set_life(&mut self, life: i32) {
        self.state.life = life;
    }

    pub fn set_turn(&mut self, turn: u16) {
        self.state.turn = turn;
    }

    pub fn set_summoned(&mut self, summoned: bool) {
        self.state.summoned = summoned;
    }

    /// Pay a life point cost. Paying down to exactly zero is allowed.
    pub fn pay_life(&mut self, amount: i32) -> Result<()> {
        if amount > self.state.life {
            return Err(SolverError::IllegalAction(format!(
                "cannot pay {amount} LP with {} remaining",
                self.state.life
            )));
        }
        self.state.life -= amount;
        Ok(())
    }

    // === Zones ===

    fn pile_mut(&mut self, zone: Zone) -> Option<&mut Pile> {
        match zone {
            Zone::Main => Some(&mut self.state.main),
            Zone::Resource => Some(&mut self.state.resource),
            Zone::Hand => Some(&mut self.state.hand),
            Zone::Banished => Some(&mut self.state.banished),
            Zone::Discard => Some(&mut self.state.discard),
            Zone::DrawPile => None,
        }
    }

    /// Add a token to a zone. Draw pile additions go on top.
    pub fn push(&mut self, zone: Zone, token: CardToken) -> Result<()> {
        if self.state.free_slots(zone) == 0 {
            return Err(SolverError::IllegalAction(format!(
                "{} is full, cannot place {}",
                zone,
                token.card()
            )));
        }
        match self.pile_mut(zone) {
            Some(pile) => pile.push(token),
            None => self.state.draw.push(token, PilePosition::Top),
        }
        Ok(())
    }

    /// Add a token to one end of the draw pile.
    pub fn push_pile(&mut self, token: CardToken, position: PilePosition) {
        self.state.draw.push(token, position);
    }

    /// Replace the draw pile wholesale.
    pub fn set_draw_pile(&mut self, pile: DrawPile) {
        self.state.draw = pile;
    }

    /// Remove the token at `index` of a zone (storage order).
    ///
    /// Removing a monster from the main zone sends any Premature Burial
    /// attached to it to the discard pile and re-points the rest.
    pub fn remove_at(&mut self, zone: Zone, index: usize) -> Result<CardToken> {
        let len = self.state.zone(zone).len();
        if index >= len {
            return Err(SolverError::IllegalAction(format!(
                "no card at index {index} of {zone} ({len} cards)"
            )));
        }
        let token = match self.pile_mut(zone) {
            Some(pile) => pile.remove(index),
            None => {
                let mut cards = self.state.draw.as_slice().to_vec();
                let token = cards.remove(index);
                self.state.draw = DrawPile::new(cards, self.state.draw.is_reversed());
                token
            }
        };
        if zone == Zone::Main {
            self.detach_modifiers(index);
        }
        Ok(token)
    }

    fn detach_modifiers(&mut self, removed: usize) {
        let mut kept = Pile::new();
        for token in self.state.resource.drain(..) {
            match (token.card(), token.payload()) {
                (Card::Burial, Some(i)) if usize::from(i) == removed => {
                    self.state.discard.push(token.plain());
                }
                (Card::Burial, Some(i)) if usize::from(i) > removed => {
                    kept.push(token.with(Some(i - 1)));
                }
                _ => kept.push(token),
            }
        }
        self.state.resource = kept;
    }

    /// Remove the first copy of `card` from a zone.
    pub fn take(&mut self, zone: Zone, card: Card) -> Result<CardToken> {
        let index = self
            .state
            .zone(zone)
            .iter()
            .position(|t| t.card() == card)
            .ok_or_else(|| {
                SolverError::IllegalAction(format!("no {card} in {zone}"))
            })?;
        self.remove_at(zone, index)
    }

    /// Overwrite the token at `index` of a zone.
    pub fn replace_at(&mut self, zone: Zone, index: usize, token: CardToken) -> Result<()> {
        match self.pile_mut(zone).and_then(|pile| pile.get_mut(index)) {
            Some(slot) => {
                *slot = token;
                Ok(())
            }
            None => Err(SolverError::IllegalAction(format!(
                "no card at index {index} of {zone}"
            ))),
        }
    }

    /// Move a card from hand to the discard pile.
    pub fn discard_from_hand(&mut self, card: Card) -> Result<()> {
        let token = self.take(Zone::Hand, card)?;
        self.state.discard.push(token.plain());
        Ok(())
    }

    // === Draw pile ===

    /// Draw `count` cards from the top of the draw pile into the hand.
    pub fn draw(&mut self, count: usize) -> Result<()> {
        for token in self.take_top(count)? {
            self.state.hand.push(token.revealed());
        }
        Ok(())
    }

    /// Remove `count` cards from the top of the draw pile, top first.
    ///
    /// Cards of a reversed pile are face-up as they are exposed, so they come
    /// out known.
    pub fn take_top(&mut self, count: usize) -> Result<Vec<CardToken>> {
        let remaining = self.state.draw.len();
        if count > remaining {
            return Err(SolverError::DrawPastEnd {
                requested: count,
                remaining,
            });
        }
        let mut taken = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(token) = self.state.draw.pop_top() {
                taken.push(token);
            }
        }
        Ok(taken)
    }

    /// Turn the draw pile upside down.
    pub fn flip_draw_pile(&mut self) {
        self.state.draw.flip();
    }

    /// Shuffle the draw pile with this lineage's seed and advance the seed.
    pub fn shuffle_draw_pile(&mut self) {
        let mut rng = GameRng::new(self.state.seed);
        self.state.draw.shuffle(&mut rng);
        self.state.seed = rng.next_seed();
    }

    // === Effects shared by many cards ===

    /// Place a spell counter on every Library that has room for one.
    pub fn add_spell_counters(&mut self) {
        for token in &mut self.state.main {
            if token.card() == Card::Library && token.counters() < LIBRARY_MAX_COUNTERS {
                *token = CardToken::library(token.counters() + 1);
            }
        }
    }

    // === Trace ===

    /// Append a trace line if tracing is on. The closure only runs when it is.
    pub fn note(&mut self, describe: impl FnOnce() -> String) {
        if let Some(trace) = self.state.trace.as_mut() {
            trace.push_back(describe());
        }
    }

    /// Turn on trace recording.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.state = self.state.with_trace();
        self
    }

    // === Freeze ===

    /// Canonicalise and freeze.
    ///
    /// Sorts every zone but the draw pile. The main zone is sorted too, with
    /// each attached modifier's index re-pointed through the permutation.
    #[must_use]
    pub fn build(mut self) -> GameState {
        self.sort_main();
        let st = &mut self.state;
        st.resource.sort_unstable();
        st.hand.sort_unstable();
        st.banished.sort_unstable();
        st.discard.sort_unstable();
        self.state
    }

    fn sort_main(&mut self) {
        let st = &mut self.state;
        if is_sorted(&st.main) {
            return;
        }
        let mut order: Vec<usize> = (0..st.main.len()).collect();
        order.sort_by_key(|&i| st.main[i]);

        let mut new_index = vec![0u8; st.main.len()];
        for (new, &old) in order.iter().enumerate() {
            new_index[old] = new as u8;
        }
        st.main = order.iter().map(|&i| st.main[i]).collect();

        for token in &mut st.resource {
            if token.card() != Card::Burial {
                continue;
            }
            if let Some(&moved) = token.payload().and_then(|i| new_index.get(usize::from(i))) {
                *token = token.with(Some(moved));
            }
        }
    }
}

/// Is a token slice in canonical order?
pub(crate) fn is_sorted(tokens: &[CardToken]) -> bool {
    tokens.windows(2).all(|w| w[0] <= w[1])
}
