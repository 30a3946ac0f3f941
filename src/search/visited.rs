//! Sharded visited-state set.
//!
//! A single hash map has to rehash everything it holds each time it grows,
//! and at hundreds of millions of keys that pause dominates. The set is
//! therefore a list of capacity-bounded shards. A new shard is created only
//! once the newest is full, and lookups scan from newest to oldest since
//! recently inserted keys are the likeliest to be looked up again.

use rustc_hash::FxHashMap;

use crate::core::StateKey;

/// How much of a node's subtree has been explored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Explored in `round` with `budget` discrepancies to spend.
    Partial { round: u32, budget: u32 },
    /// Every descendant has been explored; nothing more can be found here.
    Full,
}

/// Map from state key to visit status, split into bounded shards.
#[derive(Clone, Debug)]
pub struct VisitedSet {
    shards: Vec<FxHashMap<StateKey, Visit>>,
    shard_capacity: usize,
    len: usize,
}

impl VisitedSet {
    /// An empty set. No shard is allocated until the first insertion.
    #[must_use]
    pub fn new(shard_capacity: usize) -> Self {
        Self {
            shards: Vec::new(),
            shard_capacity: shard_capacity.max(1),
            len: 0,
        }
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of shards allocated.
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Status of a key.
    #[must_use]
    pub fn get(&self, key: &StateKey) -> Option<Visit> {
        self.shards.iter().rev().find_map(|shard| shard.get(key).copied())
    }

    #[must_use]
    pub fn contains(&self, key: &StateKey) -> bool {
        self.shards.iter().rev().any(|shard| shard.contains_key(key))
    }

    /// Set a key's status, returning the previous one.
    ///
    /// An existing key is updated in whichever shard holds it.
    pub fn insert(&mut self, key: StateKey, visit: Visit) -> Option<Visit> {
        for shard in self.shards.iter_mut().rev() {
            if let Some(slot) = shard.get_mut(&key) {
                return Some(std::mem::replace(slot, visit));
            }
        }

        let needs_shard = self
            .shards
            .last()
            .map_or(true, |shard| shard.len() >= self.shard_capacity);
        if needs_shard {
            self.shards.push(FxHashMap::default());
        }
        if let Some(shard) = self.shards.last_mut() {
            shard.insert(key, visit);
            self.len += 1;
        }
        None
    }

    /// Drop every key and shard.
    pub fn clear(&mut self) {
        self.shards.clear();
        self.len = 0;
    }
}
