//! Fixed-size transposition table keyed by position text.
//!
//! Keys are the first four FEN fields, so positions reached with different
//! move counters share an entry. Slots are picked by hashing the key and the
//! full key is compared on probe. Replacement is depth-preferred with
//! generation aging to evict stale entries.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::game_state::chess_types::ChessMove;
use crate::search::board_scoring::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtEntry {
    pub key: String,
    pub depth: u8,
    pub score: Score,
    pub bound: Bound,
    pub best_move: Option<ChessMove>,
}

/// Probe result without the key, so callers need not hold a borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtHit {
    pub depth: u8,
    pub score: Score,
    pub bound: Bound,
    pub best_move: Option<ChessMove>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    generations: Vec<u8>,
    current_generation: u8,
    stats: TtStats,
}

impl TranspositionTable {
    const AGE_REPLACE_THRESHOLD: u8 = 4;
    const DEPTH_REPLACE_MARGIN: u8 = 2;

    pub fn new(capacity: usize) -> Self {
        let count = capacity.max(1);
        Self {
            entries: vec![None; count],
            generations: vec![0; count],
            current_generation: 0,
            stats: TtStats::default(),
        }
    }

    /// Advance the table generation, once per iterative-deepening depth.
    #[inline]
    pub fn new_generation(&mut self) {
        self.current_generation = self.current_generation.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.generations.fill(0);
        self.current_generation = 0;
        self.stats = TtStats::default();
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    pub fn stats(&self) -> TtStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.entries.len() as u64) as usize
    }

    pub fn probe(&mut self, key: &str) -> Option<TtHit> {
        self.stats.probes += 1;
        let idx = self.idx(key);
        let hit = self.entries[idx]
            .as_ref()
            .filter(|entry| entry.key == key)
            .map(|entry| TtHit {
                depth: entry.depth,
                score: entry.score,
                bound: entry.bound,
                best_move: entry.best_move,
            });
        if hit.is_some() {
            self.stats.hits += 1;
            self.generations[idx] = self.current_generation;
        }
        hit
    }

    pub fn store(&mut self, entry: TtEntry) {
        self.stats.stores += 1;
        let idx = self.idx(&entry.key);
        let replace = match &self.entries[idx] {
            None => true,
            Some(existing) => {
                let age = self.current_generation.wrapping_sub(self.generations[idx]);
                if existing.key == entry.key {
                    entry.depth >= existing.depth
                } else {
                    age >= Self::AGE_REPLACE_THRESHOLD
                        || entry.depth.saturating_add(Self::DEPTH_REPLACE_MARGIN) >= existing.depth
                }
            }
        };

        if replace {
            trace!(slot = idx, depth = entry.depth, bound = ?entry.bound, "tt store");
            self.entries[idx] = Some(entry);
            self.generations[idx] = self.current_generation;
        } else {
            trace!(slot = idx, depth = entry.depth, "tt store rejected");
        }
    }
}
