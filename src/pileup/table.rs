use std::collections::{btree_map, BTreeMap};

use crate::core::types::{Base, BaseCounts};

/// Per-position base tallies for the active alignment window.
///
/// Entries are created on first touch and removed exactly once, when the
/// sweep finalizes their position. There is no peek: reading an entry
/// always takes it out of the table.
#[derive(Debug, Default)]
pub struct PileupTable {
    entries: BTreeMap<u64, BaseCounts>,
}

impl PileupTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation of `base` at `position`
    pub fn accumulate(&mut self, position: u64, base: Base) {
        self.entries.entry(position).or_default().observe(base);
    }

    /// Remove and return the tallies at `position`; `None` means no read
    /// touched it
    pub fn take(&mut self, position: u64) -> Option<BaseCounts> {
        self.entries.remove(&position)
    }

    /// Lowest position still buffered
    #[must_use]
    pub fn first_position(&self) -> Option<u64> {
        self.entries.keys().next().copied()
    }

    /// Take every remaining entry in ascending position order
    pub fn drain_ascending(&mut self) -> btree_map::IntoIter<u64, BaseCounts> {
        std::mem::take(&mut self.entries).into_iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
