//! Item path tracking for nested lists.

/// Tracks the current item path of a multilevel list.
///
/// Incrementing at level `n` drops every counter deeper than `n`, extends
/// the path with zeroes when it was shallower, and then bumps the counter
/// of level `n`. The path is empty between lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItemsCounter {
    counters: Vec<u32>,
}

impl ListItemsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new item at the given 1-based nesting level.
    pub fn increment(&mut self, level: usize) {
        if level == 0 {
            return;
        }

        self.counters.truncate(level);
        if self.counters.len() < level {
            self.counters.resize(level, 0);
        }
        self.counters[level - 1] += 1;
    }

    /// Forgets the current path.
    pub fn reset(&mut self) {
        self.counters.clear();
    }

    /// Current nesting depth; zero when no item has been counted.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.counters.len()
    }

    /// The 1-based index of the current item's ancestor on each level.
    #[must_use]
    pub fn path(&self) -> &[u32] {
        &self.counters
    }
}
