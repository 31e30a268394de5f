use std::collections::VecDeque;

use super::layer::Layer;

/// Number of snapshots kept for undo
pub const HISTORY_DEPTH: usize = 20;

/// Bounded stack of layer-list snapshots.
///
/// Snapshots are value copies of the whole list; the oldest entry is
/// discarded once the stack holds more than its capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct History {
    snapshots: VecDeque<Vec<Layer>>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_DEPTH)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a snapshot, dropping the oldest one beyond capacity
    pub fn push(&mut self, snapshot: Vec<Layer>) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<Vec<Layer>> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Vec<Layer>> {
        self.snapshots.iter()
    }
}
