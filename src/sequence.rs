//! Moving records between a tree and a bounded, ordered sequence.
//!
//! Both directions respect [`TreeConfig::capacity`](crate::TreeConfig::capacity).

use crate::error::{TreeError, TreeResult};
use crate::ordered_tree::{IntoIter, OrderedTree};
use tracing::{debug, warn};

/// Records moved out of a tree by [`OrderedTree::flatten`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flattened<T> {
    /// In-order records, at most `capacity` of them.
    pub records: Vec<T>,
    /// Records past the capacity, released along with their nodes.
    pub dropped: usize,
}

impl<T: Ord> OrderedTree<T> {
    /// Moves every record out in ascending order and leaves the tree empty.
    ///
    /// Output stops at the configured capacity; anything beyond it is
    /// released and counted in [`Flattened::dropped`].
    pub fn flatten(&mut self) -> Flattened<T> {
        let capacity = self.config.capacity();
        let len = self.len;
        let mut drain = self.drain_in_order();
        let records: Vec<T> = drain.by_ref().take(capacity).collect();
        let dropped = drain.count();
        if dropped > 0 {
            warn!(capacity, dropped, "flatten truncated at capacity");
        }
        debug!(len, emitted = records.len(), "flattened tree");
        Flattened { records, dropped }
    }

    /// Like [`flatten`](Self::flatten), but refuses to truncate. The tree is
    /// left untouched on error.
    pub fn try_flatten(&mut self) -> TreeResult<Vec<T>> {
        let capacity = self.config.capacity();
        if self.len > capacity {
            return Err(TreeError::CapacityExceeded {
                len: self.len,
                capacity,
            });
        }
        Ok(self.drain_in_order().collect())
    }

    /// Replaces the contents with `records`, which should be sorted
    /// ascending, and returns how many were stored.
    ///
    /// The middle record of each range goes in first, so sorted input gives
    /// a tree of logarithmic height. Unsorted input still produces a valid
    /// search tree, just not a balanced one. Equal records after the first
    /// are rejected like any duplicate insert.
    pub fn rebuild_from_sorted(&mut self, records: Vec<T>) -> TreeResult<usize> {
        let capacity = self.config.capacity();
        if records.len() > capacity {
            return Err(TreeError::CapacityExceeded {
                len: records.len(),
                capacity,
            });
        }
        let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
        Ok(self.rebuild_from_slots(&mut slots))
    }

    /// Rebuilds from the leading run of filled slots, reading at most
    /// `capacity` of them. Every slot moved into the tree is left `None`.
    pub fn rebuild_from_slots(&mut self, slots: &mut [Option<T>]) -> usize {
        self.clear();
        let used = slots
            .iter()
            .take(self.config.capacity())
            .take_while(|slot| slot.is_some())
            .count();
        self.insert_midpoints(&mut slots[..used]);
        debug!(
            used,
            inserted = self.len,
            height = self.height(),
            "rebuilt tree from sorted records"
        );
        self.len
    }

    // mid = (low + high) / 2 over the inclusive range, so even-length
    // ranges put the extra record on the right
    fn insert_midpoints(&mut self, slots: &mut [Option<T>]) {
        if slots.is_empty() {
            return;
        }
        let mid = (slots.len() - 1) / 2;
        if let Some(value) = slots[mid].take() {
            self.insert(value);
        }
        let (left, rest) = slots.split_at_mut(mid);
        self.insert_midpoints(left);
        self.insert_midpoints(&mut rest[1..]);
    }

    fn drain_in_order(&mut self) -> IntoIter<T> {
        self.len = 0;
        IntoIter::new(self.root.take())
    }
}

/// True when every record is strictly greater than the one before it, the
/// input [`OrderedTree::rebuild_from_sorted`] expects.
pub fn is_sorted_strictly<T: Ord>(records: &[T]) -> bool {
    records.windows(2).all(|pair| pair[0] < pair[1])
}
