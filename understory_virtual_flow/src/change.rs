// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item splice records.

/// A splice of the item collection: at `from`, `removed` items were replaced by `added` items.
///
/// Every mutation of a [`VirtualFlow`](crate::VirtualFlow)'s items is described by one
/// of these, and every index-aligned structure in the flow remaps itself from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListChange {
    /// Index of the first affected item.
    pub from: usize,
    /// Number of items removed at `from`.
    pub removed: usize,
    /// Number of items inserted at `from`.
    pub added: usize,
}

impl ListChange {
    /// Creates a change record.
    #[must_use]
    pub const fn new(from: usize, removed: usize, added: usize) -> Self {
        Self {
            from,
            removed,
            added,
        }
    }

    /// Returns `true` if the change neither removes nor adds anything.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.removed == 0 && self.added == 0
    }

    /// Maps an index from before the change to after it.
    ///
    /// Returns `None` when the item at `index` was removed.
    #[must_use]
    pub const fn map_index(&self, index: usize) -> Option<usize> {
        if index < self.from {
            Some(index)
        } else if index >= self.from + self.removed {
            Some(index - self.removed + self.added)
        } else {
            None
        }
    }
}
