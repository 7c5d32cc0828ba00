// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy, memoized mapping from items to cells.

use core::fmt;
use core::ops::Range;

use crate::memo::MemoList;
use crate::{Cell, CellPool, FlowNode, ListChange};

/// Owns the pool and one lazily created cell slot per item.
///
/// A cell is *present* while its slot is memoized. Every cell leaving the
/// present set goes back to the pool, and every present cell at or after a
/// change point is told its (possibly new) index, in that order.
pub(crate) struct CellListManager<T, C> {
    pool: CellPool<T, C>,
    cells: MemoList<C>,
}

impl<T, C> fmt::Debug for CellListManager<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellListManager")
            .field("pool", &self.pool)
            .field("cells", &self.cells)
            .finish()
    }
}

impl<T, C: Cell<T>> CellListManager<T, C> {
    pub(crate) fn new(pool: CellPool<T, C>, len: usize) -> Self {
        Self {
            pool,
            cells: MemoList::new(len),
        }
    }

    #[cfg(test)]
    fn present_count(&self) -> usize {
        self.cells.memoized_count()
    }

    #[cfg(test)]
    fn is_cell_present(&self, index: usize) -> bool {
        self.cells.is_memoized(index)
    }

    pub(crate) fn cell_if_present(&self, index: usize) -> Option<&C> {
        self.cells.get(index)
    }

    pub(crate) fn cell_if_present_mut(&mut self, index: usize) -> Option<&mut C> {
        self.cells.get_mut(index)
    }

    /// Returns the cell for `index`, creating it if needed.
    ///
    /// A freshly created cell is hidden until it is placed.
    #[track_caller]
    pub(crate) fn get_cell(&mut self, index: usize, items: &[T]) -> &mut C {
        assert!(
            index < items.len(),
            "cell index {index} out of bounds for {} items",
            items.len()
        );
        debug_assert_eq!(
            items.len(),
            self.cells.len(),
            "cell slots must stay aligned with items"
        );
        if !self.cells.is_memoized(index) {
            let mut cell = self.pool.get_cell(index, &items[index]);
            cell.node_mut().set_visible(false);
            self.cells.insert(index, cell);
            #[cfg(feature = "tracing")]
            tracing::trace!(index, present = self.cells.memoized_count(), "cell materialized");
            self.reindex_from(self.cells.count_before(index));
        }
        match self.cells.get_mut(index) {
            Some(cell) => cell,
            None => unreachable!("cell {index} was just memoized"),
        }
    }

    /// Returns every present cell outside `[from, to)` to the pool.
    pub(crate) fn crop_to(&mut self, from: usize, to: usize) {
        let len = self.cells.len();
        let from = from.min(len);
        let to = to.clamp(from, len);
        let mut removed = self.cells.forget(0..from);
        let front_changed = !removed.is_empty();
        removed.extend(self.cells.forget(to..len));
        if removed.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(from, to, released = removed.len(), "cropped cells");
        for (_, cell) in removed {
            self.pool.accept_cell(cell);
        }
        if front_changed {
            self.reindex_from(0);
        }
    }

    /// Returns every present cell in `range` to the pool.
    pub(crate) fn forget(&mut self, range: Range<usize>) {
        let first = self.cells.count_before(range.start);
        let removed = self.cells.forget(range);
        if removed.is_empty() {
            return;
        }
        for (_, cell) in removed {
            self.pool.accept_cell(cell);
        }
        self.reindex_from(first);
    }

    /// Remaps slots after an item splice.
    ///
    /// Cells of removed items are released; every surviving present cell at or
    /// after `change.from` learns its shifted index.
    pub(crate) fn items_changed(&mut self, change: ListChange) {
        let first = self.cells.count_before(change.from);
        for cell in self.cells.splice(change) {
            self.pool.accept_cell(cell);
        }
        self.reindex_from(first);
    }

    /// Present cells with their indices, in index order.
    pub(crate) fn present_cells(&self) -> impl DoubleEndedIterator<Item = (usize, &C)> + '_ {
        self.cells.iter()
    }

    pub(crate) fn is_cell_visible(&self, index: usize) -> bool {
        self.cells
            .get(index)
            .is_some_and(|cell| cell.node().is_visible())
    }

    /// Last visible cell strictly before `pos`.
    pub(crate) fn last_visible_before(&self, pos: usize) -> Option<usize> {
        let mut pos = pos;
        while let Some(index) = self.cells.last_before(pos) {
            if self.is_cell_visible(index) {
                return Some(index);
            }
            pos = index;
        }
        None
    }

    /// First visible cell at or after `pos`.
    pub(crate) fn first_visible_from(&self, pos: usize) -> Option<usize> {
        let mut pos = pos;
        while let Some(index) = self.cells.first_from(pos) {
            if self.is_cell_visible(index) {
                return Some(index);
            }
            pos = index + 1;
        }
        None
    }

    /// Releases every present cell, then disposes the pool.
    pub(crate) fn dispose(&mut self) {
        for (_, cell) in self.cells.clear() {
            self.pool.accept_cell(cell);
        }
        self.pool.dispose();
    }

    fn reindex_from(&mut self, first: usize) {
        for n in first..self.cells.memoized_count() {
            if let Some(index) = self.cells.nth_index(n)
                && let Some(cell) = self.cells.get_mut(index)
            {
                cell.update_index(index);
            }
        }
    }
}
