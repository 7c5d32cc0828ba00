// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placing cells along the length axis.

use crate::cell_list::CellListManager;
use crate::size::SizeTracker;
use crate::{Cell, FlowNode};

/// Sizes and positions cells relative to the viewport.
///
/// All lengths are in viewport coordinates: `0` is the viewport start and
/// [`CellPositioner::viewport_length`] its end. Placing a cell makes it
/// visible; cells that were not placed in a pass keep whatever position and
/// visibility they had before.
pub(crate) struct CellPositioner<'a, T, C> {
    cells: &'a mut CellListManager<T, C>,
    sizes: &'a mut SizeTracker,
    items: &'a [T],
    breadth_offset: f64,
}

impl<'a, T, C: Cell<T>> CellPositioner<'a, T, C> {
    pub(crate) fn new(
        cells: &'a mut CellListManager<T, C>,
        sizes: &'a mut SizeTracker,
        items: &'a [T],
        breadth_offset: f64,
    ) -> Self {
        Self {
            cells,
            sizes,
            items,
            breadth_offset,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn viewport_length(&self) -> f64 {
        self.sizes.viewport_length()
    }

    pub(crate) fn average_length_estimate(&mut self) -> Option<f64> {
        self.sizes.average_length_estimate(self.cells)
    }

    /// Drops measurements of present cells whose nodes asked for layout.
    pub(crate) fn forget_stale_sizes(&mut self) {
        let stale: smallvec::SmallVec<[usize; 8]> = self
            .cells
            .present_cells()
            .filter(|(_, cell)| cell.node().needs_layout())
            .map(|(index, _)| index)
            .collect();
        for index in stale {
            self.sizes.forget_size_of(index);
        }
    }

    /// Resizes the cell for `index` to the shared breadth and its length.
    fn sized_cell(&mut self, index: usize) -> (&mut C, f64) {
        let orientation = self.sizes.orientation();
        let cell = self.cells.get_cell(index, self.items);
        let breadth = self.sizes.breadth_for(index, cell.node());
        let length = self.sizes.length_for(index, cell.node());
        orientation.resize(cell.node_mut(), breadth, length);
        (cell, length)
    }

    fn place(&mut self, index: usize, start: impl FnOnce(f64) -> f64) -> &mut C {
        let orientation = self.sizes.orientation();
        let breadth_offset = self.breadth_offset;
        let (cell, length) = self.sized_cell(index);
        orientation.relocate(cell.node_mut(), -breadth_offset, start(length));
        cell.node_mut().set_visible(true);
        cell
    }

    /// Places the start of `index` at `start`.
    pub(crate) fn place_start_at(&mut self, index: usize, start: f64) -> &mut C {
        self.place(index, |_| start)
    }

    /// Places the end of `index` at `end`, measured from the viewport start.
    pub(crate) fn place_end_from_start(&mut self, index: usize, end: f64) -> &mut C {
        self.place(index, |length| end - length)
    }

    /// Places the end of `index` at `offset` from the viewport end.
    pub(crate) fn place_end_from_end(&mut self, index: usize, offset: f64) -> &mut C {
        let end = self.viewport_length() + offset;
        self.place_end_from_start(index, end)
    }

    /// Places the start of `index` at `offset` from the viewport end.
    pub(crate) fn place_start_from_end(&mut self, index: usize, offset: f64) -> &mut C {
        let start = self.viewport_length() + offset;
        self.place_start_at(index, start)
    }

    /// Moves a present cell along the length axis.
    pub(crate) fn shift_cell_by(&mut self, index: usize, delta: f64) {
        let orientation = self.sizes.orientation();
        if let Some(cell) = self.cells.cell_if_present_mut(index) {
            let (breadth, length) = orientation.split(cell.node().bounds().origin());
            orientation.relocate(cell.node_mut(), breadth, length + delta);
        }
    }

    /// Smallest shift that brings `[start + from, start + to]` of `index` into view.
    ///
    /// Returns `0` when the region is already inside, or when it overflows
    /// both edges.
    pub(crate) fn shortest_delta_to_viewport(&self, index: usize, from: f64, to: f64) -> f64 {
        let start = self.start(index);
        let before = start + from;
        let after = self.viewport_length() - (start + to);
        if before < 0.0 && after > 0.0 {
            (-before).min(after)
        } else if after < 0.0 && before > 0.0 {
            (-before).max(after)
        } else {
            0.0
        }
    }

    /// The visible cell for `index`.
    ///
    /// Panics if it is not visible.
    #[track_caller]
    pub(crate) fn visible_cell(&self, index: usize) -> &C {
        match self.cell_if_visible(index) {
            Some(cell) => cell,
            None => panic!("cell {index} is not visible"),
        }
    }

    pub(crate) fn cell_if_visible(&self, index: usize) -> Option<&C> {
        self.cells
            .cell_if_present(index)
            .filter(|cell| cell.node().is_visible())
    }

    pub(crate) fn is_visible(&self, index: usize) -> bool {
        self.cells.is_cell_visible(index)
    }

    /// Start of a visible cell along the length axis.
    #[track_caller]
    pub(crate) fn start(&self, index: usize) -> f64 {
        let bounds = self.visible_cell(index).node().bounds();
        self.sizes.orientation().length_start(bounds)
    }

    /// End of a visible cell along the length axis.
    #[track_caller]
    pub(crate) fn end(&self, index: usize) -> f64 {
        let bounds = self.visible_cell(index).node().bounds();
        self.sizes.orientation().length_end(bounds)
    }

    /// Length of a visible cell.
    #[track_caller]
    pub(crate) fn length_of(&self, index: usize) -> f64 {
        let bounds = self.visible_cell(index).node().bounds();
        self.sizes.orientation().length(bounds.size())
    }

    pub(crate) fn first_visible_index(&self) -> Option<usize> {
        self.cells.first_visible_from(0)
    }

    pub(crate) fn last_visible_index(&self) -> Option<usize> {
        self.cells.last_visible_before(self.len())
    }

    pub(crate) fn last_visible_before(&self, pos: usize) -> Option<usize> {
        self.cells.last_visible_before(pos)
    }

    pub(crate) fn first_visible_from(&self, pos: usize) -> Option<usize> {
        self.cells.first_visible_from(pos)
    }

    pub(crate) fn crop_to(&mut self, from: usize, to: usize) {
        self.cells.crop_to(from, to);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::CellPositioner;
    use crate::cell_list::CellListManager;
    use crate::size::SizeTracker;
    use crate::{CellPool, FlowNode, LeafNode, NodeCell, Orientation};

    type Cells = CellListManager<f64, NodeCell<LeafNode>>;

    fn setup(items: &[f64]) -> (Cells, SizeTracker) {
        let pool = CellPool::new(|_, h: &f64| NodeCell::new(LeafNode::new(Size::new(10.0, *h))));
        let mut sizes = SizeTracker::new(Orientation::Vertical, items.len());
        sizes.set_viewport(Size::new(100.0, 100.0));
        (CellListManager::new(pool, items.len()), sizes)
    }

    #[test]
    fn placement_variants() {
        let items = [20.0, 30.0, 40.0];
        let (mut cells, mut sizes) = setup(&items);
        let mut pos = CellPositioner::new(&mut cells, &mut sizes, &items, 5.0);

        let bounds = pos.place_start_at(0, 10.0).node().bounds();
        assert_eq!((bounds.x0, bounds.y0, bounds.x1, bounds.y1), (-5.0, 10.0, 95.0, 30.0));
        pos.place_end_from_start(1, 10.0);
        assert_eq!((pos.start(1), pos.end(1)), (-20.0, 10.0));
        pos.place_end_from_end(2, -10.0);
        assert_eq!((pos.start(2), pos.end(2)), (50.0, 90.0));
        pos.place_start_from_end(2, -10.0);
        assert_eq!(pos.start(2), 90.0);
        assert_eq!(pos.length_of(2), 40.0);

        pos.shift_cell_by(2, -5.0);
        assert_eq!(pos.start(2), 85.0);
    }

    #[test]
    fn shortest_delta() {
        let items = [40.0];
        let (mut cells, mut sizes) = setup(&items);
        let mut pos = CellPositioner::new(&mut cells, &mut sizes, &items, 0.0);

        // Inside: nothing to do.
        pos.place_start_at(0, 30.0);
        assert_eq!(pos.shortest_delta_to_viewport(0, 0.0, 40.0), 0.0);
        // Above the viewport: move down until the start shows.
        pos.place_start_at(0, -10.0);
        assert_eq!(pos.shortest_delta_to_viewport(0, 0.0, 40.0), 10.0);
        // Below: move up until the end shows.
        pos.place_start_at(0, 80.0);
        assert_eq!(pos.shortest_delta_to_viewport(0, 0.0, 40.0), -20.0);
        // Larger than the viewport and overflowing both edges: stay.
        assert_eq!(pos.shortest_delta_to_viewport(0, -100.0, 100.0), 0.0);
    }

    #[test]
    fn only_placed_cells_are_visible() {
        let items = [20.0, 30.0];
        let (mut cells, mut sizes) = setup(&items);
        cells.get_cell(1, &items);
        let mut pos = CellPositioner::new(&mut cells, &mut sizes, &items, 0.0);
        assert!(!pos.is_visible(1));
        assert!(pos.cell_if_visible(1).is_none());
        pos.place_start_at(0, 0.0);
        assert_eq!(pos.first_visible_index(), Some(0));
        assert_eq!(pos.last_visible_index(), Some(0));
    }

    #[test]
    #[should_panic(expected = "is not visible")]
    fn visible_cell_panics_on_hidden() {
        let items = [20.0];
        let (mut cells, mut sizes) = setup(&items);
        let pos = CellPositioner::new(&mut cells, &mut sizes, &items, 0.0);
        pos.visible_cell(0);
    }
}
