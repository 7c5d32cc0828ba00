// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`VirtualFlow`] facade.

use core::fmt;
use core::ops::{Bound, Range, RangeBounds};
use core::time::Duration;

use kurbo::{Point, Rect, Size};

use crate::cell_list::CellListManager;
use crate::navigator::{Navigator, fill_backward_from0, fill_forward_from0};
use crate::positioner::CellPositioner;
use crate::size::SizeTracker;
use crate::{
    Cell, CellPool, FlowHit, FlowNode, Gravity, ListChange, Offset, Orientation, ScrollbarState,
    SettleWindows, TargetPosition,
};

/// Upper bound on layout passes spent waiting for the shared breadth to settle.
const MAX_BREADTH_PASSES: usize = 4;

bitflags::bitflags! {
    /// Work owed by the flow.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Pending: u8 {
        /// Cells must be placed again.
        const LAYOUT    = 0b0000_0001;
        /// Measurements changed and must be fed to the settle timers.
        const ESTIMATES = 0b0000_0010;
    }
}

/// A virtualized flow of cells over a list of items.
///
/// Only items in or near the viewport have cells. Cells are laid out along
/// the [`Orientation`]'s length axis, all at one shared breadth, and recycled
/// through a [`CellPool`] as they leave the viewport.
///
/// The flow is passive: mutations and scroll requests only record what to do.
/// Cells are placed by [`VirtualFlow::layout`], and size estimates are
/// published when the host advances the clock with [`VirtualFlow::tick`] or
/// forces them with [`VirtualFlow::flush_estimates`].
///
/// All geometry is in viewport coordinates: node bounds, hit points and
/// regions are relative to the viewport origin.
pub struct VirtualFlow<T, C: Cell<T>> {
    items: Vec<T>,
    cells: CellListManager<T, C>,
    sizes: SizeTracker,
    navigator: Navigator,
    breadth_offset: f64,
    pending: Pending,
    now: Duration,
}

impl<T, C: Cell<T>> fmt::Debug for VirtualFlow<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualFlow")
            .field("items", &self.items.len())
            .field("cells", &self.cells)
            .field("sizes", &self.sizes)
            .field("navigator", &self.navigator)
            .field("breadth_offset", &self.breadth_offset)
            .field("pending", &self.pending)
            .field("now", &self.now)
            .finish()
    }
}

impl<T, C: Cell<T>> Drop for VirtualFlow<T, C> {
    fn drop(&mut self) {
        self.cells.dispose();
    }
}

impl<T: 'static, C: Cell<T>> VirtualFlow<T, C> {
    /// Creates a vertical flow; `factory` creates a cell for an item.
    pub fn vertical(items: Vec<T>, mut factory: impl FnMut(&T) -> C + 'static) -> Self {
        Self::new(items, Orientation::Vertical, move |_: usize, item: &T| {
            factory(item)
        })
    }

    /// Creates a horizontal flow; `factory` creates a cell for an item.
    pub fn horizontal(items: Vec<T>, mut factory: impl FnMut(&T) -> C + 'static) -> Self {
        Self::new(items, Orientation::Horizontal, move |_: usize, item: &T| {
            factory(item)
        })
    }
}

impl<T, C: Cell<T>> VirtualFlow<T, C> {
    /// Creates a flow whose factory also receives the item's index.
    pub fn new(
        items: Vec<T>,
        orientation: Orientation,
        factory: impl FnMut(usize, &T) -> C + 'static,
    ) -> Self {
        let len = items.len();
        Self {
            items,
            cells: CellListManager::new(CellPool::new(factory), len),
            sizes: SizeTracker::new(orientation, len),
            navigator: Navigator::default(),
            breadth_offset: 0.0,
            pending: Pending::all(),
            now: Duration::ZERO,
        }
    }

    /// Creates a vertical flow with an index-aware factory.
    pub fn vertical_indexed(items: Vec<T>, factory: impl FnMut(usize, &T) -> C + 'static) -> Self {
        Self::new(items, Orientation::Vertical, factory)
    }

    /// Creates a horizontal flow with an index-aware factory.
    pub fn horizontal_indexed(
        items: Vec<T>,
        factory: impl FnMut(usize, &T) -> C + 'static,
    ) -> Self {
        Self::new(items, Orientation::Horizontal, factory)
    }

    /// The stacking axis.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.sizes.orientation()
    }

    /// The items, in order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // --- Item mutation ---

    /// Replaces the item at `index`, returning the old one.
    ///
    /// The item's cell is released and recreated on the next layout.
    #[track_caller]
    pub fn set(&mut self, index: usize, item: T) -> T {
        assert!(
            index < self.items.len(),
            "set index {index} out of bounds for {} items",
            self.items.len()
        );
        let old = core::mem::replace(&mut self.items[index], item);
        self.items_changed(ListChange::new(index, 1, 1));
        old
    }

    /// Inserts `item` at `index`, shifting later items.
    #[track_caller]
    pub fn insert(&mut self, index: usize, item: T) {
        assert!(
            index <= self.items.len(),
            "insert index {index} out of bounds for {} items",
            self.items.len()
        );
        self.items.insert(index, item);
        self.items_changed(ListChange::new(index, 0, 1));
    }

    /// Appends `item`.
    pub fn push(&mut self, item: T) {
        let index = self.items.len();
        self.items.push(item);
        self.items_changed(ListChange::new(index, 0, 1));
    }

    /// Removes and returns the item at `index`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.items.len(),
            "remove index {index} out of bounds for {} items",
            self.items.len()
        );
        let item = self.items.remove(index);
        self.items_changed(ListChange::new(index, 1, 0));
        item
    }

    /// Replaces `range` with `replace_with`, returning the removed items.
    #[track_caller]
    pub fn splice(
        &mut self,
        range: impl RangeBounds<usize>,
        replace_with: impl IntoIterator<Item = T>,
    ) -> Vec<T> {
        let range = self.checked_range(range);
        let before = self.items.len();
        let removed: Vec<T> = self.items.splice(range.clone(), replace_with).collect();
        let added = self.items.len() + removed.len() - before;
        self.items_changed(ListChange::new(range.start, removed.len(), added));
        removed
    }

    /// Replaces every item, returning the old ones.
    pub fn replace_items(&mut self, items: Vec<T>) -> Vec<T> {
        let old = core::mem::replace(&mut self.items, items);
        self.items_changed(ListChange::new(0, old.len(), self.items.len()));
        old
    }

    #[track_caller]
    fn checked_range(&self, range: impl RangeBounds<usize>) -> Range<usize> {
        let len = self.items.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        assert!(
            start <= end && end <= len,
            "range {start}..{end} out of bounds for {len} items"
        );
        start..end
    }

    fn items_changed(&mut self, change: ListChange) {
        if change.is_noop() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            from = change.from,
            removed = change.removed,
            added = change.added,
            "items changed"
        );
        self.cells.items_changed(change);
        self.sizes.items_changed(change);
        self.navigator.items_changed(change);
        self.pending |= Pending::LAYOUT | Pending::ESTIMATES;
    }

    /// Drops the cells and measurements of the items in `range`.
    ///
    /// The cells are recreated on the next layout, for example after the
    /// items changed in a way the flow cannot observe.
    #[track_caller]
    pub fn refresh_cells(&mut self, range: impl RangeBounds<usize>) {
        let range = self.checked_range(range);
        self.cells.forget(range.clone());
        self.sizes.forget_range(range);
        self.pending |= Pending::LAYOUT | Pending::ESTIMATES;
    }

    // --- Layout ---

    /// The viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.sizes.viewport()
    }

    /// Sets the viewport size.
    pub fn resize(&mut self, size: Size) {
        if self.sizes.viewport() != size {
            self.sizes.set_viewport(size);
            self.request_layout();
        }
    }

    /// Marks the flow as needing layout.
    pub fn request_layout(&mut self) {
        self.pending |= Pending::LAYOUT;
    }

    /// Returns `true` if a layout pass is owed, including because a present
    /// cell's node asked for one.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.pending.contains(Pending::LAYOUT)
            || self
                .cells
                .present_cells()
                .any(|(_, cell)| cell.node().needs_layout())
    }

    /// Places cells for the current target position if layout is needed.
    ///
    /// Cells are materialized, measured and positioned; cells outside the
    /// viewport are returned to the pool. Nodes that asked for layout are
    /// remeasured. If measuring changes the shared breadth, the pass repeats
    /// so every cell ends up at the same breadth.
    pub fn layout(&mut self) {
        if !self.needs_layout() {
            return;
        }
        self.pending.remove(Pending::LAYOUT);
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("layout", items = self.items.len()).entered();

        let mut breadth = self.sizes.cell_breadth();
        for _ in 0..MAX_BREADTH_PASSES {
            self.clamp_breadth_offset();
            let mut pos = CellPositioner::new(
                &mut self.cells,
                &mut self.sizes,
                &self.items,
                self.breadth_offset,
            );
            self.navigator.layout(&mut pos);
            let settled = self.sizes.cell_breadth();
            if settled == breadth {
                break;
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(from = breadth, to = settled, "cell breadth changed during layout");
            breadth = settled;
        }
        self.pending |= Pending::ESTIMATES;
        self.schedule_estimates();
    }

    fn schedule_estimates(&mut self) -> bool {
        if !self.pending.contains(Pending::ESTIMATES) {
            return false;
        }
        self.pending.remove(Pending::ESTIMATES);
        self.sizes.schedule(&self.cells, self.now)
    }

    // --- Time ---

    /// Advances the logical clock, laying out first if needed.
    ///
    /// Estimates whose settle window has elapsed are published. Returns
    /// `true` if a published estimate changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.now = self.now.max(now);
        self.layout();
        let scheduled = self.schedule_estimates();
        self.sizes.poll(&self.cells, self.now) || scheduled
    }

    /// When the next [`VirtualFlow::tick`] has something to publish.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.sizes.next_deadline()
    }

    /// Publishes all estimates now, bypassing the settle windows.
    pub fn flush_estimates(&mut self) -> bool {
        self.layout();
        self.pending.remove(Pending::ESTIMATES);
        self.sizes.flush(&self.cells)
    }

    /// Sets the settle windows used for publishing estimates.
    pub fn set_settle_windows(&mut self, windows: SettleWindows) {
        self.sizes.set_windows(windows);
    }

    /// Counter bumped whenever a published estimate changes.
    #[must_use]
    pub fn estimates_revision(&self) -> u64 {
        self.sizes.revision()
    }

    // --- Positioning ---

    /// Where the next layout will put the viewport.
    #[must_use]
    pub fn target_position(&self) -> TargetPosition {
        self.navigator.target()
    }

    /// Sets where the next layout puts the viewport.
    pub fn set_target_position(&mut self, target: TargetPosition) {
        self.navigator.set_target(target);
        self.request_layout();
    }

    /// The edge short content rests against.
    #[must_use]
    pub fn gravity(&self) -> Gravity {
        self.navigator.gravity()
    }

    /// Sets the edge short content rests against.
    pub fn set_gravity(&mut self, gravity: Gravity) {
        if self.navigator.gravity() != gravity {
            self.navigator.set_gravity(gravity);
            self.request_layout();
        }
    }

    /// Scrolls the least amount that brings item `index` fully into view.
    pub fn show(&mut self, index: usize) {
        self.set_target_position(TargetPosition::MinDistanceTo {
            index,
            min: Offset::FromStart(0.0),
            max: Offset::FromEnd(0.0),
        });
    }

    /// Puts item `index` at the viewport start.
    pub fn show_as_first(&mut self, index: usize) {
        self.show_at_offset(index, 0.0);
    }

    /// Puts item `index` at the viewport end.
    pub fn show_as_last(&mut self, index: usize) {
        self.set_target_position(TargetPosition::EndOffEnd { index, offset: 0.0 });
    }

    /// Puts the start of item `index` at `offset` from the viewport start.
    pub fn show_at_offset(&mut self, index: usize, offset: f64) {
        self.set_target_position(TargetPosition::StartOffStart { index, offset });
    }

    /// Scrolls the least amount that brings `region` of item `index` into view.
    ///
    /// `region` is relative to the item's cell origin.
    pub fn show_region(&mut self, index: usize, region: Rect) {
        let orientation = self.orientation();
        self.set_target_position(TargetPosition::MinDistanceTo {
            index,
            min: Offset::FromStart(orientation.length_start(region)),
            max: Offset::FromStart(orientation.length_end(region)),
        });
        self.show_breadth_region(
            orientation.breadth_start(region),
            orientation.breadth_end(region),
        );
    }

    fn show_breadth_region(&mut self, from: f64, to: f64) {
        let offset = self.breadth_offset;
        let before = from - offset;
        let after = self.sizes.viewport_breadth() - to + offset;
        if before < 0.0 && after > 0.0 {
            self.set_breadth_offset(offset - (-before).min(after));
        } else if after < 0.0 && before > 0.0 {
            self.set_breadth_offset(offset - after.max(-before));
        }
    }

    /// Scrolls so a point `offset` along the length axis, measured from the
    /// viewport start, comes into view.
    ///
    /// Scrolls relative to the last laid out position, so repeating the call
    /// before layout has no further effect.
    pub fn show_length_offset(&mut self, offset: f64) {
        let viewport = self.sizes.viewport_length();
        if offset < 0.0 {
            self.scroll_current_position_by(offset);
        } else if offset > viewport {
            self.scroll_current_position_by(offset - viewport);
        }
    }

    fn scroll_current_position_by(&mut self, delta: f64) {
        self.navigator.scroll_current_position_by(delta);
        self.request_layout();
    }

    // --- Scrolling ---

    /// Scrolls the content by `(dx, dy)` pixels.
    ///
    /// Scrolls along the length axis accumulate until the next layout.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        let (breadth, length) = self.orientation().split(Point::new(dx, dy));
        if breadth != 0.0 {
            self.set_breadth_offset(self.breadth_offset + breadth);
        }
        if length != 0.0 {
            let target = self.navigator.target().scroll_by(length);
            self.set_target_position(target);
        }
    }

    /// Scrolls horizontally by `dx` pixels.
    pub fn scroll_x(&mut self, dx: f64) {
        self.scroll_by(dx, 0.0);
    }

    /// Scrolls vertically by `dy` pixels.
    pub fn scroll_y(&mut self, dy: f64) {
        self.scroll_by(0.0, dy);
    }

    /// Scrolls to the absolute content position `(x, y)`.
    ///
    /// The resulting scroll estimate is published with the next layout
    /// instead of waiting for the settle window.
    pub fn scroll_to_pixel(&mut self, x: f64, y: f64) {
        let (breadth, length) = self.orientation().split(Point::new(x, y));
        self.set_breadth_offset(breadth);
        self.sizes.publish_next_offset_immediately();
        self.set_length_offset(length);
    }

    /// Scrolls horizontally to the absolute content position `x`.
    pub fn scroll_x_to_pixel(&mut self, x: f64) {
        let estimated_y = self.estimated_scroll_y();
        self.scroll_to_pixel(x, estimated_y);
    }

    /// Scrolls vertically to the absolute content position `y`.
    pub fn scroll_y_to_pixel(&mut self, y: f64) {
        let estimated_x = self.estimated_scroll_x();
        self.scroll_to_pixel(estimated_x, y);
    }

    /// Scrolls along the length axis to an estimated absolute offset.
    ///
    /// Distances shorter than the viewport scroll relative to the current
    /// position. Longer ones jump: the first visible item is guessed from the
    /// average length, so no cell in between is materialized.
    pub fn set_length_offset(&mut self, offset: f64) {
        let viewport = self.sizes.viewport_length();
        let max = (self.sizes.total_length_estimate() - viewport).max(0.0);
        let offset = offset.clamp(0.0, max);
        let diff = offset - self.sizes.length_offset_estimate();
        if diff == 0.0 {
            return;
        }
        if diff.abs() < viewport {
            self.scroll_current_position_by(diff);
        } else {
            self.jump_to_absolute_position(offset);
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "the floored quotient is non-negative and compared against the item count"
    )]
    fn jump_to_absolute_position(&mut self, offset: f64) {
        if self.items.is_empty() {
            return;
        }
        let Some(average) = self.sizes.average_length_estimate(&self.cells) else {
            return;
        };
        let first = (offset / average).floor() as usize;
        #[cfg(feature = "tracing")]
        tracing::debug!(offset, average, first, "jumping to absolute position");
        let target = if first < self.items.len() {
            TargetPosition::StartOffStart {
                index: first,
                offset: -(offset % average),
            }
        } else {
            TargetPosition::EndOffEnd {
                index: self.items.len() - 1,
                offset: 0.0,
            }
        };
        self.set_target_position(target);
    }

    /// How far the content is scrolled along the breadth axis.
    #[must_use]
    pub fn breadth_offset(&self) -> f64 {
        self.breadth_offset
    }

    /// Scrolls along the breadth axis, clamped to the content breadth.
    pub fn set_breadth_offset(&mut self, offset: f64) {
        let max = (self.sizes.cell_breadth() - self.sizes.viewport_breadth()).max(0.0);
        let offset = offset.clamp(0.0, max);
        if offset != self.breadth_offset {
            self.breadth_offset = offset;
            self.request_layout();
        }
    }

    fn clamp_breadth_offset(&mut self) {
        let max = (self.sizes.cell_breadth() - self.sizes.viewport_breadth()).max(0.0);
        self.breadth_offset = self.breadth_offset.clamp(0.0, max);
    }

    // --- Estimates ---

    /// Published estimate of the scroll offset along the length axis.
    #[must_use]
    pub fn length_offset_estimate(&self) -> f64 {
        self.sizes.length_offset_estimate()
    }

    fn along_axes(&self, breadth: f64, length: f64) -> Point {
        self.orientation().point(breadth, length)
    }

    /// Estimated total content width.
    #[must_use]
    pub fn total_width_estimate(&self) -> f64 {
        self.along_axes(
            self.sizes.total_breadth_estimate(),
            self.sizes.total_length_estimate(),
        )
        .x
    }

    /// Estimated total content height.
    #[must_use]
    pub fn total_height_estimate(&self) -> f64 {
        self.along_axes(
            self.sizes.total_breadth_estimate(),
            self.sizes.total_length_estimate(),
        )
        .y
    }

    /// Estimated horizontal scroll position.
    #[must_use]
    pub fn estimated_scroll_x(&self) -> f64 {
        self.along_axes(self.breadth_offset, self.sizes.length_offset_estimate())
            .x
    }

    /// Estimated vertical scroll position.
    #[must_use]
    pub fn estimated_scroll_y(&self) -> f64 {
        self.along_axes(self.breadth_offset, self.sizes.length_offset_estimate())
            .y
    }

    /// Scrolls horizontally to an estimated position, as a scrollbar would.
    pub fn set_estimated_scroll_x(&mut self, x: f64) {
        match self.orientation() {
            Orientation::Vertical => self.set_breadth_offset(x),
            Orientation::Horizontal => self.set_length_offset(x),
        }
    }

    /// Scrolls vertically to an estimated position, as a scrollbar would.
    pub fn set_estimated_scroll_y(&mut self, y: f64) {
        match self.orientation() {
            Orientation::Vertical => self.set_length_offset(y),
            Orientation::Horizontal => self.set_breadth_offset(y),
        }
    }

    /// State for a horizontal scrollbar.
    #[must_use]
    pub fn horizontal_scrollbar(&self) -> ScrollbarState {
        ScrollbarState::new(
            self.total_width_estimate(),
            self.viewport_size().width,
            self.estimated_scroll_x(),
        )
    }

    /// State for a vertical scrollbar.
    #[must_use]
    pub fn vertical_scrollbar(&self) -> ScrollbarState {
        ScrollbarState::new(
            self.total_height_estimate(),
            self.viewport_size().height,
            self.estimated_scroll_y(),
        )
    }

    // --- Cells ---

    /// The cell for `index`, creating it if needed.
    ///
    /// A cell created here is not placed until it falls in the viewport on a
    /// layout pass, and may be released by that pass otherwise.
    #[track_caller]
    pub fn cell(&mut self, index: usize) -> &mut C {
        assert!(
            index < self.items.len(),
            "cell index {index} out of bounds for {} items",
            self.items.len()
        );
        self.cells.get_cell(index, &self.items)
    }

    /// The cell for `index` if the last layout placed it.
    #[must_use]
    pub fn cell_if_visible(&self, index: usize) -> Option<&C> {
        self.cells
            .cell_if_present(index)
            .filter(|cell| cell.node().is_visible())
    }

    /// Cells placed by the last layout, in index order.
    pub fn visible_cells(&self) -> impl DoubleEndedIterator<Item = (usize, &C)> + '_ {
        self.cells
            .present_cells()
            .filter(|(_, cell)| cell.node().is_visible())
    }

    /// First item placed by the last layout.
    #[must_use]
    pub fn first_visible_index(&self) -> Option<usize> {
        self.cells.first_visible_from(0)
    }

    /// Last item placed by the last layout.
    #[must_use]
    pub fn last_visible_index(&self) -> Option<usize> {
        self.cells.last_visible_before(self.items.len())
    }

    /// Items placed by the last layout; empty if none.
    #[must_use]
    pub fn visible_indices(&self) -> Range<usize> {
        match (self.first_visible_index(), self.last_visible_index()) {
            (Some(first), Some(last)) => first..last + 1,
            _ => 0..0,
        }
    }

    /// Finds what lies under a viewport point.
    ///
    /// Lays out first if needed. Points beyond the viewport are resolved by
    /// placing the cells between, so a hit is exact even off screen. Cells
    /// placed that way stay visible until the next layout, which this
    /// requests.
    pub fn hit(&mut self, x: f64, y: f64) -> FlowHit<'_, C> {
        let orientation = self.orientation();
        let (breadth, length) = orientation.split(Point::new(x, y));
        let breadth = breadth + self.breadth_offset;
        if self.items.is_empty() {
            return FlowHit::AfterCells {
                offset: orientation.point(breadth, length),
            };
        }
        self.layout();

        let mut pos = CellPositioner::new(
            &mut self.cells,
            &mut self.sizes,
            &self.items,
            self.breadth_offset,
        );
        let (Some(first), Some(last)) = (pos.first_visible_index(), pos.last_visible_index())
        else {
            return FlowHit::AfterCells {
                offset: orientation.point(breadth, length),
            };
        };
        let (placed_first, placed_last) = (first, last);
        let first = fill_backward_from0(&mut pos, first, length);
        let last = fill_forward_from0(&mut pos, last, length);
        if first != placed_first || last != placed_last {
            self.pending |= Pending::LAYOUT;
        }

        let start = pos.start(first);
        if length < start {
            return FlowHit::BeforeCells {
                offset: orientation.point(breadth, length - start),
            };
        }
        let end = pos.end(last);
        if length >= end {
            return FlowHit::AfterCells {
                offset: orientation.point(breadth, length - end),
            };
        }
        let Some(index) = (first..=last).find(|&i| length < pos.end(i)) else {
            unreachable!("a hit between the first and last cell lands in a cell");
        };
        let edge = pos.start(index);
        match self.cells.cell_if_present(index) {
            Some(cell) => FlowHit::Cell {
                index,
                cell,
                offset: orientation.point(breadth, length - edge),
            },
            None => unreachable!("cell {index} was placed by this hit test"),
        }
    }

    /// Releases every cell for good.
    ///
    /// Present cells are returned to the pool, then the pool disposes them.
    /// Dropping the flow does the same.
    pub fn dispose(self) {
        drop(self);
    }
}
