// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size measurement and content size estimation.

use core::ops::Range;
use core::time::Duration;

use kurbo::Size;

use crate::cell_list::CellListManager;
use crate::memo::MemoList;
use crate::prefix::Fenwick;
use crate::settle::{SettleWindows, Succession};
use crate::{Cell, FlowNode, ListChange, Orientation};

#[derive(Clone, Copy, Debug, PartialEq)]
struct LengthStats {
    average: Option<f64>,
    total: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Published {
    average: Option<f64>,
    total_length: f64,
    total_breadth: f64,
    length_offset: f64,
}

/// Measured breadths and lengths, and the estimates derived from them.
///
/// Measurements are memoized per item and survive cropping, so the set of
/// known lengths grows as the user scrolls. All cells share one breadth: the
/// largest known minimum breadth, or the viewport breadth if that is larger.
/// Lengths are measured at that shared breadth and all of them are dropped
/// when it changes.
///
/// Estimates are not published directly. Measurement changes push into
/// settle timers and the published values only move once the churn has
/// settled, see [`SettleWindows`].
#[derive(Debug)]
pub(crate) struct SizeTracker {
    orientation: Orientation,
    viewport: Size,
    breadths: MemoList<f64>,
    // Cached maximum of `breadths`; `None` when a removal may have lowered it.
    max_breadth: Option<f64>,
    lengths: MemoList<f64>,
    length_sums: Fenwick<f64>,
    lengths_measured_at: Option<f64>,
    stats_dirty: bool,
    stats_timer: Succession<()>,
    shrink_timer: Succession<LengthStats>,
    offset_timer: Succession<f64>,
    last_raw_offset: Option<f64>,
    offset_immediately: bool,
    published: Published,
    revision: u64,
}

impl SizeTracker {
    pub(crate) fn new(orientation: Orientation, len: usize) -> Self {
        let windows = SettleWindows::default();
        Self {
            orientation,
            viewport: Size::ZERO,
            breadths: MemoList::new(len),
            max_breadth: Some(0.0),
            lengths: MemoList::new(len),
            length_sums: Fenwick::new(len),
            lengths_measured_at: None,
            stats_dirty: true,
            stats_timer: Succession::new(windows.churn),
            shrink_timer: Succession::new(windows.shrink),
            offset_timer: Succession::new(windows.churn),
            last_raw_offset: None,
            offset_immediately: false,
            published: Published::default(),
            revision: 0,
        }
    }

    pub(crate) fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub(crate) fn viewport(&self) -> Size {
        self.viewport
    }

    pub(crate) fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub(crate) fn viewport_length(&self) -> f64 {
        self.orientation.length(self.viewport)
    }

    pub(crate) fn viewport_breadth(&self) -> f64 {
        self.orientation.breadth(self.viewport)
    }

    pub(crate) fn set_windows(&mut self, windows: SettleWindows) {
        self.stats_timer.set_window(windows.churn);
        self.offset_timer.set_window(windows.churn);
        self.shrink_timer.set_window(windows.shrink);
    }

    /// Largest minimum breadth measured so far.
    pub(crate) fn max_known_breadth(&mut self) -> f64 {
        if let Some(max) = self.max_breadth {
            return max;
        }
        let max = self.breadths.iter().map(|(_, b)| *b).fold(0.0, f64::max);
        self.max_breadth = Some(max);
        max
    }

    /// The breadth every cell is laid out at.
    pub(crate) fn cell_breadth(&mut self) -> f64 {
        self.max_known_breadth().max(self.viewport_breadth())
    }

    /// Measures the minimum breadth of `node` for `index` if unknown, then
    /// returns the shared cell breadth.
    pub(crate) fn breadth_for<N: FlowNode + ?Sized>(&mut self, index: usize, node: &N) -> f64 {
        if !self.breadths.is_memoized(index) {
            let breadth = self.orientation.min_breadth(node);
            debug_assert!(breadth.is_finite(), "min breadth must be finite; got {breadth}");
            self.breadths.insert(index, breadth);
            if let Some(max) = self.max_breadth {
                self.max_breadth = Some(max.max(breadth));
            }
        }
        self.cell_breadth()
    }

    /// Preferred length of `node` for `index` at the shared breadth, memoized.
    pub(crate) fn length_for<N: FlowNode + ?Sized>(&mut self, index: usize, node: &N) -> f64 {
        let breadth = self.cell_breadth();
        self.invalidate_lengths_unless_measured_at(breadth);
        if let Some(length) = self.lengths.get(index) {
            return *length;
        }
        let length = self.orientation.pref_length(node, breadth).max(0.0);
        debug_assert!(length.is_finite(), "preferred length must be finite; got {length}");
        self.lengths.insert(index, length);
        self.length_sums.add(index, length);
        self.stats_dirty = true;
        length
    }

    fn invalidate_lengths_unless_measured_at(&mut self, breadth: f64) {
        if self.lengths_measured_at == Some(breadth) {
            return;
        }
        if self.lengths.memoized_count() > 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                breadth,
                dropped = self.lengths.memoized_count(),
                "cell breadth changed, dropping measured lengths"
            );
            self.lengths.clear();
            self.length_sums = Fenwick::new(self.lengths.len());
            self.stats_dirty = true;
        }
        self.lengths_measured_at = Some(breadth);
    }

    /// Drops the cached breadth and length of one item.
    pub(crate) fn forget_size_of(&mut self, index: usize) {
        self.forget_range(index..index + 1);
    }

    /// Drops cached breadths and lengths for a range of items.
    pub(crate) fn forget_range(&mut self, range: Range<usize>) {
        if !self.breadths.forget(range.clone()).is_empty() {
            self.max_breadth = None;
        }
        let removed = self.lengths.forget(range);
        for (index, length) in &removed {
            self.length_sums.sub(*index, *length);
        }
        if !removed.is_empty() {
            self.stats_dirty = true;
        }
    }

    pub(crate) fn items_changed(&mut self, change: ListChange) {
        if !self.breadths.splice(change).is_empty() {
            self.max_breadth = None;
        }
        self.lengths.splice(change);
        self.length_sums =
            Fenwick::from_weights(self.lengths.slots().map(|l| l.copied().unwrap_or(0.0)));
        self.stats_dirty = true;
    }

    /// Measures every present cell whose length is still unknown.
    pub(crate) fn measure_present<T, C: Cell<T>>(&mut self, cells: &CellListManager<T, C>) {
        for (index, cell) in cells.present_cells() {
            if !self.lengths.is_memoized(index) {
                self.length_for(index, cell.node());
            }
        }
    }

    /// Average of all measured lengths, after measuring the present cells.
    ///
    /// `None` when nothing with a positive length has been measured.
    pub(crate) fn average_length_estimate<T, C: Cell<T>>(
        &mut self,
        cells: &CellListManager<T, C>,
    ) -> Option<f64> {
        self.measure_present(cells);
        let count = self.lengths.memoized_count();
        if count == 0 {
            return None;
        }
        let average = self.length_sums.total() / count as f64;
        (average > 0.0).then_some(average)
    }

    fn current_stats<T, C: Cell<T>>(&mut self, cells: &CellListManager<T, C>) -> LengthStats {
        let average = self.average_length_estimate(cells);
        LengthStats {
            average,
            total: average.map_or(0.0, |a| a * self.lengths.len() as f64),
        }
    }

    /// Scroll distance consumed before the first visible cell.
    ///
    /// Known lengths before it are summed; unknown ones are extrapolated with
    /// the published average.
    fn raw_length_offset<T, C: Cell<T>>(&self, cells: &CellListManager<T, C>) -> Option<f64> {
        if self.lengths.len() == 0 {
            return Some(0.0);
        }
        let first = cells.first_visible_from(0)?;
        let bounds = cells.cell_if_present(first)?.node().bounds();
        let known_count = self.lengths.count_before(first);
        let known = self.length_sums.prefix(first);
        let unknown = (first - known_count) as f64 * self.published.average.unwrap_or(0.0);
        Some((known + unknown - self.orientation.length_start(bounds)).round())
    }

    /// Feeds the settle timers after a layout pass or an item change.
    ///
    /// Returns `true` if a published estimate changed right away.
    pub(crate) fn schedule<T, C: Cell<T>>(
        &mut self,
        cells: &CellListManager<T, C>,
        now: Duration,
    ) -> bool {
        let mut changed = self.publish_breadth();
        if core::mem::take(&mut self.stats_dirty) {
            self.stats_timer.push((), now);
        }
        let immediately = core::mem::take(&mut self.offset_immediately);
        if let Some(offset) = self.raw_length_offset(cells) {
            if immediately {
                self.offset_timer.cancel();
                self.last_raw_offset = Some(offset);
                changed |= self.publish_length_offset(offset);
            } else if self.last_raw_offset != Some(offset) {
                self.last_raw_offset = Some(offset);
                self.offset_timer.push(offset, now);
            }
        }
        changed
    }

    /// Publishes whatever has settled by `now`.
    pub(crate) fn poll<T, C: Cell<T>>(
        &mut self,
        cells: &CellListManager<T, C>,
        now: Duration,
    ) -> bool {
        let mut changed = false;
        if self.stats_timer.poll(now).is_some() {
            let stats = self.current_stats(cells);
            changed |= self.offer_stats(stats, cells, now);
        }
        if let Some(stats) = self.shrink_timer.poll(now) {
            changed |= self.publish_stats(stats, cells);
        }
        if let Some(offset) = self.offset_timer.poll(now) {
            changed |= self.publish_length_offset(offset);
        }
        changed
    }

    /// Publishes current values now, bypassing every window.
    pub(crate) fn flush<T, C: Cell<T>>(&mut self, cells: &CellListManager<T, C>) -> bool {
        self.stats_timer.cancel();
        self.shrink_timer.cancel();
        self.offset_timer.cancel();
        self.offset_immediately = false;
        let mut changed = self.publish_breadth();
        let stats = self.current_stats(cells);
        self.stats_dirty = false;
        changed |= self.publish_stats(stats, cells);
        if let Some(offset) = self.raw_length_offset(cells) {
            self.last_raw_offset = Some(offset);
            changed |= self.publish_length_offset(offset);
        }
        changed
    }

    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        [
            self.stats_timer.deadline(),
            self.shrink_timer.deadline(),
            self.offset_timer.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Makes the next scheduled length offset skip the churn window.
    pub(crate) fn publish_next_offset_immediately(&mut self) {
        self.offset_immediately = true;
    }

    fn offer_stats<T, C: Cell<T>>(
        &mut self,
        stats: LengthStats,
        cells: &CellListManager<T, C>,
        now: Duration,
    ) -> bool {
        if stats.total >= self.published.total_length {
            self.shrink_timer.cancel();
            self.publish_stats(stats, cells)
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                published = self.published.total_length,
                offered = stats.total,
                "holding back shrinking total length"
            );
            self.shrink_timer.push(stats, now);
            false
        }
    }

    fn publish_stats<T, C: Cell<T>>(
        &mut self,
        stats: LengthStats,
        cells: &CellListManager<T, C>,
    ) -> bool {
        if self.published.average == stats.average && self.published.total_length == stats.total {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(average = ?stats.average, total = stats.total, "published length estimate");
        self.published.average = stats.average;
        self.published.total_length = stats.total;
        self.revision += 1;
        // The offset extrapolates with the average, so republish it alongside.
        if let Some(offset) = self.raw_length_offset(cells) {
            self.offset_timer.cancel();
            self.last_raw_offset = Some(offset);
            self.publish_length_offset(offset);
        }
        true
    }

    fn publish_length_offset(&mut self, offset: f64) -> bool {
        if self.published.length_offset == offset {
            return false;
        }
        self.published.length_offset = offset;
        self.revision += 1;
        true
    }

    fn publish_breadth(&mut self) -> bool {
        let breadth = self.max_known_breadth();
        if self.published.total_breadth == breadth {
            return false;
        }
        self.published.total_breadth = breadth;
        self.revision += 1;
        true
    }

    /// Published average length, if any.
    pub(crate) fn published_average(&self) -> Option<f64> {
        self.published.average
    }

    pub(crate) fn total_length_estimate(&self) -> f64 {
        self.published.total_length
    }

    pub(crate) fn total_breadth_estimate(&self) -> f64 {
        self.published.total_breadth
    }

    pub(crate) fn length_offset_estimate(&self) -> f64 {
        self.published.length_offset
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }
}
