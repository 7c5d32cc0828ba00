// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index-aligned memoization slots with order statistics.

use core::fmt;
use core::ops::Range;

use crate::ListChange;
use crate::prefix::Fenwick;

/// One optional value per item, plus a Fenwick tree over which slots are filled.
///
/// The tree answers "how many memoized before `i`" and "index of the `n`th
/// memoized slot" in `O(log n)`, which keeps fill and crop independent of the
/// collection size.
#[derive(Clone)]
pub(crate) struct MemoList<V> {
    slots: Vec<Option<V>>,
    present: Fenwick<usize>,
    count: usize,
}

impl<V> fmt::Debug for MemoList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoList")
            .field("len", &self.slots.len())
            .field("memoized", &self.count)
            .finish_non_exhaustive()
    }
}

impl<V> MemoList<V> {
    /// Creates `len` empty slots.
    pub(crate) fn new(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self {
            slots,
            present: Fenwick::new(len),
            count: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn memoized_count(&self) -> usize {
        self.count
    }

    pub(crate) fn is_memoized(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&V> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Memoizes `value` at `index`, returning the value it replaces.
    #[track_caller]
    pub(crate) fn insert(&mut self, index: usize, value: V) -> Option<V> {
        let len = self.slots.len();
        let Some(slot) = self.slots.get_mut(index) else {
            panic!("memo slot {index} out of bounds for {len} slots");
        };
        let old = slot.replace(value);
        if old.is_none() {
            self.present.add(index, 1);
            self.count += 1;
        }
        old
    }

    /// Forgets the value at `index`, if any.
    pub(crate) fn take(&mut self, index: usize) -> Option<V> {
        let old = self.slots.get_mut(index)?.take();
        if old.is_some() {
            self.present.sub(index, 1);
            self.count -= 1;
        }
        old
    }

    /// Number of memoized slots in `0..pos`.
    pub(crate) fn count_before(&self, pos: usize) -> usize {
        self.present.prefix(pos)
    }

    /// Index of the `n`th memoized slot.
    pub(crate) fn nth_index(&self, n: usize) -> Option<usize> {
        if n >= self.count {
            return None;
        }
        self.present.find_nth(n)
    }

    /// Last memoized index strictly before `pos`.
    pub(crate) fn last_before(&self, pos: usize) -> Option<usize> {
        let n = self.count_before(pos);
        if n == 0 { None } else { self.nth_index(n - 1) }
    }

    /// First memoized index at or after `pos`.
    pub(crate) fn first_from(&self, pos: usize) -> Option<usize> {
        self.nth_index(self.count_before(pos))
    }

    /// Memoized indices in ascending order.
    pub(crate) fn indices(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..self.count).filter_map(|n| self.present.find_nth(n))
    }

    /// Memoized `(index, value)` pairs in ascending index order.
    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &V)> + '_ {
        self.indices()
            .filter_map(|i| self.slots[i].as_ref().map(|v| (i, v)))
    }

    /// Raw slot view, one entry per item.
    pub(crate) fn slots(&self) -> impl Iterator<Item = Option<&V>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// Forgets every memoized value in `range`, returning them in index order.
    pub(crate) fn forget(&mut self, range: Range<usize>) -> Vec<(usize, V)> {
        let end = range.end.min(self.slots.len());
        let start = range.start.min(end);
        let first = self.count_before(start);
        let last = self.count_before(end);
        let indices: Vec<usize> = (first..last)
            .filter_map(|n| self.present.find_nth(n))
            .collect();
        indices
            .into_iter()
            .filter_map(|i| self.take(i).map(|v| (i, v)))
            .collect()
    }

    /// Forgets everything, keeping the slot count.
    pub(crate) fn clear(&mut self) -> Vec<(usize, V)> {
        self.forget(0..self.slots.len())
    }

    /// Applies a collection splice, returning the values of removed items in index order.
    ///
    /// Slots before `change.from` are untouched, slots after the removed range shift by
    /// the size delta, and added items start unmemoized.
    pub(crate) fn splice(&mut self, change: ListChange) -> Vec<V> {
        let from = change.from.min(self.slots.len());
        let to = (change.from + change.removed).min(self.slots.len());
        let removed: Vec<V> = self
            .slots
            .splice(from..to, core::iter::repeat_with(|| None).take(change.added))
            .flatten()
            .collect();
        self.rebuild_index();
        removed
    }

    fn rebuild_index(&mut self) {
        self.present = Fenwick::from_weights(self.slots.iter().map(|s| usize::from(s.is_some())));
        self.count = self.present.total();
    }
}
