// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A Fenwick (binary indexed) tree for prefix sums over index-aligned slots.

use core::ops::{Add, Sub};

/// Prefix sums over `len` slots with `O(log n)` point updates and queries.
///
/// Weights are expected to stay non-negative; [`Fenwick::find_nth`] relies on it.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick<W> {
    // One-based implicit tree. `tree[0]` is unused.
    tree: Vec<W>,
}

impl<W> Fenwick<W>
where
    W: Copy + Default + Add<Output = W> + Sub<Output = W>,
{
    /// Creates a tree of `len` zero weights.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            tree: vec![W::default(); len + 1],
        }
    }

    /// Builds a tree from per-slot weights in linear time.
    pub(crate) fn from_weights(weights: impl IntoIterator<Item = W>) -> Self {
        let mut tree = vec![W::default()];
        tree.extend(weights);
        let n = tree.len();
        for i in 1..n {
            let parent = i + lowbit(i);
            if parent < n {
                let w = tree[i];
                tree[parent] = tree[parent] + w;
            }
        }
        Self { tree }
    }

    /// Number of slots.
    pub(crate) fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Adds `delta` to the weight of slot `index`.
    pub(crate) fn add(&mut self, index: usize, delta: W) {
        debug_assert!(index < self.len(), "Fenwick slot {index} out of bounds");
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] = self.tree[i] + delta;
            i += lowbit(i);
        }
    }

    /// Subtracts `delta` from the weight of slot `index`.
    pub(crate) fn sub(&mut self, index: usize, delta: W) {
        debug_assert!(index < self.len(), "Fenwick slot {index} out of bounds");
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] = self.tree[i] - delta;
            i += lowbit(i);
        }
    }

    /// Sum of the weights of slots `0..end`. `end` is clamped to the length.
    pub(crate) fn prefix(&self, end: usize) -> W {
        let mut i = end.min(self.len());
        let mut acc = W::default();
        while i > 0 {
            acc = acc + self.tree[i];
            i -= lowbit(i);
        }
        acc
    }

    /// Sum of all weights.
    pub(crate) fn total(&self) -> W {
        self.prefix(self.len())
    }
}

impl Fenwick<usize> {
    /// Returns the slot holding the `n`th unit of weight (zero-based).
    ///
    /// With 0/1 weights this is "index of the `n`th set slot".
    pub(crate) fn find_nth(&self, n: usize) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        // Largest `pos` with `prefix(pos) <= n`, found by descending powers of two.
        let mut pos = 0;
        let mut remaining = n;
        let mut step = 1_usize << (usize::BITS - 1 - len.leading_zeros());
        while step > 0 {
            let next = pos + step;
            if next <= len && self.tree[next] <= remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        (pos < len).then_some(pos)
    }
}

fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::Fenwick;

    #[test]
    fn prefix_sums_follow_point_updates() {
        let mut tree = Fenwick::<usize>::new(10);
        tree.add(0, 1);
        tree.add(3, 2);
        tree.add(9, 5);
        assert_eq!(tree.prefix(0), 0);
        assert_eq!(tree.prefix(1), 1);
        assert_eq!(tree.prefix(4), 3);
        assert_eq!(tree.total(), 8);

        tree.sub(3, 2);
        assert_eq!(tree.prefix(4), 1);
        // Past-the-end prefixes clamp to the total.
        assert_eq!(tree.prefix(100), 6);
    }

    #[test]
    fn from_weights_matches_incremental_build() {
        let weights = [0_usize, 1, 1, 0, 1, 0, 0, 1, 1];
        let built = Fenwick::from_weights(weights);
        let mut incremental = Fenwick::new(weights.len());
        for (i, w) in weights.iter().enumerate() {
            incremental.add(i, *w);
        }
        for end in 0..=weights.len() {
            assert_eq!(built.prefix(end), incremental.prefix(end), "prefix({end})");
        }
    }

    #[test]
    fn find_nth_locates_set_slots() {
        let tree = Fenwick::from_weights([0_usize, 1, 0, 0, 1, 1, 0]);
        assert_eq!(tree.find_nth(0), Some(1));
        assert_eq!(tree.find_nth(1), Some(4));
        assert_eq!(tree.find_nth(2), Some(5));
        assert_eq!(tree.find_nth(3), None);
        assert_eq!(Fenwick::<usize>::new(0).find_nth(0), None);
    }

    #[test]
    fn float_weights_sum() {
        let tree = Fenwick::from_weights([16.0_f64, 0.0, 32.0, 8.0]);
        assert_eq!(tree.prefix(2), 16.0);
        assert_eq!(tree.total(), 56.0);
    }
}
