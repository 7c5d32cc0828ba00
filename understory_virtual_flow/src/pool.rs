// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recycling of cells that are no longer present.

use core::fmt;
use std::collections::VecDeque;

use crate::Cell;

/// Creates cells and recycles reusable ones.
///
/// Cells are keyed only by reusability, not identity: any pooled cell may be
/// rebound to any item. Non-reusable cells are disposed as soon as they are
/// returned.
pub struct CellPool<T, C> {
    factory: Box<dyn FnMut(usize, &T) -> C>,
    pooled: VecDeque<C>,
}

impl<T, C> fmt::Debug for CellPool<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellPool")
            .field("pooled", &self.pooled.len())
            .finish_non_exhaustive()
    }
}

impl<T, C: Cell<T>> CellPool<T, C> {
    /// Creates an empty pool around a factory receiving `(index, item)`.
    #[must_use]
    pub fn new(factory: impl FnMut(usize, &T) -> C + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            pooled: VecDeque::new(),
        }
    }

    /// Returns a cell for `item`, reusing a pooled one if available.
    ///
    /// A pooled cell is rebound with [`Cell::update_item`]; otherwise the factory
    /// creates a new cell.
    pub fn get_cell(&mut self, index: usize, item: &T) -> C {
        match self.pooled.pop_front() {
            Some(mut cell) => {
                cell.update_item(item);
                cell
            }
            None => (self.factory)(index, item),
        }
    }

    /// Takes back a cell that is no longer present.
    ///
    /// The cell is reset, then pooled if reusable and disposed otherwise.
    pub fn accept_cell(&mut self, mut cell: C) {
        cell.reset();
        if cell.is_reusable() {
            self.pooled.push_back(cell);
        } else {
            cell.dispose();
        }
    }

    /// Disposes every pooled cell.
    pub fn dispose(&mut self) {
        for mut cell in self.pooled.drain(..) {
            cell.dispose();
        }
    }

    /// Number of cells waiting for reuse.
    #[must_use]
    pub fn pooled_len(&self) -> usize {
        self.pooled.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::Size;

    use super::CellPool;
    use crate::{Cell, LeafNode};

    #[derive(Debug)]
    struct Recycled {
        node: LeafNode,
        item: u32,
        reusable: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Cell<u32> for Recycled {
        type Node = LeafNode;

        fn node(&self) -> &LeafNode {
            &self.node
        }

        fn node_mut(&mut self) -> &mut LeafNode {
            &mut self.node
        }

        fn is_reusable(&self) -> bool {
            self.reusable
        }

        fn update_item(&mut self, item: &u32) {
            self.log.borrow_mut().push(format!("update {} -> {item}", self.item));
            self.item = *item;
        }

        fn reset(&mut self) {
            self.log.borrow_mut().push(format!("reset {}", self.item));
        }

        fn dispose(&mut self) {
            self.log.borrow_mut().push(format!("dispose {}", self.item));
        }
    }

    fn pool(reusable: bool, log: &Rc<RefCell<Vec<String>>>) -> CellPool<u32, Recycled> {
        let log = log.clone();
        CellPool::new(move |_, item: &u32| Recycled {
            node: LeafNode::new(Size::new(10.0, 10.0)),
            item: *item,
            reusable,
            log: log.clone(),
        })
    }

    #[test]
    fn reusable_cells_are_reset_then_rebound() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut pool = pool(true, &log);

        let cell = pool.get_cell(0, &1);
        pool.accept_cell(cell);
        assert_eq!(pool.pooled_len(), 1);

        let cell = pool.get_cell(5, &7);
        assert_eq!(cell.item, 7);
        assert_eq!(pool.pooled_len(), 0);
        assert_eq!(*log.borrow(), ["reset 1", "update 1 -> 7"]);
    }

    #[test]
    fn non_reusable_cells_are_reset_then_disposed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut pool = pool(false, &log);

        let cell = pool.get_cell(0, &3);
        pool.accept_cell(cell);
        assert_eq!(pool.pooled_len(), 0);
        assert_eq!(*log.borrow(), ["reset 3", "dispose 3"]);
    }

    #[test]
    fn dispose_drains_the_pool() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut pool = pool(true, &log);
        let a = pool.get_cell(0, &1);
        let b = pool.get_cell(1, &2);
        pool.accept_cell(a);
        pool.accept_cell(b);
        log.borrow_mut().clear();

        pool.dispose();
        assert_eq!(pool.pooled_len(), 0);
        assert_eq!(*log.borrow(), ["dispose 1", "dispose 2"]);
    }
}
