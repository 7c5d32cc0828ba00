// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cells: recyclable wrappers around one host node.

use core::fmt;

use smallvec::SmallVec;

use crate::FlowNode;

/// A cell displays one item at a time through exactly one node.
///
/// Lifecycle: a cell is created by the flow's factory for an item, stays
/// *present* while the flow keeps it, and is then either disposed or, if
/// [`Cell::is_reusable`], pooled and later rebound to a different item with
/// [`Cell::update_item`]. [`Cell::reset`] always runs before disposal or pooling.
///
/// All methods except [`Cell::node`] and [`Cell::node_mut`] have defaults, so a
/// non-reusable cell only needs to expose its node.
pub trait Cell<T> {
    /// The node type this cell renders through.
    type Node: FlowNode;

    /// The cell's node.
    fn node(&self) -> &Self::Node;

    /// The cell's node, mutably.
    fn node_mut(&mut self) -> &mut Self::Node;

    /// Whether the cell may be pooled and rebound to another item.
    ///
    /// Reusable cells must implement [`Cell::update_item`].
    fn is_reusable(&self) -> bool {
        false
    }

    /// Rebinds a pooled cell to `item`.
    ///
    /// Only called on cells that report [`Cell::is_reusable`]. The default panics.
    fn update_item(&mut self, _item: &T) {
        panic!(
            "update_item called on a cell that does not override it; \
             reusable cells must implement update_item"
        );
    }

    /// Informs the cell of its item's index. Called whenever that index changes.
    fn update_index(&mut self, _index: usize) {}

    /// Releases item-specific state before the cell is pooled or disposed.
    fn reset(&mut self) {}

    /// Releases the cell for good.
    fn dispose(&mut self) {}
}

/// The simplest cell: a node with no item-dependent behavior.
///
/// Not reusable; every item gets a fresh node from the factory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeCell<N> {
    node: N,
}

impl<N> NodeCell<N> {
    /// Wraps `node`.
    #[must_use]
    pub fn new(node: N) -> Self {
        Self { node }
    }

    /// The wrapped node, without naming an item type.
    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }

    /// The wrapped node, mutably.
    pub fn node_mut(&mut self) -> &mut N {
        &mut self.node
    }

    /// Unwraps the node.
    #[must_use]
    pub fn into_node(self) -> N {
        self.node
    }
}

impl<T, N: FlowNode> Cell<T> for NodeCell<N> {
    type Node = N;

    fn node(&self) -> &N {
        &self.node
    }

    fn node_mut(&mut self) -> &mut N {
        &mut self.node
    }
}

struct HookPair<F: ?Sized> {
    before: SmallVec<[Box<F>; 1]>,
    after: SmallVec<[Box<F>; 1]>,
}

impl<F: ?Sized> HookPair<F> {
    fn new() -> Self {
        Self {
            before: SmallVec::new(),
            after: SmallVec::new(),
        }
    }

    // Later decorations wrap earlier ones: their "before" runs first and their
    // "after" runs last.
    fn before(&mut self) -> impl Iterator<Item = &mut Box<F>> {
        self.before.iter_mut().rev()
    }

    fn after(&mut self) -> impl Iterator<Item = &mut Box<F>> {
        self.after.iter_mut()
    }

    fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }
}

/// A cell decorated with closures around its lifecycle methods.
///
/// ```rust
/// use std::cell::Cell as Counter;
/// use std::rc::Rc;
///
/// use kurbo::Size;
/// use understory_virtual_flow::{Cell, CellExt, LeafNode, NodeCell};
///
/// let disposed = Rc::new(Counter::new(0));
/// let seen = disposed.clone();
/// let mut cell = NodeCell::new(LeafNode::new(Size::new(10.0, 10.0)))
///     .hooked()
///     .after_dispose(move || seen.set(seen.get() + 1));
///
/// Cell::<&str>::dispose(&mut cell);
/// assert_eq!(disposed.get(), 1);
/// ```
pub struct Hooked<C, T> {
    inner: C,
    update_item: HookPair<dyn FnMut(&T)>,
    update_index: HookPair<dyn FnMut(usize)>,
    reset: HookPair<dyn FnMut()>,
    dispose: HookPair<dyn FnMut()>,
}

impl<C: fmt::Debug, T> fmt::Debug for Hooked<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooked")
            .field("inner", &self.inner)
            .field("update_item_hooks", &self.update_item.len())
            .field("update_index_hooks", &self.update_index.len())
            .field("reset_hooks", &self.reset.len())
            .field("dispose_hooks", &self.dispose.len())
            .finish()
    }
}

impl<C, T> Hooked<C, T> {
    /// Wraps `inner` with no hooks.
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            update_item: HookPair::new(),
            update_index: HookPair::new(),
            reset: HookPair::new(),
            dispose: HookPair::new(),
        }
    }

    /// The decorated cell.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The decorated cell, mutably.
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Drops the hooks and returns the decorated cell.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Runs `hook` before [`Cell::update_item`].
    #[must_use]
    pub fn before_update_item(mut self, hook: impl FnMut(&T) + 'static) -> Self {
        self.update_item.before.push(Box::new(hook));
        self
    }

    /// Runs `hook` after [`Cell::update_item`].
    #[must_use]
    pub fn after_update_item(mut self, hook: impl FnMut(&T) + 'static) -> Self {
        self.update_item.after.push(Box::new(hook));
        self
    }

    /// Runs `hook` before [`Cell::update_index`].
    #[must_use]
    pub fn before_update_index(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.update_index.before.push(Box::new(hook));
        self
    }

    /// Runs `hook` after [`Cell::update_index`].
    #[must_use]
    pub fn after_update_index(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.update_index.after.push(Box::new(hook));
        self
    }

    /// Runs `hook` before [`Cell::reset`].
    #[must_use]
    pub fn before_reset(mut self, hook: impl FnMut() + 'static) -> Self {
        self.reset.before.push(Box::new(hook));
        self
    }

    /// Runs `hook` after [`Cell::reset`].
    #[must_use]
    pub fn after_reset(mut self, hook: impl FnMut() + 'static) -> Self {
        self.reset.after.push(Box::new(hook));
        self
    }

    /// Runs `hook` before [`Cell::dispose`].
    #[must_use]
    pub fn before_dispose(mut self, hook: impl FnMut() + 'static) -> Self {
        self.dispose.before.push(Box::new(hook));
        self
    }

    /// Runs `hook` after [`Cell::dispose`].
    #[must_use]
    pub fn after_dispose(mut self, hook: impl FnMut() + 'static) -> Self {
        self.dispose.after.push(Box::new(hook));
        self
    }
}

impl<C: Cell<T>, T> Cell<T> for Hooked<C, T> {
    type Node = C::Node;

    fn node(&self) -> &Self::Node {
        self.inner.node()
    }

    fn node_mut(&mut self) -> &mut Self::Node {
        self.inner.node_mut()
    }

    fn is_reusable(&self) -> bool {
        self.inner.is_reusable()
    }

    fn update_item(&mut self, item: &T) {
        for hook in self.update_item.before() {
            hook(item);
        }
        self.inner.update_item(item);
        for hook in self.update_item.after() {
            hook(item);
        }
    }

    fn update_index(&mut self, index: usize) {
        for hook in self.update_index.before() {
            hook(index);
        }
        self.inner.update_index(index);
        for hook in self.update_index.after() {
            hook(index);
        }
    }

    fn reset(&mut self) {
        for hook in self.reset.before() {
            hook();
        }
        self.inner.reset();
        for hook in self.reset.after() {
            hook();
        }
    }

    fn dispose(&mut self) {
        for hook in self.dispose.before() {
            hook();
        }
        self.inner.dispose();
        for hook in self.dispose.after() {
            hook();
        }
    }
}

/// Extension methods available on every [`Cell`].
pub trait CellExt<T>: Cell<T> + Sized {
    /// Wraps the cell so lifecycle hooks can be attached.
    #[must_use]
    fn hooked(self) -> Hooked<Self, T> {
        Hooked::new(self)
    }
}

impl<T, C: Cell<T>> CellExt<T> for C {}
