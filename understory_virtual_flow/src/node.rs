// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host node abstraction consumed by the flow.

use kurbo::{Point, Rect, Size};

/// A renderable node owned by a [`Cell`](crate::Cell).
///
/// This is the only view of the host scene graph the flow needs: measurement,
/// placement, and a visibility flag. All geometry is in the flow's viewport
/// coordinate space, with `(0, 0)` at the viewport's top-left corner.
pub trait FlowNode {
    /// Minimum width of the node.
    fn min_width(&self) -> f64 {
        0.0
    }

    /// Minimum height of the node.
    fn min_height(&self) -> f64 {
        0.0
    }

    /// Preferred width when laid out at `height`.
    fn pref_width(&self, height: f64) -> f64;

    /// Preferred height when laid out at `width`.
    fn pref_height(&self, width: f64) -> f64;

    /// Sets the node's size.
    fn resize(&mut self, size: Size);

    /// Moves the node's origin.
    fn relocate(&mut self, origin: Point);

    /// Current layout bounds.
    fn bounds(&self) -> Rect;

    /// Whether the node is shown.
    fn is_visible(&self) -> bool;

    /// Shows or hides the node.
    fn set_visible(&mut self, visible: bool);

    /// Whether the node's own content changed size since it was last resized.
    ///
    /// The flow forgets the cached size of such nodes at the start of each layout pass.
    fn needs_layout(&self) -> bool {
        false
    }
}

/// A plain node with a fixed preferred size.
///
/// Useful for tests, benchmarks, and hosts that measure content up front.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafNode {
    pref_size: Size,
    min_size: Size,
    bounds: Rect,
    visible: bool,
    needs_layout: bool,
}

impl LeafNode {
    /// Creates a visible node with the given preferred size and no minimum size.
    #[must_use]
    pub fn new(pref_size: Size) -> Self {
        Self {
            pref_size,
            min_size: Size::ZERO,
            bounds: Rect::ZERO,
            visible: true,
            needs_layout: false,
        }
    }

    /// Sets the minimum size.
    #[must_use]
    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Returns the preferred size.
    #[must_use]
    pub fn pref_size(&self) -> Size {
        self.pref_size
    }

    /// Changes the preferred size, as if the node's content reflowed.
    ///
    /// The node reports [`FlowNode::needs_layout`] until it is resized again.
    pub fn set_pref_size(&mut self, pref_size: Size) {
        if self.pref_size != pref_size {
            self.pref_size = pref_size;
            self.needs_layout = true;
        }
    }
}

impl FlowNode for LeafNode {
    fn min_width(&self) -> f64 {
        self.min_size.width
    }

    fn min_height(&self) -> f64 {
        self.min_size.height
    }

    fn pref_width(&self, _height: f64) -> f64 {
        self.pref_size.width
    }

    fn pref_height(&self, _width: f64) -> f64 {
        self.pref_size.height
    }

    fn resize(&mut self, size: Size) {
        self.bounds = Rect::from_origin_size(self.bounds.origin(), size);
        self.needs_layout = false;
    }

    fn relocate(&mut self, origin: Point) {
        self.bounds = self.bounds.with_origin(origin);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn needs_layout(&self) -> bool {
        self.needs_layout
    }
}
