// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mapping between the flow's breadth/length space and x/y.

use kurbo::{Point, Rect, Size};

use crate::FlowNode;

/// Direction in which cells are stacked.
///
/// The flow's algorithms are written once in terms of *length* (the stacking
/// axis) and *breadth* (the cross axis); an orientation maps those onto x/y.
///
/// | Orientation | Length | Breadth |
/// |-------------|--------|---------|
/// | `Vertical`  | y      | x       |
/// | `Horizontal`| x      | y       |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Cells stacked top to bottom.
    #[default]
    Vertical,
    /// Cells stacked left to right.
    Horizontal,
}

impl Orientation {
    /// Length of `size` along the stacking axis.
    #[must_use]
    pub fn length(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Breadth of `size` across the stacking axis.
    #[must_use]
    pub fn breadth(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Builds a size from breadth and length.
    #[must_use]
    pub fn size(self, breadth: f64, length: f64) -> Size {
        match self {
            Self::Vertical => Size::new(breadth, length),
            Self::Horizontal => Size::new(length, breadth),
        }
    }

    /// Builds a point from breadth and length coordinates.
    #[must_use]
    pub fn point(self, breadth: f64, length: f64) -> Point {
        match self {
            Self::Vertical => Point::new(breadth, length),
            Self::Horizontal => Point::new(length, breadth),
        }
    }

    /// Splits a point into `(breadth, length)` coordinates.
    #[must_use]
    pub fn split(self, point: Point) -> (f64, f64) {
        match self {
            Self::Vertical => (point.x, point.y),
            Self::Horizontal => (point.y, point.x),
        }
    }

    /// Leading edge of `rect` along the stacking axis.
    #[must_use]
    pub fn length_start(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.y0,
            Self::Horizontal => rect.x0,
        }
    }

    /// Trailing edge of `rect` along the stacking axis.
    #[must_use]
    pub fn length_end(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.y1,
            Self::Horizontal => rect.x1,
        }
    }

    /// Leading edge of `rect` across the stacking axis.
    #[must_use]
    pub fn breadth_start(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.x0,
            Self::Horizontal => rect.y0,
        }
    }

    /// Trailing edge of `rect` across the stacking axis.
    #[must_use]
    pub fn breadth_end(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.x1,
            Self::Horizontal => rect.y1,
        }
    }

    pub(crate) fn min_breadth<N: FlowNode + ?Sized>(self, node: &N) -> f64 {
        match self {
            Self::Vertical => node.min_width(),
            Self::Horizontal => node.min_height(),
        }
    }

    pub(crate) fn pref_length<N: FlowNode + ?Sized>(self, node: &N, breadth: f64) -> f64 {
        match self {
            Self::Vertical => node.pref_height(breadth),
            Self::Horizontal => node.pref_width(breadth),
        }
    }

    pub(crate) fn resize<N: FlowNode + ?Sized>(self, node: &mut N, breadth: f64, length: f64) {
        node.resize(self.size(breadth, length));
    }

    pub(crate) fn relocate<N: FlowNode + ?Sized>(self, node: &mut N, breadth: f64, length: f64) {
        node.relocate(self.point(breadth, length));
    }
}
