// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test results.

use kurbo::Point;

/// Result of [`VirtualFlow::hit`](crate::VirtualFlow::hit).
///
/// Offsets are relative to the cell that was hit, or to the edge of the
/// content that the point lies beyond.
#[derive(Debug)]
pub enum FlowHit<'a, C> {
    /// The point lies inside the cell for `index`.
    Cell {
        /// Index of the item.
        index: usize,
        /// The cell displaying it.
        cell: &'a C,
        /// The point relative to the cell's origin.
        offset: Point,
    },
    /// The point lies before the first item.
    BeforeCells {
        /// The point relative to the content start.
        offset: Point,
    },
    /// The point lies after the last item, or the flow is empty.
    AfterCells {
        /// The point relative to the content end.
        offset: Point,
    },
}

impl<'a, C> FlowHit<'a, C> {
    /// Returns `true` if a cell was hit.
    #[must_use]
    pub fn is_cell_hit(&self) -> bool {
        matches!(self, Self::Cell { .. })
    }

    /// Index of the hit cell, if any.
    #[must_use]
    pub fn cell_index(&self) -> Option<usize> {
        match self {
            Self::Cell { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The hit cell, if any.
    #[must_use]
    pub fn cell(&self) -> Option<&'a C> {
        match self {
            Self::Cell { cell, .. } => Some(*cell),
            _ => None,
        }
    }

    /// The point relative to whatever was hit.
    #[must_use]
    pub fn offset(&self) -> Point {
        match self {
            Self::Cell { offset, .. }
            | Self::BeforeCells { offset }
            | Self::AfterCells { offset } => *offset,
        }
    }
}
