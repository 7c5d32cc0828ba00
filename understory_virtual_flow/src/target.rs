// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target positions: where the viewport should be, expressed relative to an item.

/// A distance measured from one edge of a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    /// Distance from the cell's start edge.
    FromStart(f64),
    /// Distance from the cell's end edge.
    FromEnd(f64),
}

impl Offset {
    /// The raw distance.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::FromStart(v) | Self::FromEnd(v) => v,
        }
    }

    /// Returns `true` for [`Offset::FromStart`].
    #[must_use]
    pub fn is_from_start(self) -> bool {
        matches!(self, Self::FromStart(_))
    }

    /// The same edge, moved by `delta`.
    #[must_use]
    pub fn shifted(self, delta: f64) -> Self {
        match self {
            Self::FromStart(v) => Self::FromStart(v + delta),
            Self::FromEnd(v) => Self::FromEnd(v + delta),
        }
    }

    /// Position inside a cell of length `len`, measured from its start.
    #[must_use]
    pub fn resolve(self, len: f64) -> f64 {
        match self {
            Self::FromStart(v) => v,
            Self::FromEnd(v) => len + v,
        }
    }
}

/// Where the viewport should be on the next layout pass.
///
/// Positions are anchored to an item index rather than to pixels, since
/// lengths of unmeasured items are unknown. After every layout the flow
/// normalizes its current position to [`TargetPosition::StartOffStart`] on the
/// first visible cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetPosition {
    /// The start of item `index` sits `offset` from the viewport start.
    StartOffStart {
        /// Anchor item.
        index: usize,
        /// Distance of the item's start from the viewport start.
        offset: f64,
    },
    /// The end of item `index` sits `offset` from the viewport end.
    ///
    /// Negative offsets move the item up, into the viewport.
    EndOffEnd {
        /// Anchor item.
        index: usize,
        /// Distance of the item's end from the viewport end.
        offset: f64,
    },
    /// Scroll the least amount that brings the region `[min, max]` of item
    /// `index` into view.
    MinDistanceTo {
        /// Anchor item.
        index: usize,
        /// Region start.
        min: Offset,
        /// Region end.
        max: Offset,
    },
}

impl Default for TargetPosition {
    fn default() -> Self {
        Self::BEGINNING
    }
}

impl TargetPosition {
    /// The first item at the viewport start.
    pub const BEGINNING: Self = Self::StartOffStart {
        index: 0,
        offset: 0.0,
    };

    /// The anchor item.
    #[must_use]
    pub fn index(&self) -> usize {
        match *self {
            Self::StartOffStart { index, .. }
            | Self::EndOffEnd { index, .. }
            | Self::MinDistanceTo { index, .. } => index,
        }
    }

    /// Remaps the anchor after `removed` items at `from` were replaced by `added`.
    ///
    /// An anchor inside the removed run moves to `from` with zero offsets.
    #[must_use]
    pub fn transform_by_change(self, from: usize, removed: usize, added: usize) -> Self {
        let index = self.index();
        if index >= from + removed {
            self.with_index(index - removed + added)
        } else if index >= from {
            match self {
                Self::StartOffStart { .. } => Self::StartOffStart {
                    index: from,
                    offset: 0.0,
                },
                Self::EndOffEnd { .. } => Self::EndOffEnd {
                    index: from,
                    offset: 0.0,
                },
                Self::MinDistanceTo { .. } => Self::MinDistanceTo {
                    index: from,
                    min: Offset::FromStart(0.0),
                    max: Offset::FromEnd(0.0),
                },
            }
        } else {
            self
        }
    }

    /// The position after scrolling the content by `delta`.
    ///
    /// Positive deltas reveal later content.
    #[must_use]
    pub fn scroll_by(self, delta: f64) -> Self {
        match self {
            Self::StartOffStart { index, offset } => Self::StartOffStart {
                index,
                offset: offset - delta,
            },
            Self::EndOffEnd { index, offset } => Self::EndOffEnd {
                index,
                offset: offset - delta,
            },
            Self::MinDistanceTo { index, min, max } => Self::MinDistanceTo {
                index,
                min: min.shifted(delta),
                max: max.shifted(delta),
            },
        }
    }

    /// Clamps the anchor into `0..len`.
    ///
    /// `len` must be non-zero.
    #[must_use]
    pub fn clamp(self, len: usize) -> Self {
        debug_assert!(len > 0, "cannot clamp a position into an empty flow");
        let last = len.saturating_sub(1);
        if self.index() > last {
            self.with_index(last)
        } else {
            self
        }
    }

    fn with_index(self, index: usize) -> Self {
        match self {
            Self::StartOffStart { offset, .. } => Self::StartOffStart { index, offset },
            Self::EndOffEnd { offset, .. } => Self::EndOffEnd { index, offset },
            Self::MinDistanceTo { min, max, .. } => Self::MinDistanceTo { index, min, max },
        }
    }
}
