// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollbar models derived from the flow's estimates.
//!
//! The flow does not draw scrollbars. It exposes the numbers a host widget
//! needs: range, thumb size and position, and increments.

use kurbo::Size;

/// Pixels scrolled by one unit increment of a scrollbar.
const UNIT_SCROLL: f64 = 16.0;

/// State of one scrollbar.
///
/// The bar's range is `[min, max]` with `max` the content length, and
/// `visible_amount` the viewport length. `value` is a *bar position* in that
/// range, not a content offset: the bar reaches `max` exactly when the
/// content is scrolled to its end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollbarState {
    /// Range start, always `0`.
    pub min: f64,
    /// Range end: the estimated content length.
    pub max: f64,
    /// Thumb position in `[min, max]`.
    pub value: f64,
    /// Thumb size: the viewport length.
    pub visible_amount: f64,
    /// Bar distance of one small step, worth 16 content pixels.
    pub unit_increment: f64,
    /// Bar distance of one page.
    pub block_increment: f64,
}

impl ScrollbarState {
    /// Builds the state for `content` scrolled by `offset` in a `viewport`.
    #[must_use]
    pub fn new(content: f64, viewport: f64, offset: f64) -> Self {
        let unit_increment = if content > viewport {
            UNIT_SCROLL / (content - viewport) * content
        } else {
            0.0
        };
        Self {
            min: 0.0,
            max: content,
            value: offset_to_scrollbar_position(offset, viewport, content),
            visible_amount: viewport,
            unit_increment,
            block_increment: viewport,
        }
    }

    /// Returns `true` if the content is longer than the viewport.
    #[must_use]
    pub fn is_needed(&self) -> bool {
        self.max > self.visible_amount
    }

    /// Converts a bar position back into a content offset.
    #[must_use]
    pub fn offset_for(&self, value: f64) -> f64 {
        scrollbar_position_to_offset(value, self.visible_amount, self.max)
    }
}

fn offset_to_scrollbar_position(offset: f64, viewport: f64, content: f64) -> f64 {
    if content > viewport {
        offset / (content - viewport) * content
    } else {
        0.0
    }
}

fn scrollbar_position_to_offset(position: f64, viewport: f64, content: f64) -> f64 {
    if content > viewport {
        position / content * (content - viewport)
    } else {
        0.0
    }
}

/// When a scrollbar is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollbarPolicy {
    /// Only when the content overflows.
    #[default]
    AsNeeded,
    /// Always.
    Always,
    /// Never.
    Never,
}

/// Scrollbar policies for both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollbarPolicies {
    /// Policy of the horizontal bar.
    pub horizontal: ScrollbarPolicy,
    /// Policy of the vertical bar.
    pub vertical: ScrollbarPolicy,
}

/// Outcome of [`fit_scrollbars`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollbarFit {
    /// Whether the horizontal bar is shown.
    pub horizontal: bool,
    /// Whether the vertical bar is shown.
    pub vertical: bool,
    /// Space left for the flow's viewport.
    pub viewport: Size,
}

/// Decides which scrollbars to show around a flow and what viewport remains.
///
/// A bar needed on its own may make the other axis overflow too, since it
/// takes `bar_thickness` away from the viewport.
///
/// ```rust
/// use kurbo::Size;
/// use understory_virtual_flow::{ScrollbarPolicies, fit_scrollbars};
///
/// // Tall content that is exactly as wide as the layout.
/// let fit = fit_scrollbars(
///     Size::new(200.0, 100.0),
///     Size::new(200.0, 1000.0),
///     10.0,
///     ScrollbarPolicies::default(),
/// );
/// assert!(fit.vertical);
/// // The vertical bar steals width, so the content now overflows horizontally.
/// assert!(fit.horizontal);
/// assert_eq!(fit.viewport, Size::new(190.0, 90.0));
/// ```
#[must_use]
pub fn fit_scrollbars(
    layout: Size,
    content: Size,
    bar_thickness: f64,
    policies: ScrollbarPolicies,
) -> ScrollbarFit {
    let overflows_x = content.width > layout.width;
    let overflows_y = content.height > layout.height;
    let needs_h0 = decide(policies.horizontal, overflows_x);
    let needs_v0 = decide(policies.vertical, overflows_y);
    let horizontal = decide(
        policies.horizontal,
        overflows_x || (needs_v0 && content.width + bar_thickness > layout.width),
    );
    let vertical = decide(
        policies.vertical,
        overflows_y || (needs_h0 && content.height + bar_thickness > layout.height),
    );
    let viewport = Size::new(
        (layout.width - if vertical { bar_thickness } else { 0.0 }).max(0.0),
        (layout.height - if horizontal { bar_thickness } else { 0.0 }).max(0.0),
    );
    ScrollbarFit {
        horizontal,
        vertical,
        viewport,
    }
}

fn decide(policy: ScrollbarPolicy, overflows: bool) -> bool {
    match policy {
        ScrollbarPolicy::AsNeeded => overflows,
        ScrollbarPolicy::Always => true,
        ScrollbarPolicy::Never => false,
    }
}
