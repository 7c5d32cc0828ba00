// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_flow --heading-base-level=0

//! Understory Virtual Flow: a virtualized list layout with lazy cells.
//!
//! This crate lays out an arbitrarily long list of items in a viewport while
//! only materializing the items that are visible. It differs from a plain
//! extent model in that item sizes are *not* known up front: cells are
//! created on demand, measured through the host's layout protocol, and the
//! content size and scroll position are estimated from what has been
//! measured so far.
//!
//! The core concepts are:
//!
//! - [`FlowNode`]: the host's node abstraction. A node reports minimum and
//!   preferred sizes and accepts a size, a position and a visibility flag.
//! - [`Cell`]: displays one item through one node. Cells may be reusable, in
//!   which case a [`CellPool`] rebinds them to other items instead of
//!   disposing them. [`Hooked`] decorates a cell with lifecycle closures.
//! - [`VirtualFlow`]: owns the items and their cells. It turns scroll and
//!   "show this item" requests into a [`TargetPosition`], places cells around
//!   it on [`VirtualFlow::layout`], and returns the cells that left the
//!   viewport to the pool.
//! - Estimates: total content size and scroll offset are extrapolated from
//!   the average measured length. They are published on a host-driven clock
//!   ([`VirtualFlow::tick`]) after the measurement churn settles, see
//!   [`SettleWindows`], and feed [`ScrollbarState`] for scrollbar widgets.
//!
//! Items are laid out along the length axis of an [`Orientation`]; every
//! cell gets the same breadth, the largest minimum breadth measured so far or
//! the viewport breadth, whichever is larger.
//!
//! This crate does **not** know about widgets, rendering or events. Host
//! frameworks are responsible for:
//!
//! - Implementing [`FlowNode`] for their nodes (or using [`LeafNode`]).
//! - Attaching the nodes of [`VirtualFlow::visible_cells`] to their scene.
//! - Calling [`VirtualFlow::layout`] and [`VirtualFlow::tick`] from their
//!   frame loop, and scheduling a frame for [`VirtualFlow::next_deadline`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_virtual_flow::{LeafNode, NodeCell, VirtualFlow};
//!
//! // 1000 items, each 20 logical pixels tall.
//! let mut flow = VirtualFlow::vertical(vec![20.0; 1000], |height: &f64| {
//!     NodeCell::new(LeafNode::new(Size::new(200.0, *height)))
//! });
//! flow.resize(Size::new(200.0, 100.0));
//! flow.layout();
//!
//! // Only the five items in the viewport have cells.
//! assert_eq!(flow.visible_indices(), 0..5);
//!
//! flow.show_as_first(500);
//! flow.layout();
//! assert_eq!(flow.first_visible_index(), Some(500));
//!
//! // Publish the estimates without waiting for the settle window.
//! flow.flush_estimates();
//! assert_eq!(flow.total_height_estimate(), 20_000.0);
//! assert_eq!(flow.estimated_scroll_y(), 10_000.0);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` spans and events for layout passes, cell
//!   creation, crops, jumps and estimate publication.

mod cell;
mod cell_list;
mod change;
mod flow;
mod hit;
mod memo;
mod navigator;
mod node;
mod orientation;
mod pool;
mod positioner;
mod prefix;
mod scrollbar;
mod settle;
mod size;
mod target;

pub use cell::{Cell, CellExt, Hooked, NodeCell};
pub use change::ListChange;
pub use flow::VirtualFlow;
pub use hit::FlowHit;
pub use navigator::Gravity;
pub use node::{FlowNode, LeafNode};
pub use orientation::Orientation;
pub use pool::CellPool;
pub use scrollbar::{
    ScrollbarFit, ScrollbarPolicies, ScrollbarPolicy, ScrollbarState, fit_scrollbars,
};
pub use settle::SettleWindows;
pub use target::{Offset, TargetPosition};
