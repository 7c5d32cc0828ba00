// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures: cells that record their lifecycle.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Size;
use understory_virtual_flow::{Cell, FlowNode, LeafNode, VirtualFlow};

/// Lifecycle events seen by every cell of one flow.
#[derive(Debug, Default)]
pub struct Log {
    /// Indices passed to the factory, in creation order.
    pub created: Vec<usize>,
    /// Items rebound through `update_item`.
    pub rebound: Vec<f64>,
    pub resets: usize,
    pub disposed: usize,
}

pub type SharedLog = Rc<RefCell<Log>>;

/// A cell whose item is its preferred length along the flow.
#[derive(Debug)]
pub struct RecordingCell {
    node: LeafNode,
    pub item: f64,
    pub index: usize,
    reusable: bool,
    log: SharedLog,
}

impl Cell<f64> for RecordingCell {
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

    fn update_item(&mut self, item: &f64) {
        self.item = *item;
        self.node.set_pref_size(Size::new(*item, *item));
        self.log.borrow_mut().rebound.push(*item);
    }

    fn update_index(&mut self, index: usize) {
        self.index = index;
    }

    fn reset(&mut self) {
        self.log.borrow_mut().resets += 1;
    }

    fn dispose(&mut self) {
        self.log.borrow_mut().disposed += 1;
    }
}

pub type Flow = VirtualFlow<f64, RecordingCell>;

fn build(items: Vec<f64>, viewport: Size, horizontal: bool, reusable: bool) -> (Flow, SharedLog) {
    let log = SharedLog::default();
    let factory_log = log.clone();
    let factory = move |index: usize, item: &f64| {
        factory_log.borrow_mut().created.push(index);
        RecordingCell {
            // Square nodes: the item is the preferred length on either axis.
            node: LeafNode::new(Size::new(*item, *item)),
            item: *item,
            index,
            reusable,
            log: factory_log.clone(),
        }
    };
    let mut flow = if horizontal {
        VirtualFlow::horizontal_indexed(items, factory)
    } else {
        VirtualFlow::vertical_indexed(items, factory)
    };
    flow.resize(viewport);
    (flow, log)
}

/// A vertical flow of non-reusable cells.
pub fn vertical(items: Vec<f64>, viewport: Size) -> (Flow, SharedLog) {
    build(items, viewport, false, false)
}

/// A vertical flow of reusable cells.
pub fn vertical_reusable(items: Vec<f64>, viewport: Size) -> (Flow, SharedLog) {
    build(items, viewport, false, true)
}

/// A horizontal flow of non-reusable cells.
pub fn horizontal(items: Vec<f64>, viewport: Size) -> (Flow, SharedLog) {
    build(items, viewport, true, false)
}

/// The reference setup: 80 items of length 16 in a 200 x 400 viewport.
pub fn eighty_by_sixteen() -> (Flow, SharedLog) {
    let (mut flow, log) = vertical(vec![16.0; 80], Size::new(200.0, 400.0));
    flow.layout();
    (flow, log)
}

pub fn created(log: &SharedLog) -> usize {
    log.borrow().created.len()
}

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Start edge of a visible cell along the flow.
pub fn start_of(flow: &Flow, index: usize) -> Option<f64> {
    let orientation = flow.orientation();
    flow.cell_if_visible(index)
        .map(|cell| orientation.length_start(cell.node().bounds()))
}

/// End edge of a visible cell along the flow.
pub fn end_of(flow: &Flow, index: usize) -> Option<f64> {
    let orientation = flow.orientation();
    flow.cell_if_visible(index)
        .map(|cell| orientation.length_end(cell.node().bounds()))
}
