// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_virtual_flow` crate.
//!
//! These exercise cell creation and recycling, positioning requests, and hit
//! testing through the public `VirtualFlow` API.

mod common;

use std::cell::Cell as Counter;
use std::rc::Rc;

use common::{
    created, end_of, eighty_by_sixteen, horizontal, start_of, vertical, vertical_reusable,
};
use kurbo::{Rect, Size};
use understory_virtual_flow::{
    Cell, CellExt, FlowHit, FlowNode, Gravity, Hooked, LeafNode, NodeCell, Offset, TargetPosition,
    VirtualFlow,
};

#[test]
fn initial_layout_creates_only_visible_cells() {
    let (flow, log) = eighty_by_sixteen();
    assert_eq!(created(&log), 25);
    assert_eq!(flow.visible_indices(), 0..25);
    assert_eq!(end_of(&flow, 24), Some(400.0));
}

#[test]
fn indexed_factory_sees_item_indices() {
    let (_flow, log) = eighty_by_sixteen();
    assert_eq!(log.borrow().created, (0..25).collect::<Vec<_>>());
}

#[test]
fn set_inside_the_viewport_recreates_one_cell() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.set(10, 16.0);
    flow.layout();
    assert_eq!(created(&log), 26);
    assert_eq!(log.borrow().created[25], 10);
}

#[test]
fn set_outside_the_viewport_creates_nothing() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.set(30, 16.0);
    flow.layout();
    assert_eq!(created(&log), 25);
}

#[test]
fn removal_reindexes_the_cells_after_it() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.remove(12);
    flow.layout();
    // The item that moved up into the last slot needs a cell.
    assert_eq!(created(&log), 26);
    assert_eq!(log.borrow().disposed, 1);
    for (index, cell) in flow.visible_cells() {
        assert_eq!(cell.index, index, "cell {index} reports a stale index");
    }
    assert_eq!(flow.visible_indices(), 0..25);
}

#[test]
fn insertion_creates_one_cell() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.insert(12, 16.0);
    flow.layout();
    assert_eq!(created(&log), 26);
    for (index, cell) in flow.visible_cells() {
        assert_eq!(cell.index, index);
    }
}

#[test]
fn short_scroll_creates_only_the_revealed_cells() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.show_as_first(5);
    flow.layout();
    assert_eq!(created(&log), 30);
    assert_eq!(flow.visible_indices(), 5..30);
}

#[test]
fn far_jump_creates_one_viewport_of_cells() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.show_as_first(55);
    flow.layout();
    assert_eq!(created(&log), 50);
    assert_eq!(flow.first_visible_index(), Some(55));
    assert_eq!(start_of(&flow, 55), Some(0.0));
    // Nothing in between was materialized.
    assert!(log.borrow().created[25..].iter().all(|&i| i >= 55));
}

#[test]
fn reusable_cells_are_rebound_instead_of_created() {
    let (mut flow, log) = vertical_reusable(vec![16.0; 80], Size::new(200.0, 400.0));
    flow.layout();
    flow.show_as_first(55);
    flow.layout();
    assert_eq!(created(&log), 25);
    assert_eq!(log.borrow().rebound.len(), 25);
    assert_eq!(log.borrow().disposed, 0);
    for (index, cell) in flow.visible_cells() {
        assert_eq!(cell.index, index);
    }
}

#[test]
fn refreshing_recreates_only_visible_cells_in_range() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.refresh_cells(10..12);
    flow.layout();
    assert_eq!(created(&log), 27);
    flow.refresh_cells(20..30);
    flow.layout();
    assert_eq!(created(&log), 32);
}

#[test]
fn big_cells_fill_the_viewport() {
    let (mut flow, log) = vertical(
        vec![100.0, 100.0, 100.0, 500.0, 100.0],
        Size::new(200.0, 400.0),
    );
    flow.layout();
    assert_eq!(created(&log), 4);
    assert_eq!(flow.visible_indices(), 0..4);
}

#[test]
fn show_length_offset_is_idempotent_before_layout() {
    let (mut flow, _) = vertical(vec![500.0], Size::new(100.0, 100.0));
    flow.layout();
    flow.show_length_offset(110.0);
    flow.show_length_offset(110.0);
    flow.layout();
    assert_eq!(start_of(&flow, 0), Some(-10.0));
}

#[test]
fn set_length_offset_is_idempotent_before_layout() {
    let (mut flow, _) = vertical(vec![500.0], Size::new(100.0, 100.0));
    flow.flush_estimates();
    flow.set_length_offset(10.0);
    flow.set_length_offset(10.0);
    flow.layout();
    assert_eq!(start_of(&flow, 0), Some(-10.0));
}

#[test]
fn scroll_by_accumulates_and_is_clamped() {
    let (mut flow, _) = eighty_by_sixteen();
    flow.scroll_y(8.0);
    flow.scroll_y(8.0);
    flow.layout();
    assert_eq!(flow.first_visible_index(), Some(1));
    assert_eq!(start_of(&flow, 1), Some(0.0));

    // Scrolling before the start comes back to rest at the start.
    flow.scroll_y(-1000.0);
    flow.layout();
    assert_eq!(start_of(&flow, 0), Some(0.0));
}

#[test]
fn far_set_length_offset_jumps() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.flush_estimates();
    flow.set_length_offset(808.0);
    flow.layout();
    assert_eq!(flow.first_visible_index(), Some(50));
    assert_eq!(start_of(&flow, 50), Some(-8.0));
    assert!(log.borrow().created[25..].iter().all(|&i| i >= 50));
}

#[test]
fn show_scrolls_the_least() {
    let (mut flow, _) = eighty_by_sixteen();
    flow.show(30);
    flow.layout();
    assert_eq!(flow.last_visible_index(), Some(30));
    assert_eq!(end_of(&flow, 30), Some(400.0));

    // Back up: the item lands at the viewport start.
    flow.show(2);
    flow.layout();
    assert_eq!(flow.first_visible_index(), Some(2));
    assert_eq!(start_of(&flow, 2), Some(0.0));
}

#[test]
fn show_as_last_and_at_offset() {
    let (mut flow, _) = eighty_by_sixteen();
    flow.show_as_last(40);
    flow.layout();
    assert_eq!(end_of(&flow, 40), Some(400.0));

    flow.show_at_offset(60, 100.0);
    flow.layout();
    assert_eq!(start_of(&flow, 60), Some(100.0));
    // Item 53 spans -12..4 and still shows.
    assert_eq!(flow.first_visible_index(), Some(53));
}

#[test]
fn show_region_scrolls_both_axes() {
    let (mut flow, _) = vertical(vec![16.0; 80], Size::new(200.0, 400.0));
    flow.layout();
    flow.show_region(40, Rect::new(0.0, 4.0, 50.0, 12.0));
    flow.layout();
    // The region end sits on the viewport end.
    assert_eq!(start_of(&flow, 40).map(|s| s + 12.0), Some(400.0));
}

#[test]
fn show_region_longer_than_the_viewport_ends_at_the_viewport_end() {
    let (mut flow, _) = eighty_by_sixteen();
    // Item 40 lies past the visible cells and its region overhangs it.
    flow.show_region(40, Rect::new(0.0, 0.0, 50.0, 500.0));
    flow.layout();
    // Item 40 starts at -100, so the region ends on the viewport end.
    assert_eq!(flow.first_visible_index(), Some(46));
    assert_eq!(start_of(&flow, 46), Some(-4.0));
    assert_eq!(flow.last_visible_index(), Some(71));
    assert_eq!(
        flow.target_position(),
        TargetPosition::StartOffStart {
            index: 46,
            offset: -4.0,
        }
    );
}

#[test]
fn end_off_end_keeps_the_cells_around_its_anchor() {
    let (mut flow, log) = eighty_by_sixteen();
    flow.show_as_first(30);
    flow.layout();
    assert_eq!(flow.visible_indices(), 30..55);
    assert_eq!(created(&log), 50);

    flow.set_target_position(TargetPosition::EndOffEnd {
        index: 30,
        offset: -200.0,
    });
    flow.layout();
    assert_eq!(end_of(&flow, 30), Some(200.0));
    assert_eq!(flow.visible_indices(), 18..44);
    // Only the twelve cells revealed above item 30 are new.
    assert_eq!(created(&log), 62);
}

#[test]
fn removing_the_anchor_resets_the_region() {
    let (mut flow, _) = eighty_by_sixteen();
    flow.set_target_position(TargetPosition::MinDistanceTo {
        index: 30,
        min: Offset::FromStart(5.0),
        max: Offset::FromStart(10.0),
    });
    flow.remove(30);
    assert_eq!(
        flow.target_position(),
        TargetPosition::MinDistanceTo {
            index: 30,
            min: Offset::FromStart(0.0),
            max: Offset::FromEnd(0.0),
        }
    );
}

#[test]
fn rear_gravity_rests_short_content_at_the_end() {
    let (mut flow, _) = vertical(vec![16.0; 3], Size::new(200.0, 400.0));
    flow.set_gravity(Gravity::Rear);
    flow.layout();
    assert_eq!(start_of(&flow, 0), Some(352.0));
    assert_eq!(end_of(&flow, 2), Some(400.0));

    flow.set_gravity(Gravity::Front);
    flow.layout();
    assert_eq!(start_of(&flow, 0), Some(0.0));
}

#[test]
fn horizontal_flow_stacks_along_x() {
    let (mut flow, log) = horizontal(vec![16.0; 80], Size::new(400.0, 200.0));
    flow.layout();
    assert_eq!(created(&log), 25);
    let bounds = flow.cell_if_visible(3).map(|c| c.node().bounds());
    assert_eq!(bounds, Some(Rect::new(48.0, 0.0, 64.0, 200.0)));

    flow.flush_estimates();
    assert_eq!(flow.total_width_estimate(), 1280.0);
    assert_eq!(flow.estimated_scroll_x(), 0.0);
}

#[test]
fn hit_inside_before_and_after_cells() {
    let (mut flow, _) = eighty_by_sixteen();
    match flow.hit(5.0, 20.0) {
        FlowHit::Cell { index, offset, .. } => {
            assert_eq!(index, 1);
            assert_eq!((offset.x, offset.y), (5.0, 4.0));
        }
        other => panic!("expected a cell hit, got {other:?}"),
    }
    // Below the viewport: the cells in between are placed to resolve it.
    assert_eq!(flow.hit(5.0, 500.0).cell_index(), Some(31));
    let hit = flow.hit(5.0, -10.0);
    assert!(matches!(hit, FlowHit::BeforeCells { .. }));
    assert_eq!(hit.offset().y, -10.0);

    let (mut short, _) = vertical(vec![16.0; 3], Size::new(200.0, 400.0));
    let hit = short.hit(0.0, 100.0);
    assert!(matches!(hit, FlowHit::AfterCells { .. }));
    assert_eq!(hit.offset().y, 52.0);

    let (mut empty, _) = vertical(Vec::new(), Size::new(200.0, 400.0));
    assert!(matches!(empty.hit(1.0, 1.0), FlowHit::AfterCells { .. }));
}

#[test]
fn cells_placed_by_a_hit_are_cropped_by_the_next_layout() {
    let (mut flow, _) = eighty_by_sixteen();
    assert!(!flow.needs_layout());
    assert_eq!(flow.hit(5.0, 500.0).cell_index(), Some(31));
    assert!(flow.needs_layout());

    flow.layout();
    assert_eq!(flow.visible_indices(), 0..25);
    assert!(flow.cell_if_visible(31).is_none(), "item 31 is off screen again");
}

#[test]
fn empty_flow_lays_out_nothing() {
    let (mut flow, log) = vertical(Vec::new(), Size::new(200.0, 400.0));
    flow.layout();
    assert_eq!(created(&log), 0);
    assert_eq!(flow.first_visible_index(), None);
    assert_eq!(flow.visible_indices(), 0..0);
    flow.push(16.0);
    flow.layout();
    assert_eq!(flow.visible_indices(), 0..1);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn forcing_a_cell_out_of_range_panics() {
    let (mut flow, _) = eighty_by_sixteen();
    flow.cell(80);
}

#[test]
fn forced_cells_outside_the_viewport_are_not_visible() {
    let (mut flow, log) = eighty_by_sixteen();
    assert_eq!(flow.cell(60).index, 60);
    assert!(flow.cell_if_visible(60).is_none());
    flow.request_layout();
    flow.layout();
    // The next pass returns it to the pool.
    assert_eq!(log.borrow().disposed, 1);
}

#[test]
fn dispose_releases_every_cell() {
    let (flow, log) = eighty_by_sixteen();
    flow.dispose();
    assert_eq!(log.borrow().disposed, 25);
    assert_eq!(log.borrow().resets, 25);
}

#[test]
fn hooked_cells_observe_disposal() {
    let disposed = Rc::new(Counter::new(0));
    let seen = disposed.clone();
    let mut flow = VirtualFlow::vertical(vec![16.0; 80], move |h: &f64| {
        let seen = seen.clone();
        let cell: Hooked<_, f64> = NodeCell::new(LeafNode::new(Size::new(10.0, *h))).hooked();
        cell.after_dispose(move || seen.set(seen.get() + 1))
    });
    flow.resize(Size::new(200.0, 400.0));
    flow.layout();
    flow.show_as_first(55);
    flow.layout();
    assert_eq!(disposed.get(), 25);
    drop(flow);
    assert_eq!(disposed.get(), 50);
}

#[test]
fn nodes_asking_for_layout_are_remeasured() {
    let (mut flow, _) = eighty_by_sixteen();
    flow.cell(0).node_mut().set_pref_size(Size::new(32.0, 32.0));
    assert!(flow.needs_layout());
    flow.layout();
    assert_eq!(end_of(&flow, 0), Some(32.0));
    assert_eq!(flow.last_visible_index(), Some(23));
    assert!(flow.visible_cells().all(|(_, c)| !c.node().needs_layout()));
}
