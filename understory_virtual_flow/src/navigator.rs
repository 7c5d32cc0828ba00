// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a target position into placed cells.

use crate::positioner::CellPositioner;
use crate::{Cell, ListChange, Offset, TargetPosition};

/// The edge cells settle against when there are too few to fill the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gravity {
    /// Content hugs the viewport start.
    #[default]
    Front,
    /// Content hugs the viewport end, like a chat log.
    Rear,
}

/// Tracks the current and target positions and lays cells out to reach the target.
#[derive(Clone, Debug, Default)]
pub(crate) struct Navigator {
    target: TargetPosition,
    current: TargetPosition,
    gravity: Gravity,
}

impl Navigator {
    pub(crate) fn target(&self) -> TargetPosition {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: TargetPosition) {
        self.target = target;
    }

    pub(crate) fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub(crate) fn set_gravity(&mut self, gravity: Gravity) {
        self.gravity = gravity;
    }

    /// Targets the current position scrolled by `delta`.
    ///
    /// Calling this repeatedly before a layout pass does not accumulate.
    pub(crate) fn scroll_current_position_by(&mut self, delta: f64) {
        self.target = self.current.scroll_by(delta);
    }

    pub(crate) fn items_changed(&mut self, change: ListChange) {
        self.current = self
            .current
            .transform_by_change(change.from, change.removed, change.added);
        self.target = self
            .target
            .transform_by_change(change.from, change.removed, change.added);
    }

    /// Places cells so the target position holds, then makes it current.
    pub(crate) fn layout<T, C: Cell<T>>(&mut self, pos: &mut CellPositioner<'_, T, C>) {
        pos.forget_stale_sizes();
        let len = pos.len();
        if len == 0 {
            pos.crop_to(0, 0);
            self.current = TargetPosition::BEGINNING;
            self.target = self.current;
            return;
        }
        match self.target.clamp(len) {
            TargetPosition::StartOffStart { index, offset } => {
                place_start_at_may_crop(pos, index, offset);
                self.fill_viewport_from(pos, index);
            }
            TargetPosition::EndOffEnd { index, offset } => {
                crop_to_neighborhood(pos, index, offset);
                pos.place_end_from_end(index, offset);
                self.fill_viewport_from(pos, index);
            }
            TargetPosition::MinDistanceTo { index, min, max } => {
                show_region(pos, index, min, max);
                self.fill_viewport_from(pos, index);
            }
        }
        self.current = match pos.first_visible_index() {
            Some(first) => TargetPosition::StartOffStart {
                index: first,
                offset: pos.start(first),
            },
            None => TargetPosition::BEGINNING,
        };
        self.target = self.current;
    }

    /// Fills the viewport around an already placed cell.
    ///
    /// Cells are filled toward the ground edge first and pulled onto it if
    /// they fall short, then toward the sky. A gap left at the sky is closed
    /// by pulling in cells from beyond the ground. Cells entirely outside the
    /// viewport are cropped.
    fn fill_viewport_from<T, C: Cell<T>>(&self, pos: &mut CellPositioner<'_, T, C>, index: usize) {
        let gravity = self.gravity;
        let mut ground = fill_towards_ground(gravity, pos, index);

        let gap_before = distance_from_ground(gravity, pos, ground);
        if gap_before > 0.0 {
            shift_towards_ground(gravity, pos, ground, index, gap_before);
        }

        let sky = fill_towards_sky(gravity, pos, index);
        let gap_after = distance_from_sky(gravity, pos, sky);
        if gap_after > 0.0 {
            ground = fill_towards_ground0(gravity, pos, ground, gap_after);
            let extra_before = -distance_from_ground(gravity, pos, ground);
            let shift = gap_after.min(extra_before);
            shift_towards_ground(gravity, pos, ground, sky, -shift);
        }

        let mut first = ground.min(sky);
        let mut last = ground.max(sky);
        while first < last && pos.end(first) <= 0.0 {
            first += 1;
        }
        let viewport = pos.viewport_length();
        while last > first && pos.start(last) >= viewport {
            last -= 1;
        }
        pos.crop_to(first, last + 1);
    }
}

fn show_region<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    min: Offset,
    max: Offset,
) {
    if pos.is_visible(index) {
        place_to_viewport(pos, index, min, max);
    } else if let Some(prev) = pos.last_visible_before(index) {
        // Keep the previous cell in place and see whether filling reveals the target.
        let viewport = pos.viewport_length();
        fill_forward_from(pos, prev, viewport);
        if pos.is_visible(index) {
            place_to_viewport(pos, index, min, max);
        } else {
            crop_to_neighborhood(pos, index, -max.value());
            match max {
                Offset::FromStart(v) => pos.place_start_from_end(index, -v),
                Offset::FromEnd(v) => pos.place_end_from_end(index, -v),
            };
        }
    } else if let Some(next) = pos.first_visible_from(index + 1) {
        fill_backward_from(pos, next, 0.0);
        if pos.is_visible(index) {
            place_to_viewport(pos, index, min, max);
        } else {
            place_min_at_start(pos, index, min);
        }
    } else {
        place_min_at_start(pos, index, min);
    }
}

fn place_min_at_start<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    min: Offset,
) {
    match min {
        Offset::FromStart(v) => place_start_at_may_crop(pos, index, -v),
        Offset::FromEnd(v) => {
            crop_to_neighborhood(pos, index, -v);
            pos.place_end_from_start(index, -v);
        }
    }
}

fn place_start_at_may_crop<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    start: f64,
) {
    crop_to_neighborhood(pos, index, start);
    pos.place_start_at(index, start);
}

fn place_to_viewport<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    from: Offset,
    to: Offset,
) {
    let length = pos.length_of(index);
    let delta = pos.shortest_delta_to_viewport(index, from.resolve(length), to.resolve(length));
    let start = pos.start(index);
    pos.place_start_at(index, start + delta);
}

/// Releases cells too far from `index` to matter for the coming layout.
fn crop_to_neighborhood<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    additional_offset: f64,
) {
    let viewport = pos.viewport_length();
    let space_before = (viewport + additional_offset).max(0.0);
    let space_after = (viewport - additional_offset).max(0.0);
    let average = pos.average_length_estimate();
    let before = items_in(space_before, average);
    let after = items_in(space_after, average);
    pos.crop_to(
        index.saturating_sub(before),
        index.saturating_add(1).saturating_add(after),
    );
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "a count of average-sized items fits in usize; the cast saturates"
)]
fn items_in(space: f64, average: Option<f64>) -> usize {
    average.map_or(5, |average| (space / average) as usize)
}

/// Re-places `index` where it is, then fills forward up to `up_to`.
fn fill_forward_from<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    up_to: f64,
) -> usize {
    let start = pos.start(index);
    pos.place_start_at(index, start);
    fill_forward_from0(pos, index, up_to)
}

/// Re-places `index` where it is, then fills backward down to `up_to`.
fn fill_backward_from<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    up_to: f64,
) -> usize {
    let start = pos.start(index);
    pos.place_start_at(index, start);
    fill_backward_from0(pos, index, up_to)
}

/// Places cells after the visible cell `index` until one ends at or past `up_to`.
///
/// Returns the last placed index.
pub(crate) fn fill_forward_from0<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    up_to: f64,
) -> usize {
    let mut end = pos.end(index);
    let mut i = index;
    while end < up_to && i + 1 < pos.len() {
        i += 1;
        pos.place_start_at(i, end);
        end = pos.end(i);
    }
    i
}

/// Places cells before the visible cell `index` until one starts at or before `up_to`.
///
/// Returns the first placed index.
pub(crate) fn fill_backward_from0<T, C: Cell<T>>(
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    up_to: f64,
) -> usize {
    let mut start = pos.start(index);
    let mut i = index;
    while start > up_to && i > 0 {
        i -= 1;
        pos.place_end_from_start(i, start);
        start = pos.start(i);
    }
    i
}

fn fill_towards_ground<T, C: Cell<T>>(
    gravity: Gravity,
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
) -> usize {
    match gravity {
        Gravity::Front => fill_backward_from(pos, index, 0.0),
        Gravity::Rear => {
            let viewport = pos.viewport_length();
            fill_forward_from(pos, index, viewport)
        }
    }
}

fn fill_towards_ground0<T, C: Cell<T>>(
    gravity: Gravity,
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
    overshoot: f64,
) -> usize {
    match gravity {
        Gravity::Front => fill_backward_from0(pos, index, -overshoot),
        Gravity::Rear => {
            let viewport = pos.viewport_length();
            fill_forward_from0(pos, index, viewport + overshoot)
        }
    }
}

fn fill_towards_sky<T, C: Cell<T>>(
    gravity: Gravity,
    pos: &mut CellPositioner<'_, T, C>,
    index: usize,
) -> usize {
    let viewport = pos.viewport_length();
    match gravity {
        Gravity::Front => fill_forward_from(pos, index, viewport),
        Gravity::Rear => fill_backward_from(pos, index, 0.0),
    }
}

fn distance_from_ground<T, C: Cell<T>>(
    gravity: Gravity,
    pos: &CellPositioner<'_, T, C>,
    index: usize,
) -> f64 {
    match gravity {
        Gravity::Front => pos.start(index),
        Gravity::Rear => pos.viewport_length() - pos.end(index),
    }
}

fn distance_from_sky<T, C: Cell<T>>(
    gravity: Gravity,
    pos: &CellPositioner<'_, T, C>,
    index: usize,
) -> f64 {
    match gravity {
        Gravity::Front => pos.viewport_length() - pos.end(index),
        Gravity::Rear => pos.start(index),
    }
}

/// Moves the cells between `a` and `b` (inclusive, either order) `amount` toward the ground.
fn shift_towards_ground<T, C: Cell<T>>(
    gravity: Gravity,
    pos: &mut CellPositioner<'_, T, C>,
    a: usize,
    b: usize,
    amount: f64,
) {
    let delta = match gravity {
        Gravity::Front => -amount,
        Gravity::Rear => amount,
    };
    for index in a.min(b)..=a.max(b) {
        pos.shift_cell_by(index, delta);
    }
}
