// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle timers: last-write-wins debouncing on a host-driven clock.
//!
//! The flow never reads a clock itself. The host passes monotonic timestamps
//! (any epoch) to [`VirtualFlow::tick`](crate::VirtualFlow::tick), and values
//! pushed into a [`Succession`] are released once no newer value arrived for
//! the whole window.

use core::time::Duration;

/// Debounce windows for publishing size estimates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleWindows {
    /// Quiet period before measurement churn is published.
    ///
    /// Cells created and destroyed while scrolling change the measured set
    /// constantly; this window lets it settle first.
    pub churn: Duration,
    /// Extra hold-back before a *smaller* total length is published.
    ///
    /// Shrinking totals are most often transient noise from recycling; growth
    /// is published as soon as the churn window closes.
    pub shrink: Duration,
}

impl SettleWindows {
    /// No debouncing: every estimate is published on the next tick.
    pub const IMMEDIATE: Self = Self {
        churn: Duration::ZERO,
        shrink: Duration::ZERO,
    };
}

impl Default for SettleWindows {
    fn default() -> Self {
        Self {
            churn: Duration::from_millis(15),
            shrink: Duration::from_millis(1000),
        }
    }
}

/// A pending value that is released after a quiet window.
///
/// Pushing a new value replaces the pending one and restarts the window.
#[derive(Clone, Debug)]
pub(crate) struct Succession<V> {
    window: Duration,
    pending: Option<(V, Duration)>,
}

impl<V> Succession<V> {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub(crate) fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    pub(crate) fn push(&mut self, value: V, now: Duration) {
        self.pending = Some((value, now.saturating_add(self.window)));
    }

    /// Releases the pending value if its window has elapsed at `now`.
    pub(crate) fn poll(&mut self, now: Duration) -> Option<V> {
        if self.deadline().is_some_and(|deadline| deadline <= now) {
            self.flush()
        } else {
            None
        }
    }

    /// Releases the pending value immediately.
    pub(crate) fn flush(&mut self) -> Option<V> {
        self.pending.take().map(|(value, _)| value)
    }

    pub(crate) fn cancel(&mut self) {
        self.pending = None;
    }

    pub(crate) fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}
