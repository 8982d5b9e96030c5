//! Visible time window.
//!
//! The first event after a reset anchors the window. When a batch ends on the
//! anchor itself the view shows the trailing `trailing_bars` bar intervals;
//! afterwards it grows from the anchor to the latest event.

use chrono::{DateTime, TimeDelta, Utc};

/// Bar interval, in seconds, used when none is configured.
pub const DEFAULT_BAR_INTERVAL_SECS: i64 = 60;
/// Number of bar intervals shown behind a fresh anchor.
pub const DEFAULT_TRAILING_BARS: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTracker {
    anchor: Option<DateTime<Utc>>,
    bar_interval: TimeDelta,
    trailing_bars: i32,
}

impl Default for WindowTracker {
    fn default() -> Self {
        Self::new(TimeDelta::seconds(DEFAULT_BAR_INTERVAL_SECS), DEFAULT_TRAILING_BARS)
    }
}

impl WindowTracker {
    pub fn new(bar_interval: TimeDelta, trailing_bars: i32) -> Self {
        Self {
            anchor: None,
            bar_interval,
            trailing_bars,
        }
    }

    pub fn anchor(&self) -> Option<DateTime<Utc>> {
        self.anchor
    }

    pub fn bar_interval(&self) -> TimeDelta {
        self.bar_interval
    }

    /// Forget the anchor; the next event sets a new one.
    pub fn reset(&mut self) {
        self.anchor = None;
    }

    /// Feed one processed event. Returns the new visible span when
    /// `last_in_batch` is set.
    pub fn on_event(
        &mut self,
        t: DateTime<Utc>,
        last_in_batch: bool,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let anchor = *self.anchor.get_or_insert(t);
        if !last_in_batch {
            return None;
        }
        if t == anchor {
            let back = self.bar_interval * self.trailing_bars;
            let start = anchor.checked_sub_signed(back).unwrap_or(anchor);
            Some((start, anchor))
        } else {
            Some((anchor, t))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn only_last_event_moves_window() {
        let mut w = WindowTracker::default();
        assert_eq!(w.on_event(at(1_000), false), None);
        assert_eq!(w.anchor(), Some(at(1_000)));
        assert_eq!(w.on_event(at(1_060), true), Some((at(1_000), at(1_060))));
    }

    #[test]
    fn reset_re_anchors() {
        let mut w = WindowTracker::new(TimeDelta::seconds(10), 3);
        w.on_event(at(100), true);
        w.reset();
        assert_eq!(w.on_event(at(500), true), Some((at(470), at(500))));
    }
}
