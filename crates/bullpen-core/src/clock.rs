//! The studio's virtual clock.
//!
//! The clock holds a single value: the current simulated time. It advances
//! only when the run loop pops an event, jumping straight to that event's
//! timestamp; there is no ticking in between. It never moves backward, so
//! every observation of `now` across a run is non-decreasing.

use bullpen_types::SimHours;

/// Monotonic simulated-time clock, advanced by the run loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkClock {
    now: SimHours,
}

impl WorkClock {
    /// A clock at the moment the studio opens.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: SimHours::ZERO,
        }
    }

    /// The current simulated time.
    #[must_use]
    pub const fn now(self) -> SimHours {
        self.now
    }

    /// Advance to `to`, returning the simulated hours that elapsed.
    ///
    /// The clock never moves backward: a `to` at or before the current
    /// time leaves the clock untouched and reports zero elapsed hours.
    pub fn advance(&mut self, to: SimHours) -> f64 {
        let elapsed = to.since(self.now);
        if to > self.now {
            self.now = to;
        }
        elapsed
    }
}
