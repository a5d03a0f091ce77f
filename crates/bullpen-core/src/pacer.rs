//! Wall-clock pacing for the simulated day.
//!
//! The studio can run in "watchable" mode, where each simulated hour is
//! stretched over a configurable number of real seconds. The [`Pacer`]
//! owns that mapping: it remembers the real instant the run started and,
//! given an event's simulated time, computes the wall-clock deadline
//! `run_start + time * seconds_per_hour` and suspends until it passes.
//!
//! Deadlines already in the past return immediately, so an expensive
//! external call never causes later events to be paced *extra*; wall-clock
//! slippage is absorbed, and simulated order is untouched either way.
//!
//! A ratio of zero disables pacing entirely. Deterministic tests run that
//! way, and so does any batch use where nobody is watching.

use std::time::Duration;

use bullpen_types::SimHours;
use tokio::time::Instant;

/// Maps simulated hours to wall-clock deadlines and waits them out.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    run_start: Instant,
    seconds_per_hour: f64,
}

impl Pacer {
    /// Create a pacer anchored to the current instant.
    ///
    /// `seconds_per_hour` is the stretch factor; zero (or anything
    /// non-positive) turns pacing off.
    #[must_use]
    pub fn new(seconds_per_hour: f64) -> Self {
        Self {
            run_start: Instant::now(),
            seconds_per_hour,
        }
    }

    /// Suspend until the wall-clock deadline for the given simulated time.
    ///
    /// Returns immediately when pacing is off, when the deadline has
    /// already passed, or when the deadline is not representable (a
    /// pathological ratio that overflows the clock).
    pub async fn pace_until(&self, time: SimHours) {
        if self.seconds_per_hour <= 0.0 {
            return;
        }
        let Ok(offset) = Duration::try_from_secs_f64(time.get() * self.seconds_per_hour) else {
            return;
        };
        let Some(deadline) = self.run_start.checked_add(offset) else {
            return;
        };
        tokio::time::sleep_until(deadline).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn h(hours: f64) -> SimHours {
        SimHours::new(hours).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn waits_out_the_scaled_deadline() {
        let pacer = Pacer::new(2.0);
        let before = Instant::now();

        pacer.pace_until(h(1.5)).await;

        let waited = Instant::now().duration_since(before);
        assert!(waited >= Duration::from_secs(3));
        assert!(waited < Duration::from_millis(3_100));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ratio_never_sleeps() {
        let pacer = Pacer::new(0.0);
        let before = Instant::now();

        pacer.pace_until(h(100.0)).await;

        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn past_deadlines_do_not_wait_again() {
        let pacer = Pacer::new(1.0);
        pacer.pace_until(h(2.0)).await;
        let before = Instant::now();

        // An earlier simulated time maps to a deadline already behind us.
        pacer.pace_until(h(1.0)).await;

        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn deadlines_accumulate_from_run_start_not_from_each_other() {
        let pacer = Pacer::new(1.0);
        let before = Instant::now();

        pacer.pace_until(h(1.0)).await;
        pacer.pace_until(h(3.0)).await;

        // 3 simulated hours at 1s/hour is 3 real seconds total, not 4.
        let waited = Instant::now().duration_since(before);
        assert!(waited >= Duration::from_secs(3));
        assert!(waited < Duration::from_secs(4));
    }
}
