//! Bounded tiredness state, accrual and recovery.
//!
//! Fatigue starts at zero, accrues with every simulated working hour, and
//! is capped at `hours_per_day x fatigue_rate`: a crew member can end the
//! day exhausted but never more than one full day's worth. Breaks recover
//! part of it, floored at zero.

use crate::config::MoodConfig;

/// The crew's shared fatigue, always within `[0, cap]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fatigue {
    current: f64,
    cap: f64,
}

impl Fatigue {
    /// A fully rested crew with the given upper bound.
    ///
    /// The cap is `hours_per_day x fatigue_rate`; the caller derives it from
    /// the calendar. Negative or non-finite caps collapse to zero, which
    /// makes every accrual a no-op.
    #[must_use]
    pub fn rested(cap: f64) -> Self {
        let cap = if cap.is_finite() { cap.max(0.0) } else { 0.0 };
        Self { current: 0.0, cap }
    }

    /// The current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.current
    }

    /// The upper bound.
    #[must_use]
    pub const fn cap(&self) -> f64 {
        self.cap
    }
}

/// Accrue fatigue for `elapsed_hours` of simulated work, capped.
///
/// Negative spans (which the clock never produces) count as zero.
pub fn accrue(fatigue: &mut Fatigue, elapsed_hours: f64, config: &MoodConfig) {
    let added = elapsed_hours.max(0.0) * config.fatigue_rate;
    fatigue.current = (fatigue.current + added).min(fatigue.cap);
}

/// Recover `amount` fatigue, floored at zero.
///
/// Coffee passes the small recovery, lunch the large one.
pub fn recover(fatigue: &mut Fatigue, amount: f64) {
    fatigue.current = (fatigue.current - amount.max(0.0)).max(0.0);
}
