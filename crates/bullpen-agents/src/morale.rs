//! Bounded wellbeing state and its transitions.
//!
//! Morale lives in `[0, 100]` and moves only through the functions in this
//! module: gossip drags it down by a uniformly drawn amount, coffee lifts
//! it, meetings dent it. Gossip is the single randomized transition; with a
//! fixed seed every run replays identically.

use rand::Rng;

use crate::config::MoodConfig;

/// The crew's shared morale, always within `[0, 100]`.
///
/// The field is private: every mutation routes through a transition so the
/// bound holds at every observation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Morale {
    current: f64,
}

impl Morale {
    /// Morale at the open of day one, clamped into the valid band.
    #[must_use]
    pub fn starting(config: &MoodConfig) -> Self {
        Self {
            current: config.starting_morale.clamp(0.0, 100.0),
        }
    }

    /// The current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.current
    }

    /// Shift by `delta` and clamp back into the band.
    fn shift(&mut self, delta: f64) {
        self.current = (self.current + delta).clamp(0.0, 100.0);
    }
}

/// Apply a gossip sting: morale drops by a uniform draw from the configured
/// decay range, floored at zero. Returns the drawn magnitude.
pub fn apply_gossip(morale: &mut Morale, config: &MoodConfig, rng: &mut impl Rng) -> f64 {
    let decay = rng.random_range(config.gossip_decay_min..=config.gossip_decay_max);
    morale.shift(-decay);
    decay
}

/// Apply a coffee break: morale rises by the configured boost, capped at 100.
pub fn apply_coffee(morale: &mut Morale, config: &MoodConfig) {
    morale.shift(config.coffee_boost);
}

/// Apply a team meeting: morale drops by the configured dip, floored at zero.
pub fn apply_meeting(morale: &mut Morale, config: &MoodConfig) {
    morale.shift(-config.meeting_dip);
}
