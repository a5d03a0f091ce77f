//! Tunable magnitudes for mood mechanics.
//!
//! The [`MoodConfig`] struct bundles every knob of the morale/fatigue model
//! so that callers (the run loop, tests) can override defaults. Defaults
//! match the studio's reference behavior: morale opens at 75, gossip stings
//! for 1 to 3 points, coffee and meetings move morale by 5, and fatigue
//! accrues at one point per working hour.

use serde::{Deserialize, Serialize};

/// Configuration for the morale/fatigue transitions.
///
/// Every field is defaulted, so an empty YAML mapping deserializes to the
/// reference values. [`MoodConfig::validate`] must pass before the values
/// are used; the transitions assume finite, correctly ordered magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Morale at the open of day one (default: 75).
    #[serde(default = "default_starting_morale")]
    pub starting_morale: f64,

    /// Smallest gossip morale decay (default: 1.0).
    #[serde(default = "default_gossip_decay_min")]
    pub gossip_decay_min: f64,

    /// Largest gossip morale decay (default: 3.0).
    #[serde(default = "default_gossip_decay_max")]
    pub gossip_decay_max: f64,

    /// Morale gained from a coffee break (default: 5.0).
    #[serde(default = "default_coffee_boost")]
    pub coffee_boost: f64,

    /// Morale lost to a team meeting (default: 5.0).
    #[serde(default = "default_meeting_dip")]
    pub meeting_dip: f64,

    /// Fatigue recovered by a coffee break (default: 0.5).
    #[serde(default = "default_coffee_recovery")]
    pub coffee_recovery: f64,

    /// Fatigue recovered by the lunch break (default: 2.0).
    #[serde(default = "default_lunch_recovery")]
    pub lunch_recovery: f64,

    /// Fatigue accrued per elapsed simulated working hour (default: 1.0).
    #[serde(default = "default_fatigue_rate")]
    pub fatigue_rate: f64,
}

const fn default_starting_morale() -> f64 {
    75.0
}

const fn default_gossip_decay_min() -> f64 {
    1.0
}

const fn default_gossip_decay_max() -> f64 {
    3.0
}

const fn default_coffee_boost() -> f64 {
    5.0
}

const fn default_meeting_dip() -> f64 {
    5.0
}

const fn default_coffee_recovery() -> f64 {
    0.5
}

const fn default_lunch_recovery() -> f64 {
    2.0
}

const fn default_fatigue_rate() -> f64 {
    1.0
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            starting_morale: default_starting_morale(),
            gossip_decay_min: default_gossip_decay_min(),
            gossip_decay_max: default_gossip_decay_max(),
            coffee_boost: default_coffee_boost(),
            meeting_dip: default_meeting_dip(),
            coffee_recovery: default_coffee_recovery(),
            lunch_recovery: default_lunch_recovery(),
            fatigue_rate: default_fatigue_rate(),
        }
    }
}

/// Errors produced by [`MoodConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum MoodConfigError {
    /// A magnitude was `NaN` or infinite.
    #[error("mood config field {field} must be finite, got {value}")]
    NotFinite {
        /// The offending field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A magnitude that must be non-negative was negative.
    #[error("mood config field {field} must be non-negative, got {value}")]
    Negative {
        /// The offending field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Starting morale was outside the `[0, 100]` band.
    #[error("starting morale must lie in [0, 100], got {value}")]
    StartingMoraleOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// The gossip decay range was inverted.
    #[error("gossip decay range is inverted: min {min} > max {max}")]
    InvertedGossipRange {
        /// The configured minimum.
        min: f64,
        /// The configured maximum.
        max: f64,
    },
}

impl MoodConfig {
    /// Check that every magnitude is usable by the transitions.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: non-finite values, negative
    /// magnitudes, starting morale outside `[0, 100]`, or an inverted
    /// gossip decay range.
    pub fn validate(&self) -> Result<(), MoodConfigError> {
        let fields = [
            ("starting_morale", self.starting_morale),
            ("gossip_decay_min", self.gossip_decay_min),
            ("gossip_decay_max", self.gossip_decay_max),
            ("coffee_boost", self.coffee_boost),
            ("meeting_dip", self.meeting_dip),
            ("coffee_recovery", self.coffee_recovery),
            ("lunch_recovery", self.lunch_recovery),
            ("fatigue_rate", self.fatigue_rate),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(MoodConfigError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(MoodConfigError::Negative { field, value });
            }
        }

        if self.starting_morale > 100.0 {
            return Err(MoodConfigError::StartingMoraleOutOfRange {
                value: self.starting_morale,
            });
        }
        if self.gossip_decay_min > self.gossip_decay_max {
            return Err(MoodConfigError::InvertedGossipRange {
                min: self.gossip_decay_min,
                max: self.gossip_decay_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        MoodConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_yaml_mapping_yields_defaults() {
        let config: MoodConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MoodConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: MoodConfig = serde_json::from_str(r#"{"coffee_boost": 10.0}"#).unwrap();
        assert!((config.coffee_boost - 10.0).abs() < f64::EPSILON);
        assert!((config.fatigue_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_nan_magnitudes() {
        let config = MoodConfig {
            coffee_boost: f64::NAN,
            ..MoodConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MoodConfigError::NotFinite { field: "coffee_boost", .. })
        ));
    }

    #[test]
    fn rejects_negative_magnitudes() {
        let config = MoodConfig {
            lunch_recovery: -1.0,
            ..MoodConfig::default()
        };
        assert!(matches!(config.validate(), Err(MoodConfigError::Negative { .. })));
    }

    #[test]
    fn rejects_out_of_band_starting_morale() {
        let config = MoodConfig {
            starting_morale: 120.0,
            ..MoodConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MoodConfigError::StartingMoraleOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_inverted_gossip_range() {
        let config = MoodConfig {
            gossip_decay_min: 4.0,
            gossip_decay_max: 2.0,
            ..MoodConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MoodConfigError::InvertedGossipRange { .. })
        ));
    }
}
