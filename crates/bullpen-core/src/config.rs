//! Configuration loading and the top-level `StudioConfig`.
//!
//! The studio reads one YAML file. Every field is defaulted, so an empty
//! file (or no file at all) produces a one-day, nine-to-five run with a
//! fifty-cent budget. CLI flags in the binary override whatever the file
//! said; the only environment-sourced value anywhere is the API key,
//! which is applied by the binary, not here.
//!
//! [`StudioConfig::validate`] must pass before a run starts. It checks the
//! calendar shape, the pacing ratio, and the budget, and delegates to the
//! mood and LLM sections for their own invariants.

use std::path::Path;

use bullpen_agents::{MoodConfig, MoodConfigError};
use bullpen_llm::{LlmConfig, LlmError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value was out of range or the calendar does not make sense.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },

    /// The mood section failed its own validation.
    #[error("invalid mood configuration: {source}")]
    Mood {
        /// The underlying mood config error.
        #[from]
        source: MoodConfigError,
    },

    /// The LLM section failed its own validation.
    #[error("invalid llm configuration: {source}")]
    Llm {
        /// The underlying LLM config error.
        #[from]
        source: LlmError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration for a studio run.
///
/// Mirrors the YAML file structure. All fields have defaults matching the
/// studio's reference behavior, so `StudioConfig::default()` is a valid,
/// runnable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Number of simulated workdays.
    #[serde(default = "default_days")]
    pub days: u32,

    /// Hour of the day the studio opens, on a 24-hour clock.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,

    /// Hour of the day the studio closes, on a 24-hour clock.
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,

    /// Real seconds spent per simulated hour; zero runs flat out.
    #[serde(default = "default_seconds_per_hour")]
    pub seconds_per_hour: f64,

    /// Spend ceiling in dollars; the run halts once spend exceeds it.
    #[serde(default = "default_budget")]
    pub budget: Decimal,

    /// Seed for gossip randomness; unset draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Skip the containerized QA check and report a canned pass.
    #[serde(default)]
    pub skip_sandbox: bool,

    /// Morale/fatigue magnitudes.
    #[serde(default)]
    pub mood: MoodConfig,

    /// Language-model client settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

const fn default_days() -> u32 {
    1
}

const fn default_start_hour() -> u32 {
    9
}

const fn default_end_hour() -> u32 {
    17
}

const fn default_seconds_per_hour() -> f64 {
    1.0
}

fn default_budget() -> Decimal {
    Decimal::new(50, 2)
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            seconds_per_hour: default_seconds_per_hour(),
            budget: default_budget(),
            seed: None,
            skip_sandbox: false,
            mood: MoodConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Working hours in one day.
    #[must_use]
    pub fn hours_per_day(&self) -> f64 {
        f64::from(self.end_hour) - f64::from(self.start_hour)
    }

    /// The scheduling horizon: total working hours across the whole run.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        f64::from(self.days) * self.hours_per_day()
    }

    /// The fatigue ceiling implied by the calendar and the accrual rate.
    #[must_use]
    pub fn fatigue_cap(&self) -> f64 {
        self.hours_per_day() * self.mood.fatigue_rate
    }

    /// Check that the configuration describes a runnable day.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a bad calendar, pacing ratio,
    /// or budget; [`ConfigError::Mood`] or [`ConfigError::Llm`] when those
    /// sections reject their own values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::Invalid {
                reason: "days must be at least 1".to_owned(),
            });
        }
        if self.end_hour > 24 {
            return Err(ConfigError::Invalid {
                reason: format!("end_hour must be at most 24, got {}", self.end_hour),
            });
        }
        if self.start_hour >= self.end_hour {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "the working day is empty: start_hour {} is not before end_hour {}",
                    self.start_hour, self.end_hour
                ),
            });
        }
        if !self.seconds_per_hour.is_finite() || self.seconds_per_hour < 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "seconds_per_hour must be finite and non-negative, got {}",
                    self.seconds_per_hour
                ),
            });
        }
        if self.budget.is_sign_negative() {
            return Err(ConfigError::Invalid {
                reason: format!("budget must be non-negative, got {}", self.budget),
            });
        }
        self.mood.validate()?;
        self.llm.validate()?;
        Ok(())
    }
}
