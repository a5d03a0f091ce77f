//! Crew state and mood mechanics for the Bullpen studio simulation.
//!
//! This crate contains the logic layer for the crew -- everything that
//! operates on morale and fatigue without touching I/O. It sits between
//! `bullpen-types` (which defines the vocabulary) and the core crate
//! (which schedules the events that trigger these transitions).
//!
//! # Modules
//!
//! - [`config`] -- Tunable magnitudes for mood mechanics ([`MoodConfig`])
//! - [`morale`] -- Bounded wellbeing state and its transitions ([`Morale`])
//! - [`fatigue`] -- Bounded tiredness state, accrual and recovery ([`Fatigue`])
//! - [`roster`] -- Crew selection helpers (random gossip speaker)

pub mod config;
pub mod fatigue;
pub mod morale;
pub mod roster;

// Re-export primary types at crate root for convenience.
pub use config::{MoodConfig, MoodConfigError};
pub use fatigue::Fatigue;
pub use morale::Morale;
