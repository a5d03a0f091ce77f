//! Event scheduler, pacer, calendar, and run loop for the Bullpen studio
//! simulation.
//!
//! This crate is the studio's engine room. It turns a [`StudioConfig`]
//! into a day's worth of scheduled events, then drains them in timestamp
//! order through a single cooperative loop: pace to the event's wall-clock
//! deadline, advance the virtual clock, execute the action. Crew turns,
//! breaks, meetings, gossip, and the deadline are all just events.
//!
//! # Modules
//!
//! - [`event`] -- [`Event`], the closed [`EventAction`] set, and the
//!   insertion-ordered min-heap [`EventQueue`]
//! - [`clock`] -- The monotonic virtual clock ([`clock::WorkClock`])
//! - [`pacer`] -- Simulated-to-wall-clock pacing ([`pacer::Pacer`])
//! - [`calendar`] -- Expansion of the day window into the initial event set
//! - [`config`] -- [`StudioConfig`] loading and validation
//! - [`studio`] -- The [`Studio`]: state, dispatch, and the run loop
//! - [`error`] -- The run-level [`StudioError`]

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod pacer;
pub mod studio;

// Re-export the primary types at crate root for convenience.
pub use config::{ConfigError, StudioConfig};
pub use error::StudioError;
pub use event::{Event, EventAction, EventQueue};
pub use studio::{EndReason, RunSummary, Studio};
