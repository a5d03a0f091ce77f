//! Shared type definitions for the Bullpen studio simulation.
//!
//! This crate is the single source of truth for the small vocabulary the
//! rest of the workspace speaks: simulated time, crew identity, and the
//! categories that label timeline rows. It has no I/O and no behavior
//! beyond what the types themselves guarantee.
//!
//! # Modules
//!
//! - [`time`] -- Totally ordered simulated-time values ([`SimHours`])
//! - [`crew`] -- The closed set of studio roles ([`AgentKind`]) and row
//!   categories ([`LogKind`])
//! - [`ids`] -- Type-safe UUID wrapper for run identity ([`RunId`])

pub mod crew;
pub mod ids;
pub mod time;

// Re-export the primary types at crate root for convenience.
pub use crew::{AgentKind, LogKind};
pub use ids::RunId;
pub use time::{SimHours, TimeError};
