//! Run artifacts for the Bullpen studio simulation.
//!
//! Everything a run leaves behind on disk goes through this crate: the
//! two append-only Markdown logs, the confined writes for crew output,
//! and the containerized QA check. Nothing here knows about scheduling
//! or budgets; callers hand in values, this crate puts them somewhere
//! safe.
//!
//! # Modules
//!
//! - [`sinks`] -- Timeline and gossip Markdown artifacts ([`RunLog`])
//! - [`workspace`] -- Confined filesystem writes ([`Workspace`])
//! - [`sandbox`] -- Containerized syntax check ([`SandboxRunner`])
//! - [`error`] -- Typed errors for all of the above ([`ArtifactError`])

pub mod error;
pub mod sandbox;
pub mod sinks;
pub mod workspace;

// Re-export primary types at crate root for convenience.
pub use error::ArtifactError;
pub use sandbox::{SKIP_REPORT, SandboxRunner};
pub use sinks::RunLog;
pub use workspace::{Workspace, WriteMode};
