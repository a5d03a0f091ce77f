//! Run-level error type for the studio.

use bullpen_artifacts::ArtifactError;
use bullpen_ledger::BudgetError;
use bullpen_llm::LlmError;
use bullpen_types::TimeError;

/// Errors that can abort a studio run.
///
/// The run loop is deliberately fail-fast: any of these propagates out of
/// [`Studio::run`](crate::studio::Studio::run) and ends the run with no
/// recovery attempt.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// A computed timestamp was not valid simulated time.
    #[error("time error: {source}")]
    Time {
        /// The underlying time error.
        #[from]
        source: TimeError,
    },

    /// A budget operation was rejected.
    #[error("budget error: {source}")]
    Budget {
        /// The underlying budget error.
        #[from]
        source: BudgetError,
    },

    /// The language-model client failed after its retries.
    #[error("language-model error: {source}")]
    Llm {
        /// The underlying client error.
        #[from]
        source: LlmError,
    },

    /// An artifact write, workspace write, or sandbox invocation failed.
    #[error("artifact error: {source}")]
    Artifact {
        /// The underlying artifact error.
        #[from]
        source: ArtifactError,
    },
}
