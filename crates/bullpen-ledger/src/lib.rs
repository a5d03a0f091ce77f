//! Budget book and spend cutoff for the Bullpen studio simulation.
//!
//! Every dollar the studio spends on language-model calls flows through the
//! [`BudgetBook`]. The book accumulates charges, and the moment cumulative
//! spend strictly exceeds the configured ceiling it latches into a halted
//! state for the rest of the run. The crossing is reported to the caller
//! exactly once so the halt notice and queue teardown happen in one place.
//!
//! # Design
//!
//! - **Append-only**: charges are never modified or deleted; `spent` only
//!   increases and is never reset mid-run.
//! - **Latched**: once halted, always halted. There is no API to clear the
//!   flag.
//! - **Precision**: all monetary amounts use [`Decimal`] -- no floating
//!   point.
//! - **No I/O**: the book records and reports; emitting the halt notice and
//!   clearing the event queue belong to the run loop that owns both.

pub mod budget;

// Re-export primary types at crate root.
pub use budget::{BudgetBook, Charge, ChargeOutcome};

use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when building or charging a budget book.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// The configured ceiling was negative.
    #[error("budget ceiling must be non-negative, got {ceiling}")]
    NegativeCeiling {
        /// The invalid ceiling.
        ceiling: Decimal,
    },

    /// A charge amount was negative.
    #[error("charge amount must be non-negative, got {amount}")]
    NegativeCharge {
        /// The invalid amount.
        amount: Decimal,
    },
}
