//! The budget book: cumulative spend against a hard ceiling.
//!
//! The [`BudgetBook`] is the in-memory spend record for the current run. It
//! holds every [`Charge`], answers balance queries, and owns the halt
//! latch that ends the studio's day early when money runs out.

use std::fmt;

use rust_decimal::Decimal;

use bullpen_types::{AgentKind, SimHours};

use crate::BudgetError;

// ---------------------------------------------------------------------------
// Charges
// ---------------------------------------------------------------------------

/// One recorded spend, attributed to the crew member who incurred it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charge {
    /// Simulated time at which the spend was posted.
    pub at: SimHours,
    /// The crew member whose call incurred the cost.
    pub payer: AgentKind,
    /// The amount in dollars. Zero is common: offline calls are free.
    pub amount: Decimal,
}

/// What a charge did to the book's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// Spend recorded; cumulative total remains at or under the ceiling.
    WithinBudget,
    /// This charge pushed cumulative spend strictly past the ceiling.
    /// Reported exactly once per run; the caller must stop scheduling and
    /// emit the halt notice.
    CeilingCrossed,
    /// Spend recorded while the book was already halted. The in-flight
    /// action is allowed to finish; nothing new follows it.
    AlreadyHalted,
}

// ---------------------------------------------------------------------------
// Budget book
// ---------------------------------------------------------------------------

/// Cumulative spend record with a latched cutoff.
///
/// Invariants:
/// 1. `spent` is the sum of all recorded charge amounts and never decreases.
/// 2. `halted` becomes true on the first charge that makes
///    `spent > ceiling`, and stays true for the rest of the run.
/// 3. Spend exactly equal to the ceiling does not halt; the comparison is
///    strict.
#[derive(Debug)]
pub struct BudgetBook {
    /// Maximum cumulative spend before the run self-halts.
    ceiling: Decimal,
    /// Running total of all charges.
    spent: Decimal,
    /// Whether the ceiling has been crossed this run.
    halted: bool,
    /// All charges, in posting order.
    charges: Vec<Charge>,
}

impl BudgetBook {
    /// Create a budget book with the given ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::NegativeCeiling`] if `ceiling` is negative.
    /// A zero ceiling is valid: the first nonzero charge halts the run.
    pub fn new(ceiling: Decimal) -> Result<Self, BudgetError> {
        if ceiling < Decimal::ZERO {
            return Err(BudgetError::NegativeCeiling { ceiling });
        }
        Ok(Self {
            ceiling,
            spent: Decimal::ZERO,
            halted: false,
            charges: Vec::new(),
        })
    }

    /// The configured ceiling.
    pub const fn ceiling(&self) -> Decimal {
        self.ceiling
    }

    /// Cumulative spend so far.
    pub const fn total_spent(&self) -> Decimal {
        self.spent
    }

    /// Whether the ceiling has been crossed this run.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Budget still available, floored at zero once the book is overdrawn.
    pub fn remaining(&self) -> Decimal {
        self.ceiling.saturating_sub(self.spent).max(Decimal::ZERO)
    }

    /// All charges, in posting order.
    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    /// Post a charge and report what it did to the book.
    ///
    /// The charge is recorded unconditionally, including after a halt: the
    /// action that crossed the ceiling is allowed to finish its bookkeeping.
    /// Only the *first* crossing returns [`ChargeOutcome::CeilingCrossed`].
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::NegativeCharge`] if `amount` is negative; the
    /// book is left untouched in that case.
    pub fn charge(
        &mut self,
        at: SimHours,
        payer: AgentKind,
        amount: Decimal,
    ) -> Result<ChargeOutcome, BudgetError> {
        if amount < Decimal::ZERO {
            return Err(BudgetError::NegativeCharge { amount });
        }

        self.spent = self.spent.saturating_add(amount);
        self.charges.push(Charge { at, payer, amount });

        if self.halted {
            return Ok(ChargeOutcome::AlreadyHalted);
        }
        if self.spent > self.ceiling {
            self.halted = true;
            return Ok(ChargeOutcome::CeilingCrossed);
        }
        Ok(ChargeOutcome::WithinBudget)
    }

    /// Total spend attributed to one crew member.
    pub fn spend_by(&self, payer: AgentKind) -> Decimal {
        self.charges
            .iter()
            .filter(|charge| charge.payer == payer)
            .fold(Decimal::ZERO, |total, charge| {
                total.saturating_add(charge.amount)
            })
    }
}

impl fmt::Display for BudgetBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spent ${:.4} of ${:.4} across {} charges",
            self.spent,
            self.ceiling,
            self.charges.len()
        )?;
        if self.halted {
            write!(f, " (halted)")?;
        }
        Ok(())
    }
}
