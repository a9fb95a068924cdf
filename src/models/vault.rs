//! Vault state model
//!
//! The single persisted record: the main account balance plus everything the
//! current budget cycle needs to release daily funds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Main account balance given to a fresh record
pub const DEFAULT_MAIN_ACCOUNT: Money = Money::from_units(5000);

/// The whole vault record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    /// Funds outside the vault
    pub main_account: Money,

    /// Funds committed to the current cycle and not yet disbursed
    pub vault_balance: Money,

    /// Per-day release amount, fixed when the cycle starts
    pub daily_allocation: Money,

    /// Days left in the cycle
    pub remaining_days: u32,

    /// Date of the most recent release in this cycle
    pub last_withdrawal: Option<NaiveDate>,

    /// Released-but-not-withdrawn funds rolled into the next release
    pub carry_over: Money,

    /// Whether a cycle is currently open
    pub budget_cycle_active: bool,
}

impl VaultState {
    /// Create an inactive record with the given main account balance
    pub fn with_main_account(main_account: Money) -> Self {
        Self {
            main_account,
            vault_balance: Money::zero(),
            daily_allocation: Money::zero(),
            remaining_days: 0,
            last_withdrawal: None,
            carry_over: Money::zero(),
            budget_cycle_active: false,
        }
    }

    /// Where the record sits in the cycle state machine
    pub fn phase(&self) -> CyclePhase {
        if !self.budget_cycle_active {
            CyclePhase::Inactive
        } else if self.remaining_days > 0 {
            CyclePhase::ActiveWithDaysRemaining
        } else {
            CyclePhase::ActiveExhaustedWithCarryOver
        }
    }

    /// Everything a withdraw-all would return to the main account
    pub fn withdrawable(&self) -> Money {
        self.vault_balance + self.carry_over
    }

    /// Whether a release could produce anything
    pub fn has_releasable_funds(&self) -> bool {
        self.remaining_days > 0 || self.carry_over.is_positive()
    }

    /// Check the non-negativity invariants
    pub fn validate(&self) -> Result<(), VaultValidationError> {
        let balances = [
            ("main_account", self.main_account),
            ("vault_balance", self.vault_balance),
            ("daily_allocation", self.daily_allocation),
            ("carry_over", self.carry_over),
        ];

        for (field, amount) in balances {
            if amount.is_negative() {
                return Err(VaultValidationError::NegativeBalance { field, amount });
            }
        }

        if !self.budget_cycle_active && self.remaining_days > 0 {
            return Err(VaultValidationError::DaysWithoutCycle(self.remaining_days));
        }

        Ok(())
    }
}

impl Default for VaultState {
    fn default() -> Self {
        Self::with_main_account(DEFAULT_MAIN_ACCOUNT)
    }
}

/// Derived position in the budget cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// No cycle open; a transfer starts one
    Inactive,
    /// Daily allocations still pending
    ActiveWithDaysRemaining,
    /// All days consumed; only leftovers remain until withdraw-all
    ActiveExhaustedWithCarryOver,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "Inactive"),
            Self::ActiveWithDaysRemaining => write!(f, "Active"),
            Self::ActiveExhaustedWithCarryOver => write!(f, "Exhausted (carry-over only)"),
        }
    }
}

/// Invariant violations found in a loaded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultValidationError {
    NegativeBalance { field: &'static str, amount: Money },
    DaysWithoutCycle(u32),
}

impl fmt::Display for VaultValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeBalance { field, amount } => {
                write!(f, "{} must not be negative (found {})", field, amount)
            }
            Self::DaysWithoutCycle(days) => {
                write!(f, "{} remaining days recorded with no active cycle", days)
            }
        }
    }
}

impl std::error::Error for VaultValidationError {}
