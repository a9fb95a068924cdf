//! Budget cycle engine
//!
//! Pure state transitions for the vault. Each operation takes the current
//! record by reference, checks its preconditions, and returns the next record
//! together with an [`Outcome`] describing what happened. A rejected
//! operation returns the error and the caller's record is left as it was.
//!
//! Nothing here touches storage or the clock; "today" is always passed in.

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{VaultError, VaultResult};
use crate::models::{Money, Percentage, VaultState};

/// Currency symbol used when an outcome is displayed without settings
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R";

/// A successful engine step
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The record after the operation
    pub state: VaultState,
    /// What the operation did
    pub outcome: Outcome,
}

/// What a successful operation did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new cycle was opened
    Transferred {
        amount: Money,
        days: u32,
        daily_allocation: Money,
    },
    /// Daily funds were released
    Released(Release),
    /// The vault was emptied back into the main account
    Withdrawn { amount: Money },
}

/// Figures from a single release
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    /// Amount paid out
    pub released: Money,
    /// Share of the available funds requested
    pub percentage: Percentage,
    /// Allocation for the accounted days plus the previous carry-over
    pub total_available: Money,
    /// What was left unreleased and rolls forward
    pub carry_over: Money,
    /// Vault balance after the deduction
    pub vault_balance: Money,
    /// Days of allocation consumed, today included
    pub days_accounted: u32,
    /// Days skipped since the previous release
    pub days_missed: u32,
    /// Whether this release closed the cycle
    pub cycle_closed: bool,
}

impl Outcome {
    /// Human-readable summary using the given currency symbol
    pub fn message(&self, symbol: &str) -> String {
        match self {
            Self::Transferred {
                amount,
                days,
                daily_allocation,
            } => format!(
                "Transfer successful! {} moved to Budget Vault for {} days. Daily budget: {}.",
                amount.format_with_symbol(symbol),
                days,
                daily_allocation.format_with_symbol(symbol),
            ),
            Self::Released(release) => format!(
                "{} released ({} of available {}). {} added to carry-over. Remaining vault balance: {}.",
                release.released.format_with_symbol(symbol),
                release.percentage,
                release.total_available.format_with_symbol(symbol),
                release.carry_over.format_with_symbol(symbol),
                release.vault_balance.format_with_symbol(symbol),
            ),
            Self::Withdrawn { amount } => format!(
                "{} withdrawn from vault and returned to main account.",
                amount.format_with_symbol(symbol)
            ),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(DEFAULT_CURRENCY_SYMBOL))
    }
}

/// Open a new cycle by moving `amount` from the main account into the vault
///
/// `days` is signed so that out-of-range input from any caller is rejected
/// here rather than wrapped.
pub fn transfer_to_vault(state: &VaultState, amount: Money, days: i64) -> VaultResult<Transition> {
    if !amount.is_positive() || days <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    let days = u32::try_from(days).map_err(|_| VaultError::InvalidAmount)?;

    if amount > state.main_account {
        return Err(VaultError::InsufficientFunds {
            requested: amount,
            available: state.main_account,
        });
    }

    let daily_allocation = amount.split_over(days);

    let mut next = state.clone();
    next.main_account -= amount;
    next.vault_balance = amount;
    next.daily_allocation = daily_allocation;
    next.remaining_days = days;
    next.last_withdrawal = None;
    next.carry_over = Money::zero();
    next.budget_cycle_active = true;

    Ok(Transition {
        state: next,
        outcome: Outcome::Transferred {
            amount,
            days,
            daily_allocation,
        },
    })
}

/// Release today's allocation, catching up on any days missed since the last release
///
/// The requested share of everything available is paid out; the rest becomes
/// the new carry-over, replacing the old one (which is already part of the
/// available total).
pub fn release_funds(
    state: &VaultState,
    percentage: Percentage,
    today: NaiveDate,
) -> VaultResult<Transition> {
    if !state.budget_cycle_active {
        return Err(VaultError::NoActiveCycle);
    }

    if !state.has_releasable_funds() {
        return Err(VaultError::NoFundsAvailable);
    }

    let days_missed = match state.last_withdrawal {
        None => 0,
        Some(last) if last == today => {
            return Err(VaultError::AlreadyWithdrawnToday { date: today });
        }
        Some(last) => {
            let gap = (today - last).num_days() - 1;
            u32::try_from(gap.max(0)).unwrap_or(u32::MAX)
        }
    };

    let days_accounted = days_missed.saturating_add(1).min(state.remaining_days);
    let allocation = state.daily_allocation.times(days_accounted);

    let total_available = allocation + state.carry_over;
    let released = percentage.of(total_available);
    let carry_over = total_available - released;

    debug!(
        days_missed,
        days_accounted,
        total_available = %total_available,
        "computed release"
    );

    let mut next = state.clone();
    next.vault_balance -= allocation.min(state.vault_balance);
    next.remaining_days = state.remaining_days.saturating_sub(days_accounted);
    next.last_withdrawal = Some(today);
    next.carry_over = carry_over;

    let cycle_closed = next.remaining_days == 0 && !next.vault_balance.is_positive();
    if cycle_closed {
        next.budget_cycle_active = false;
        next.daily_allocation = Money::zero();
    }

    let vault_balance = next.vault_balance;

    Ok(Transition {
        state: next,
        outcome: Outcome::Released(Release {
            released,
            percentage,
            total_available,
            carry_over,
            vault_balance,
            days_accounted,
            days_missed,
            cycle_closed,
        }),
    })
}

/// Close the cycle and return the vault balance and carry-over to the main account
///
/// Refused while daily allocations are still pending.
pub fn withdraw_all_funds(state: &VaultState) -> VaultResult<Transition> {
    if !state.vault_balance.is_positive() && !state.carry_over.is_positive() {
        return Err(VaultError::NoFundsToWithdraw);
    }

    if state.budget_cycle_active && state.remaining_days > 0 {
        return Err(VaultError::CycleStillActive {
            remaining_days: state.remaining_days,
        });
    }

    let amount = state.withdrawable();

    let mut next = state.clone();
    next.main_account += amount;
    next.vault_balance = Money::zero();
    next.remaining_days = 0;
    next.daily_allocation = Money::zero();
    next.carry_over = Money::zero();
    next.budget_cycle_active = false;

    Ok(Transition {
        state: next,
        outcome: Outcome::Withdrawn { amount },
    })
}

/// Read-only view of the record
pub fn inspect(state: &VaultState) -> &VaultState {
    state
}
