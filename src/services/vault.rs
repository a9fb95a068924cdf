//! Vault service
//!
//! Runs budget cycle operations against a [`StateStore`]: load the record,
//! apply the engine, persist the result. The whole sequence holds an
//! exclusive guard so two callers in one process cannot both release from the
//! same pre-release record.
//!
//! Two layers are exposed. The `try_*` methods return typed results for
//! callers that want to branch on [`VaultError`]. The boundary methods
//! (`transfer`, `release`, `withdraw_remaining`, `get_balance`) never fail;
//! every outcome becomes an [`OperationResponse`] with a message.

use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::cycle::{self, Outcome, Transition, DEFAULT_CURRENCY_SYMBOL};
use crate::error::{VaultError, VaultResult};
use crate::models::{Money, Percentage, VaultState};
use crate::storage::StateStore;

/// Source of "today" for release bookkeeping
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Whether an operation went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Result of an operation at the invocation boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResponse {
    pub message: String,
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<VaultState>,
}

impl OperationResponse {
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Attach the current record
    pub fn with_data(mut self, state: VaultState) -> Self {
        self.data = Some(state);
        self
    }
}

/// Service running budget cycle operations against a store
pub struct VaultService<S, C = SystemClock> {
    store: S,
    clock: C,
    currency_symbol: String,
    guard: Mutex<()>,
}

impl<S: StateStore> VaultService<S, SystemClock> {
    /// Create a service using the system date
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: StateStore, C: Clock> VaultService<S, C> {
    /// Create a service with an explicit clock
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            guard: Mutex::new(()),
        }
    }

    /// Use `symbol` in outcome messages
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Render an outcome with this service's currency symbol
    pub fn describe(&self, outcome: &Outcome) -> String {
        outcome.message(&self.currency_symbol)
    }

    /// Load, apply `step`, and persist, all under the guard
    fn apply<F>(&self, operation: &'static str, step: F) -> VaultResult<Transition>
    where
        F: FnOnce(&VaultState) -> VaultResult<Transition>,
    {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());

        let state = self.store.load();
        match step(&state) {
            Ok(transition) => {
                self.store.save(&transition.state)?;
                info!(
                    operation,
                    main_account = %transition.state.main_account,
                    vault_balance = %transition.state.vault_balance,
                    remaining_days = transition.state.remaining_days,
                    carry_over = %transition.state.carry_over,
                    "vault updated"
                );
                Ok(transition)
            }
            Err(e) => {
                info!(operation, reason = %e, "operation rejected");
                Err(e)
            }
        }
    }

    /// Move `amount` into the vault for `days` days
    pub fn try_transfer(&self, amount: Money, days: i64) -> VaultResult<Transition> {
        self.apply("transfer", |state| {
            let transition = cycle::transfer_to_vault(state, amount, days)?;
            let discarded = state.withdrawable();
            if discarded.is_positive() {
                warn!(
                    discarded = %discarded,
                    "new cycle replaces funds still held by the previous one"
                );
            }
            Ok(transition)
        })
    }

    /// Release funds for today's date
    pub fn try_release(&self, percentage: Percentage) -> VaultResult<Transition> {
        self.try_release_on(percentage, self.clock.today())
    }

    /// Release funds as if `today` were the current date
    pub fn try_release_on(
        &self,
        percentage: Percentage,
        today: NaiveDate,
    ) -> VaultResult<Transition> {
        self.apply("release", |state| cycle::release_funds(state, percentage, today))
    }

    /// Return everything left in the vault to the main account
    pub fn try_withdraw_all(&self) -> VaultResult<Transition> {
        self.apply("withdraw_all", cycle::withdraw_all_funds)
    }

    /// Turn a typed result into a boundary response
    pub fn respond(&self, result: VaultResult<Transition>) -> OperationResponse {
        match result {
            Ok(transition) => OperationResponse {
                message: self.describe(&transition.outcome),
                status: ResponseStatus::Success,
                data: None,
            },
            Err(e) => OperationResponse {
                message: e.to_string(),
                status: ResponseStatus::Error,
                data: None,
            },
        }
    }

    /// Boundary: transfer with raw numeric input
    pub fn transfer(&self, amount: f64, days: i64) -> OperationResponse {
        let result = Money::from_f64(amount)
            .ok_or(VaultError::InvalidAmount)
            .and_then(|amount| self.try_transfer(amount, days));
        self.respond(result)
    }

    /// Boundary: release with a raw percentage, returning the current record
    pub fn release(&self, percentage: f64) -> OperationResponse {
        let result = Percentage::from_f64(percentage).and_then(|p| self.try_release(p));
        self.respond(result).with_data(self.get_balance())
    }

    /// Boundary: withdraw everything, returning the current record
    pub fn withdraw_remaining(&self) -> OperationResponse {
        let result = self.try_withdraw_all();
        self.respond(result).with_data(self.get_balance())
    }

    /// Boundary: the current record
    pub fn get_balance(&self) -> VaultState {
        let state = self.store.load();
        cycle::inspect(&state).clone()
    }
}
