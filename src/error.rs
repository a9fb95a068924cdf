//! Custom error types for the budget vault
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The first group of variants are the budget
//! cycle rules; the rest cover configuration and storage.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Money;

/// The main error type for vault operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VaultError {
    /// Transfer amount or duration was zero or negative
    #[error("Invalid transfer amount or duration.")]
    InvalidAmount,

    /// Transfer exceeds the main account balance
    #[error("Insufficient funds in main account: requested {requested}, available {available}.")]
    InsufficientFunds { requested: Money, available: Money },

    /// Release attempted without an open budget cycle
    #[error("No active budget cycle. Please transfer funds to the vault first.")]
    NoActiveCycle,

    /// No days left and nothing carried over
    #[error("No more funds available.")]
    NoFundsAvailable,

    /// A release already happened on this date
    #[error("Daily funds already withdrawn for today ({date}).")]
    AlreadyWithdrawnToday { date: NaiveDate },

    /// Percentage outside (0, 100]
    #[error("Invalid percentage '{0}'. Please enter a value between 0 and 100.")]
    InvalidPercentage(String),

    /// Withdraw-all with an empty vault and no carry-over
    #[error("No funds available to withdraw.")]
    NoFundsToWithdraw,

    /// Withdraw-all while daily allocations are still pending
    #[error(
        "Cannot withdraw funds while budget cycle is active ({remaining_days} days remaining). \
         Complete the cycle first or withdraw your daily allocation."
    )]
    CycleStillActive { remaining_days: u32 },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed user input (amounts, dates)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl VaultError {
    /// Check if this error is a budget cycle rule rejection
    ///
    /// Rule rejections leave the vault state untouched and are expected
    /// during normal use, unlike storage or configuration failures.
    pub fn is_cycle_rule(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount
                | Self::InsufficientFunds { .. }
                | Self::NoActiveCycle
                | Self::NoFundsAvailable
                | Self::AlreadyWithdrawnToday { .. }
                | Self::InvalidPercentage(_)
                | Self::NoFundsToWithdraw
                | Self::CycleStillActive { .. }
        )
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = VaultError::InsufficientFunds {
            requested: Money::from_cents(600_000),
            available: Money::from_cents(500_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in main account: requested 6000.00, available 5000.00."
        );
    }

    #[test]
    fn test_already_withdrawn_names_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let err = VaultError::AlreadyWithdrawnToday { date };
        assert!(err.to_string().contains("2025-03-14"));
    }

    #[test]
    fn test_cycle_rule_classification() {
        assert!(VaultError::NoActiveCycle.is_cycle_rule());
        assert!(VaultError::CycleStillActive { remaining_days: 2 }.is_cycle_rule());
        assert!(!VaultError::Storage("disk full".into()).is_cycle_rule());
        assert!(!VaultError::Validation("bad".into()).is_cycle_rule());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let vault_err: VaultError = io_err.into();
        assert!(matches!(vault_err, VaultError::Io(_)));
    }
}
