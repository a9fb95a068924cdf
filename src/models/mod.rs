//! Core data models for the budget vault
//!
//! Currency amounts, release percentages, and the vault record itself.

pub mod money;
pub mod percentage;
pub mod vault;

pub use money::Money;
pub use percentage::Percentage;
pub use vault::{CyclePhase, VaultState, VaultValidationError, DEFAULT_MAIN_ACCOUNT};
