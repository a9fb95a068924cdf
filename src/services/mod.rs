//! Service layer for the budget vault
//!
//! `cycle` holds the pure budget cycle state machine; `vault` runs it against
//! storage and exposes the operation boundary.

pub mod cycle;
pub mod vault;

pub use cycle::{Outcome, Release, Transition};
pub use vault::{Clock, FixedClock, OperationResponse, ResponseStatus, SystemClock, VaultService};
