//! Vault display formatting
//!
//! Formats the vault record and release figures for terminal output.

use crate::config::Settings;
use crate::models::VaultState;
use crate::services::Release;

/// Format the vault record as a detail view
pub fn format_vault_state(state: &VaultState, settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();

    output.push_str("Budget Vault\n");
    output.push_str(&format!("  Status:           {}\n", state.phase()));
    output.push_str(&format!(
        "  Main Account:     {:>12}\n",
        state.main_account.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Vault Balance:    {:>12}\n",
        state.vault_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Daily Allocation: {:>12}\n",
        state.daily_allocation.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Carry-Over:       {:>12}\n",
        state.carry_over.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Remaining Days:   {:>12}\n", state.remaining_days));

    let last = state
        .last_withdrawal
        .map(|d| d.format(&settings.date_format).to_string())
        .unwrap_or_else(|| "Never".to_string());
    output.push_str(&format!("  Last Withdrawal:  {:>12}\n", last));

    output
}

/// Extra lines for a release that covered more than one day or closed the cycle
pub fn format_release_details(release: &Release) -> String {
    let mut output = String::new();

    if release.days_missed > 0 {
        output.push_str(&format!(
            "  Caught up {} missed day(s); {} day(s) of allocation released.\n",
            release.days_missed, release.days_accounted
        ));
    }

    if release.cycle_closed {
        output.push_str("  Budget cycle complete.\n");
    }

    output
}
