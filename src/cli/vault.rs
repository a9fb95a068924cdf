//! Vault CLI commands
//!
//! Bridges clap argument parsing with the vault service.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::vault::{format_release_details, format_vault_state};
use crate::error::{VaultError, VaultResult};
use crate::export::{export_state_json, export_state_yaml};
use crate::models::{Money, Percentage};
use crate::services::{Clock, Outcome, Transition, VaultService};
use crate::storage::StateStore;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}

/// Vault subcommands
#[derive(Subcommand)]
pub enum VaultCommands {
    /// Move funds from the main account into the vault and start a cycle
    Transfer {
        /// Amount to move (e.g., "1000.00" or "1000")
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Number of days to spread it over
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
    /// Release today's allocation, including any missed days
    Release {
        /// Share of the available funds to take now (0-100]
        #[arg(short, long, default_value = "100")]
        percentage: String,
        /// Release as of this date instead of today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Return everything left in the vault to the main account
    #[command(alias = "withdraw-remaining")]
    Withdraw,
    /// Show the vault and main account balances
    #[command(alias = "status")]
    Balance,
    /// Export the vault record
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_amount(amount: &str) -> VaultResult<Money> {
    Money::parse(amount).map_err(|e| {
        VaultError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '100.00' or '100'. Error: {}",
            amount, e
        ))
    })
}

fn parse_date(date: &str) -> VaultResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        VaultError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", date))
    })
}

/// Handle a vault command
///
/// With `json` set, operation results are printed as an `OperationResponse`
/// and rule rejections are reported in the body rather than as errors.
pub fn handle_vault_command<S: StateStore, C: Clock>(
    service: &VaultService<S, C>,
    settings: &Settings,
    cmd: VaultCommands,
    json: bool,
) -> VaultResult<()> {
    match cmd {
        VaultCommands::Transfer { amount, days } => {
            let result = parse_amount(&amount).and_then(|amount| service.try_transfer(amount, days));
            report(service, result, false, json)
        }

        VaultCommands::Release { percentage, date } => {
            let result = Percentage::parse(&percentage).and_then(|percentage| match date {
                Some(date) => service.try_release_on(percentage, parse_date(&date)?),
                None => service.try_release(percentage),
            });
            report(service, result, true, json)
        }

        VaultCommands::Withdraw => report(service, service.try_withdraw_all(), true, json),

        VaultCommands::Balance => {
            let state = service.get_balance();
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                print!("{}", format_vault_state(&state, settings));
            }
            Ok(())
        }

        VaultCommands::Export { format, output } => {
            let state = service.get_balance();
            let mut writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(File::create(path).map_err(|e| {
                    VaultError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?),
                None => Box::new(io::stdout()),
            };

            match format {
                ExportFormat::Json => {
                    export_state_json(&state, &mut writer, true)?;
                    writeln!(writer).map_err(|e| VaultError::Export(e.to_string()))?;
                }
                ExportFormat::Yaml => export_state_yaml(&state, &mut writer)?,
            }

            if let Some(path) = output {
                println!("Exported vault to {}", path.display());
            }
            Ok(())
        }
    }
}

fn report<S: StateStore, C: Clock>(
    service: &VaultService<S, C>,
    result: VaultResult<Transition>,
    include_state: bool,
    json: bool,
) -> VaultResult<()> {
    if json {
        let mut response = service.respond(result);
        if include_state {
            response = response.with_data(service.get_balance());
        }
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let transition = result?;
    println!("{}", service.describe(&transition.outcome));
    if let Outcome::Released(release) = &transition.outcome {
        print!("{}", format_release_details(release));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5").unwrap(), Money::from_cents(1250));
        assert!(matches!(parse_amount("twelve"), Err(VaultError::Validation(_))));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(matches!(parse_date("28/02/2025"), Err(VaultError::Validation(_))));
    }
}
