use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_vault::cli::{handle_vault_command, VaultCommands};
use budget_vault::config::{paths::VaultPaths, settings::Settings};
use budget_vault::services::VaultService;
use budget_vault::storage::{json_file_valid, StateStore, Storage};

#[derive(Parser)]
#[command(
    name = "vault",
    version,
    about = "Terminal budget vault with a daily allowance",
    long_about = "Budget Vault moves money from your main account into a vault and \
                  releases a fixed daily allowance from it. Skip a day and the next \
                  release catches up; take less than offered and the rest carries over."
)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Vault(VaultCommands),

    /// Write default settings and an empty vault record
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "budget_vault=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = VaultPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths, &settings)?;

    match cli.command {
        Some(Commands::Vault(cmd)) => {
            let service =
                VaultService::new(storage.vault).with_currency_symbol(&settings.currency_symbol);
            handle_vault_command(&service, &settings, cmd, cli.json)?;
        }
        Some(Commands::Init) => {
            let paths = storage.paths();
            println!("Initializing Budget Vault at: {}", paths.base_dir().display());
            settings.save(paths)?;
            if !storage.vault.exists() {
                storage.vault.save(&storage.vault.load())?;
            }
            println!("Initialization complete!");
            println!(
                "Main account starts at {}.",
                settings.starting_balance.format_with_symbol(&settings.currency_symbol)
            );
            println!("Run 'vault transfer <AMOUNT> <DAYS>' to start a budget cycle.");
        }
        Some(Commands::Config) => {
            let paths = storage.paths();
            let vault_file = paths.vault_file();
            let record_status = if !vault_file.exists() {
                "not created"
            } else if json_file_valid(&vault_file) {
                "ok"
            } else {
                "unreadable (defaults in use)"
            };

            println!("Budget Vault Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Vault record:     {} ({})", vault_file.display(), record_status);
            println!();
            println!("Settings:");
            println!(
                "  Starting balance: {}",
                settings.starting_balance.format_with_symbol(&settings.currency_symbol)
            );
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
        }
        None => {
            println!("Budget Vault - a daily allowance from a time-boxed fund");
            println!();
            println!("Run 'vault --help' for usage information.");
            println!("Run 'vault balance' to see where things stand.");
        }
    }

    Ok(())
}
