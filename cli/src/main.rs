//! Eco Bonus CLI - talk to the rewards API from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show (or create) this device's anonymous user id
//! ecobonus whoami
//!
//! # Check points and recent returns
//! ecobonus balance
//! ecobonus history
//!
//! # Register a return by SKU or scanned barcode
//! ecobonus scan PET_BOTTLE_500ML
//!
//! # Check that every endpoint answers
//! ecobonus smoke
//! ```
//!
//! Configuration comes from the environment (or `.env`):
//! `ECOBONUS_API_BASE_URL`, `ECOBONUS_TIMEOUT_SECS`, `ECOBONUS_STATE_FILE`.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use ecobonus_core::{ClientConfig, RewardsApi};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ecobonus")]
#[command(author, version, about = "Eco Bonus rewards CLI")]
struct Cli {
    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Show demo data instead of failing when the API is unreachable
    #[arg(long, global = true)]
    demo_fallback: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current anonymous user id, creating one if needed
    Whoami,
    /// Replace the stored user id
    Login {
        /// User id to store
        user_id: String,
    },
    /// Forget the stored user id
    Logout,
    /// Show the point balance
    Balance,
    /// Show past returns
    History,
    /// List scannable items
    Catalog,
    /// List catalogue items as display cards
    Products,
    /// List participating stores
    Locations,
    /// Register a return for a SKU or barcode
    Scan {
        /// SKU or decoded barcode text
        code: String,
    },
    /// Exercise every endpoint and report which ones answer
    Smoke,
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    let api = RewardsApi::from_config(&config);
    let fallback = cli.demo_fallback;

    match cli.command {
        Commands::Whoami => commands::identity::whoami(&api)?,
        Commands::Login { user_id } => commands::identity::login(&api, &user_id)?,
        Commands::Logout => commands::identity::logout(&api)?,
        Commands::Balance => commands::query::balance(&api, fallback)?,
        Commands::History => commands::query::history(&api, fallback)?,
        Commands::Catalog => commands::query::catalog(&api)?,
        Commands::Products => commands::query::products(&api, fallback)?,
        Commands::Locations => commands::query::locations(&api, fallback)?,
        Commands::Scan { code } => commands::query::scan(&api, &code, fallback)?,
        Commands::Smoke => commands::smoke::run(&api)?,
    }
    Ok(())
}
