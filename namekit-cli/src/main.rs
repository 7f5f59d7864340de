//! Namekit CLI
//!
//! Command-line interface for pricing names and rehearsing registry flows offline.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "namekit")]
#[command(about = "Namekit CLI - Price, validate and simulate emoji namespace leases", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a name is valid and show its units and id
    Validate {
        /// Name text, e.g. "🐻ooga"
        text: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Price a lease
    Quote {
        /// Name text
        text: String,

        /// Lease length in years
        #[arg(short, long, default_value = "1")]
        years: u32,

        /// USD value of one native unit
        #[arg(long, default_value = "1")]
        usd_per_unit: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a scripted mint, auction and expiry lifecycle in memory
    Simulate {
        /// Unix timestamp the simulated clock starts at
        #[arg(long, default_value = "1700000000")]
        start: i64,

        /// USD value of one native unit
        #[arg(long, default_value = "1")]
        usd_per_unit: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("namekit_cli=debug,namekit_lib=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("namekit_cli=info,namekit_lib=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = commands::load_config(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Validate { text, json } => {
            commands::validate::run(&config, &text, json)?;
        }
        Commands::Quote {
            text,
            years,
            usd_per_unit,
            json,
        } => {
            commands::quote::run(&config, &text, years, &usd_per_unit, json)?;
        }
        Commands::Simulate {
            start,
            usd_per_unit,
            json,
        } => {
            commands::simulate::run(config, start, &usd_per_unit, json)?;
        }
        Commands::Config => {
            commands::config::run(&config)?;
        }
    }

    Ok(())
}
