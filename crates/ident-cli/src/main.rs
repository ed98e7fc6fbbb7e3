//! ident command-line tool
//!
//! Inspects values described by JSON fixtures and prints help reports:
//! canonical name, type, and one line per member or callable signature.
//!
//! Logging goes to stderr and is controlled by `IDENT_LOG`
//! (e.g. `IDENT_LOG=ident_core=debug`).

use clap::{Parser, Subcommand};
use ident_cli::commands::{config, inspect};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ident")]
#[command(about = "Inspect values and recover callable signatures", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the help report of a value fixture
    Inspect {
        /// JSON fixture file
        file: PathBuf,
        /// Config file (defaults to ./ident.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Hide members common to every foreign base object
        #[arg(long)]
        hide_common: bool,
        /// Levels of nested members to expand
        #[arg(long)]
        max_depth: Option<usize>,
        /// Colorize output
        #[arg(long, value_parser = ["auto", "always", "never"])]
        color: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Config file (defaults to ./ident.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("IDENT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Inspect {
            file,
            config,
            hide_common,
            max_depth,
            color,
        } => inspect::execute(inspect::InspectArgs {
            file,
            config,
            hide_common,
            max_depth,
            color,
        }),
        Commands::Config { config: path } => config::execute(path),
    }
}
