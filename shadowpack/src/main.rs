mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "shadowpack")]
#[command(about = "Shadow-tree generator for deeply nested monorepo packages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory of the installed distribution package.
    #[arg(long, default_value = ".")]
    install_root: PathBuf,

    /// Scope under which the internal packages are published.
    #[arg(long, default_value = "@stdlib")]
    scope: String,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the shadow tree and reconcile the root descriptor.
    Build {
        #[arg(long, action)]
        dry_run: bool,
    },
    /// Undo a previous build from its change ledger.
    Revert {
        #[arg(long, action)]
        dry_run: bool,
    },
    /// List discovered internal packages.
    Scan {
        #[arg(long, action)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    let env_dry_run = std::env::var_os("SHADOWPACK_DRY_RUN")
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false);

    match cli.command {
        Commands::Build { dry_run } => {
            commands::cmd_build(cli.install_root, cli.scope, dry_run || env_dry_run)?
        }
        Commands::Revert { dry_run } => {
            commands::cmd_revert(cli.install_root, cli.scope, dry_run || env_dry_run)?
        }
        Commands::Scan { json } => commands::cmd_scan(cli.install_root, cli.scope, json)?,
    }

    Ok(())
}
