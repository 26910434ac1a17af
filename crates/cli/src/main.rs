// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rp - Radio Pool CLI

mod client;
mod commands;
mod completions;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{asset, center, daemon, loan, maintenance, person, stats, team};
use rp_daemon::Config;
use tracing_subscriber::EnvFilter;

use crate::client::{find_data_dir, ClientError, DaemonClient};
use crate::completions::CompletionsArgs;
use crate::error::RpError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "rp",
    version,
    about = "Radio Pool - lending and maintenance ledger for handheld radios"
)]
struct Cli {
    /// Ledger data directory (defaults to RP_DATA_DIR or the nearest rp.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Radio inventory
    Asset(asset::AssetArgs),
    /// Borrowers
    Person(person::PersonArgs),
    /// Teams
    Team(team::TeamArgs),
    /// Training centers
    Center(center::CenterArgs),
    /// Lend and return radios
    Loan(loan::LoanArgs),
    /// Maintenance episodes
    Maintenance(maintenance::MaintenanceArgs),
    /// Usage statistics
    Stats(stats::StatsArgs),
    /// Daemon management
    Daemon(daemon::DaemonArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions(args) = cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let data_dir = cli.data_dir.map_or_else(find_data_dir, Ok)?;
    let config = Config::for_data_dir(&data_dir)?;
    let format = cli.output;

    // Daemon management talks to the daemon on its own terms
    if let Commands::Daemon(args) = cli.command {
        return daemon::daemon(args, &config, format).await;
    }

    let client = DaemonClient::connect_or_start(&config).await?;

    match cli.command {
        Commands::Asset(args) => asset::handle(args.command, &client, format).await,
        Commands::Person(args) => person::handle(args.command, &client, format).await,
        Commands::Team(args) => team::handle(args.command, &client, format).await,
        Commands::Center(args) => center::handle(args.command, &client, format).await,
        Commands::Loan(args) => loan::handle(args.command, &client, format).await,
        Commands::Maintenance(args) => maintenance::handle(args.command, &client, format).await,
        Commands::Stats(args) => stats::handle(args, &client, format).await,
        Commands::Daemon(_) | Commands::Completions(_) => unreachable!(),
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Rejected { kind, message }) => {
            eprint!("{}", RpError::rejected(*kind, message));
        }
        Some(ClientError::DaemonStartFailed(reason)) => {
            eprint!("{}", RpError::daemon_start_failed(reason));
        }
        _ => eprintln!("error: {:#}", err),
    }
}
