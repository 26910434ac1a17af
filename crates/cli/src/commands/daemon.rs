// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rp daemon`: manage the ledger daemon for a data directory

use std::process::Command;

use anyhow::{bail, Result};
use clap::Subcommand;
use rp_daemon::Config;
use rp_engine::EngineStatus;

use crate::client::{self, ClientError, DaemonClient};
use crate::output::{self, OutputFormat};

#[derive(clap::Args)]
pub struct DaemonArgs {
    #[command(subcommand)]
    pub command: DaemonCommand,
}

#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon
    Start {
        /// Run in the foreground instead of detaching
        #[arg(long)]
        foreground: bool,
    },
    /// Stop the daemon
    Stop,
    /// Show daemon status
    Status,
    /// Show the daemon log
    Logs {
        /// Number of trailing lines
        #[arg(short = 'n', long, default_value_t = 50)]
        lines: usize,
    },
}

pub async fn daemon(args: DaemonArgs, config: &Config, format: OutputFormat) -> Result<()> {
    match args.command {
        DaemonCommand::Start { foreground } => start(config, foreground).await,
        DaemonCommand::Stop => {
            if client::daemon_stop(config).await? {
                println!("Daemon stopped");
            } else {
                println!("Daemon not running");
            }
            Ok(())
        }
        DaemonCommand::Status => status(config, format).await,
        DaemonCommand::Logs { lines } => logs(config, lines),
    }
}

async fn start(config: &Config, foreground: bool) -> Result<()> {
    if foreground {
        let rpd = client::find_rpd_binary();
        let status = Command::new(&rpd).arg(&config.data_dir).status()?;
        if !status.success() {
            bail!("{} exited with {}", rpd.display(), status);
        }
        return Ok(());
    }

    if let Ok(client) = DaemonClient::connect(config) {
        if let Ok(version) = client.hello().await {
            println!("Daemon already running (v{})", version);
            return Ok(());
        }
    }

    let client = DaemonClient::connect_or_start(config).await?;
    let version = client.hello().await?;
    println!("Daemon started (v{})", version);
    Ok(())
}

async fn status(config: &Config, format: OutputFormat) -> Result<()> {
    let client = match DaemonClient::connect(config) {
        Ok(client) => client,
        Err(ClientError::DaemonNotRunning) => {
            println!("Daemon not running");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let status = match client.status().await {
        Ok(status) => status,
        Err(ClientError::Io(_)) => {
            println!("Daemon not responding (stale socket at {})", config.socket_path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let pid = client::read_daemon_pid(config);
    output::print(&status, format, |s| render(s, config, pid));
    Ok(())
}

fn render(status: &EngineStatus, config: &Config, pid: Option<u32>) -> String {
    let uptime = chrono::Duration::seconds(status.uptime_secs as i64);
    let mut out = String::from("Daemon running\n");
    if let Some(pid) = pid {
        out.push_str(&format!("  PID: {}\n", pid));
    }
    out.push_str(&format!("  Data: {}\n", config.data_dir.display()));
    out.push_str(&format!("  Uptime: {}\n", output::duration(uptime)));
    out.push_str(&format!(
        "  Radios: {}  People: {}  Teams: {}  Centers: {}\n",
        status.assets, status.people, status.teams, status.centers
    ));
    out.push_str(&format!(
        "  Open loans: {}  Open maintenance: {}\n",
        status.open_loans, status.open_maintenance
    ));
    out.push_str(&format!("  WAL sequence: {}", status.wal_sequence));
    out
}

fn logs(config: &Config, lines: usize) -> Result<()> {
    let content = match std::fs::read_to_string(&config.log_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("No log at {}", config.log_path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    for line in tail(&content, lines) {
        println!("{}", line);
    }
    Ok(())
}

fn tail(content: &str, lines: usize) -> Vec<&str> {
    let all: Vec<&str> = content.lines().collect();
    all[all.len().saturating_sub(lines)..].to_vec()
}
