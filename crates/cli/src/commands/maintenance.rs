// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rp maintenance`: send radios to the bench and back

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use rp_core::{MaintenanceEpisode, MaintenanceId, NewMaintenance};
use rp_daemon::AssetRef;

use super::HistoryArgs;
use crate::client::DaemonClient;
use crate::output::{self, OutputFormat};

#[derive(clap::Args)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub command: MaintenanceCommand,
}

#[derive(Subcommand)]
pub enum MaintenanceCommand {
    /// Take a radio out of service
    Start {
        /// Radio code or id
        asset: AssetRef,
        #[arg(long)]
        description: String,
        #[arg(long)]
        operator: String,
    },
    /// Put a radio back in service
    End { id: u64 },
    Show { id: u64 },
    /// Maintenance history, newest first
    List {
        #[command(flatten)]
        history: HistoryArgs,
    },
}

pub async fn handle(
    command: MaintenanceCommand,
    client: &DaemonClient,
    format: OutputFormat,
) -> Result<()> {
    match command {
        MaintenanceCommand::Start {
            asset,
            description,
            operator,
        } => {
            let episode = client
                .start_maintenance(asset, NewMaintenance::new(description, operator))
                .await?;
            output::print(&episode, format, |m| {
                format!("Maintenance #{} opened on radio #{}", m.id, m.asset_id)
            });
        }
        MaintenanceCommand::End { id } => {
            let episode = client.end_maintenance(MaintenanceId(id)).await?;
            output::print(&episode, format, |m| {
                format!(
                    "Maintenance #{} closed after {}",
                    m.id,
                    output::duration(m.duration(Utc::now()))
                )
            });
        }
        MaintenanceCommand::Show { id } => {
            let episode = client.get_maintenance(MaintenanceId(id)).await?;
            output::print(&episode, format, render);
        }
        MaintenanceCommand::List { history } => {
            let filter = history.filter(client).await?;
            let episodes = client.maintenance_history(filter).await?;
            output::print_list(
                &episodes,
                format,
                "No maintenance",
                &format!(
                    "{:<6} {:<7} {:<17} {:<17} {:<14} DESCRIPTION",
                    "ID", "RADIO", "STARTED", "ENDED", "OPERATOR"
                ),
                row,
            );
        }
    }
    Ok(())
}

fn row(episode: &MaintenanceEpisode) -> String {
    format!(
        "{:<6} {:<7} {:<17} {:<17} {:<14} {}",
        episode.id,
        episode.asset_id,
        output::time(episode.started_at),
        episode
            .ended_at
            .map_or_else(|| "open".to_string(), output::time),
        output::clip(&episode.operator, 14),
        episode.description,
    )
}

fn render(episode: &MaintenanceEpisode) -> String {
    format!(
        "Maintenance #{}\n  Radio: #{}\n  Operator: {}\n  Description: {}\n  Started: {}\n  Ended: {}\n  Duration: {}",
        episode.id,
        episode.asset_id,
        episode.operator,
        episode.description,
        output::time(episode.started_at),
        episode
            .ended_at
            .map_or_else(|| "(open)".to_string(), output::time),
        output::duration(episode.duration(Utc::now())),
    )
}
