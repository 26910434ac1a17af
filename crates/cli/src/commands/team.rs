// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rp team`

use anyhow::Result;
use clap::Subcommand;
use rp_core::{NewTeam, TeamCategory, TeamId};

use crate::client::DaemonClient;
use crate::output::{self, OutputFormat};

#[derive(clap::Args)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Subcommand)]
pub enum TeamCommand {
    /// Create a team
    Add {
        name: String,
        /// rescue, logistics, management or external
        #[arg(long)]
        category: TeamCategory,
    },
    /// Delete a team nobody belongs to
    Rm { id: u64 },
    /// List teams
    List,
}

pub async fn handle(command: TeamCommand, client: &DaemonClient, format: OutputFormat) -> Result<()> {
    match command {
        TeamCommand::Add { name, category } => {
            let team = client.create_team(NewTeam { name, category }).await?;
            output::print(&team, format, |t| format!("Created team #{} {}", t.id, t.name));
        }
        TeamCommand::Rm { id } => {
            let team = client.delete_team(TeamId(id)).await?;
            output::print(&team, format, |t| format!("Deleted team #{} {}", t.id, t.name));
        }
        TeamCommand::List => {
            let teams = client.list_teams().await?;
            output::print_list(
                &teams,
                format,
                "No teams",
                &format!("{:<5} {:<30} CATEGORY", "ID", "NAME"),
                |t| format!("{:<5} {:<30} {}", t.id, output::clip(&t.name, 30), t.category),
            );
        }
    }
    Ok(())
}
