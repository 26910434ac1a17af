// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rp center`: training centers

use anyhow::Result;
use clap::Subcommand;
use rp_core::{CenterId, NewCenter};

use crate::client::DaemonClient;
use crate::output::{self, OutputFormat};

#[derive(clap::Args)]
pub struct CenterArgs {
    #[command(subcommand)]
    pub command: CenterCommand,
}

#[derive(Subcommand)]
pub enum CenterCommand {
    /// Create a training center
    Add {
        name: String,
        #[arg(long)]
        manager: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a training center nobody is attached to
    Rm { id: u64 },
    /// List training centers
    List,
}

pub async fn handle(command: CenterCommand, client: &DaemonClient, format: OutputFormat) -> Result<()> {
    match command {
        CenterCommand::Add {
            name,
            manager,
            address,
            phone,
            email,
        } => {
            let center = NewCenter {
                address,
                phone,
                email,
                ..NewCenter::new(name, manager)
            };
            let center = client.create_center(center).await?;
            output::print(&center, format, |c| {
                format!("Created training center #{} {}", c.id, c.name)
            });
        }
        CenterCommand::Rm { id } => {
            let center = client.delete_center(CenterId(id)).await?;
            output::print(&center, format, |c| {
                format!("Deleted training center #{} {}", c.id, c.name)
            });
        }
        CenterCommand::List => {
            let centers = client.list_centers().await?;
            output::print_list(
                &centers,
                format,
                "No training centers",
                &format!("{:<5} {:<24} {:<20} CONTACT", "ID", "NAME", "MANAGER"),
                |c| {
                    format!(
                        "{:<5} {:<24} {:<20} {}",
                        c.id,
                        output::clip(&c.name, 24),
                        output::clip(&c.manager, 20),
                        output::or_dash(c.phone.as_deref().or(c.email.as_deref())),
                    )
                },
            );
        }
    }
    Ok(())
}
