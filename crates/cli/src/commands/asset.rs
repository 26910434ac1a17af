// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rp asset`: register, edit and inspect radios

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use rp_core::{Asset, AssetAttributes, AssetPatch, AssetState, Field};
use rp_daemon::{AssetDetail, AssetRef};

use crate::client::DaemonClient;
use crate::output::{self, OutputFormat};

#[derive(clap::Args)]
pub struct AssetArgs {
    #[command(subcommand)]
    pub command: AssetCommand,
}

#[derive(Subcommand)]
pub enum AssetCommand {
    /// Register a radio under the next RAD- code
    Add {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        serial: Option<String>,
        #[arg(long)]
        geolocatable: bool,
    },
    /// Change a radio's descriptive attributes
    Edit {
        /// Radio code or id
        asset: AssetRef,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long, conflicts_with = "clear_serial")]
        serial: Option<String>,
        /// Remove the serial number
        #[arg(long)]
        clear_serial: bool,
        #[arg(long)]
        geolocatable: Option<bool>,
    },
    /// Delete a radio that has never been lent or serviced
    Rm {
        asset: AssetRef,
    },
    /// Show a radio with its current loan or maintenance
    Show {
        asset: AssetRef,
    },
    /// List radios
    List {
        #[arg(long, value_enum)]
        state: Option<StateArg>,
    },
    /// Print a radio's lifecycle state
    State {
        asset: AssetRef,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StateArg {
    Available,
    OnLoan,
    InMaintenance,
}

impl From<StateArg> for AssetState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Available => AssetState::Available,
            StateArg::OnLoan => AssetState::OnLoan,
            StateArg::InMaintenance => AssetState::InMaintenance,
        }
    }
}

pub async fn handle(command: AssetCommand, client: &DaemonClient, format: OutputFormat) -> Result<()> {
    match command {
        AssetCommand::Add {
            brand,
            model,
            serial,
            geolocatable,
        } => {
            let mut attributes = AssetAttributes::new(brand, model).geolocatable(geolocatable);
            attributes.serial = serial;
            let asset = client.create_asset(attributes).await?;
            output::print(&asset, format, |a| format!("Registered {} ({})", a.code, a.label()));
        }

        AssetCommand::Edit {
            asset,
            brand,
            model,
            serial,
            clear_serial,
            geolocatable,
        } => {
            let patch = AssetPatch {
                brand: brand.into(),
                model: model.into(),
                serial: if clear_serial {
                    Field::Set(None)
                } else {
                    serial.map(Some).into()
                },
                geolocatable: geolocatable.into(),
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to change; pass at least one attribute");
            }
            let asset = client.update_asset(asset, patch).await?;
            output::print(&asset, format, |a| format!("Updated {}", a.code));
        }

        AssetCommand::Rm { asset } => {
            let asset = client.delete_asset(asset).await?;
            output::print(&asset, format, |a| format!("Deleted {}", a.code));
        }

        AssetCommand::Show { asset } => {
            let detail = client.get_asset(asset).await?;
            output::print(&detail, format, render_detail);
        }

        AssetCommand::List { state } => {
            let assets = client.list_assets(state.map(AssetState::from)).await?;
            output::print_list(
                &assets,
                format,
                "No radios",
                &format!(
                    "{:<10} {:<14} {:<14} {:<16} {:<4} MAINT",
                    "CODE", "BRAND", "MODEL", "SERIAL", "GEO"
                ),
                row,
            );
        }

        AssetCommand::State { asset } => {
            let (code, state) = client.asset_state(asset).await?;
            output::print(
                &serde_json::json!({ "code": code, "state": state }),
                format,
                |_| format!("{} {}", code, state),
            );
        }
    }
    Ok(())
}

fn row(asset: &Asset) -> String {
    format!(
        "{:<10} {:<14} {:<14} {:<16} {:<4} {}",
        asset.code,
        output::clip(&asset.brand, 14),
        output::clip(&asset.model, 14),
        output::clip(output::or_dash(asset.serial.as_deref()), 16),
        if asset.geolocatable { "yes" } else { "no" },
        if asset.in_maintenance() { "yes" } else { "no" },
    )
}

fn render_detail(detail: &AssetDetail) -> String {
    let asset = &detail.asset;
    let mut out = format!("{}  {}\n", asset.code, asset.label());
    out.push_str(&format!("  State: {}\n", detail.state));
    out.push_str(&format!(
        "  Serial: {}\n",
        output::or_dash(asset.serial.as_deref())
    ));
    out.push_str(&format!(
        "  Geolocatable: {}\n",
        if asset.geolocatable { "yes" } else { "no" }
    ));
    if let Some(loan) = &detail.loan {
        out.push_str(&format!(
            "  Loan: #{} to person #{} since {}\n",
            loan.id,
            loan.person_id,
            output::time(loan.borrowed_at)
        ));
    }
    if let Some(episode) = &detail.maintenance {
        out.push_str(&format!(
            "  Maintenance: #{} {} ({}) since {}\n",
            episode.id,
            episode.description,
            episode.operator,
            output::time(episode.started_at)
        ));
    }
    out.push_str(&format!("  Registered: {}", output::time(asset.created_at)));
    out
}
