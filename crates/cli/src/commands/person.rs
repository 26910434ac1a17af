// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rp person`: people who borrow radios

use anyhow::Result;
use clap::Subcommand;
use rp_core::{CenterId, Field, NewPerson, Person, PersonPatch, TeamId};
use rp_daemon::{PersonDetail, PersonRef};
use rp_engine::PersonFilter;

use crate::client::DaemonClient;
use crate::output::{self, OutputFormat};

#[derive(clap::Args)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommand,
}

#[derive(Subcommand)]
pub enum PersonCommand {
    /// Register a person under the next USR- code
    Add {
        last_name: String,
        first_name: String,
        /// Team id
        #[arg(long)]
        team: Option<u64>,
        /// Training center id
        #[arg(long)]
        center: Option<u64>,
    },
    /// Change a person's name or affiliations
    Edit {
        /// Person code or id
        person: PersonRef,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long, conflicts_with = "no_team")]
        team: Option<u64>,
        /// Detach from any team
        #[arg(long)]
        no_team: bool,
        #[arg(long, conflicts_with = "no_center")]
        center: Option<u64>,
        /// Detach from any training center
        #[arg(long)]
        no_center: bool,
    },
    /// Delete a person who never borrowed a radio
    Rm {
        person: PersonRef,
    },
    /// Show a person with the radios they currently hold
    Show {
        person: PersonRef,
    },
    /// List people, sorted by name
    List {
        #[arg(long)]
        team: Option<u64>,
        #[arg(long)]
        center: Option<u64>,
    },
}

/// `--x ID` sets, `--no-x` clears, neither leaves the value alone
fn affiliation<I: From<u64>>(value: Option<u64>, clear: bool) -> Field<Option<I>> {
    match (value, clear) {
        (_, true) => Field::Set(None),
        (Some(id), false) => Field::Set(Some(I::from(id))),
        (None, false) => Field::Unset,
    }
}

pub async fn handle(command: PersonCommand, client: &DaemonClient, format: OutputFormat) -> Result<()> {
    match command {
        PersonCommand::Add {
            last_name,
            first_name,
            team,
            center,
        } => {
            let mut person = NewPerson::new(last_name, first_name);
            person.team_id = team.map(TeamId);
            person.center_id = center.map(CenterId);
            let person = client.create_person(person).await?;
            output::print(&person, format, |p| {
                format!("Registered {} ({})", p.code, p.full_name())
            });
        }

        PersonCommand::Edit {
            person,
            last_name,
            first_name,
            team,
            no_team,
            center,
            no_center,
        } => {
            let patch = PersonPatch {
                last_name: last_name.into(),
                first_name: first_name.into(),
                team_id: affiliation(team, no_team),
                center_id: affiliation(center, no_center),
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to change; pass at least one field");
            }
            let person = client.update_person(person, patch).await?;
            output::print(&person, format, |p| format!("Updated {}", p.code));
        }

        PersonCommand::Rm { person } => {
            let person = client.delete_person(person).await?;
            output::print(&person, format, |p| format!("Deleted {}", p.code));
        }

        PersonCommand::Show { person } => {
            let detail = client.get_person(person).await?;
            output::print(&detail, format, render_detail);
        }

        PersonCommand::List { team, center } => {
            let people = client
                .list_people(PersonFilter {
                    team_id: team.map(TeamId),
                    center_id: center.map(CenterId),
                })
                .await?;
            output::print_list(
                &people,
                format,
                "No people",
                &format!("{:<10} {:<30} {:<6} CENTER", "CODE", "NAME", "TEAM"),
                row,
            );
        }
    }
    Ok(())
}

fn row(person: &Person) -> String {
    format!(
        "{:<10} {:<30} {:<6} {}",
        person.code,
        output::clip(&person.full_name(), 30),
        person.team_id.map_or("-".to_string(), |t| t.to_string()),
        person.center_id.map_or("-".to_string(), |c| c.to_string()),
    )
}

fn render_detail(detail: &PersonDetail) -> String {
    let person = &detail.person;
    let mut out = format!("{}  {}\n", person.code, person.full_name());
    if let Some(team) = person.team_id {
        out.push_str(&format!("  Team: #{}\n", team));
    }
    if let Some(center) = person.center_id {
        out.push_str(&format!("  Training center: #{}\n", center));
    }
    if detail.active_loans.is_empty() {
        out.push_str("  Holding: nothing");
    } else {
        out.push_str("  Holding:");
        for loan in &detail.active_loans {
            out.push_str(&format!(
                "\n    loan #{} radio #{} since {}",
                loan.id,
                loan.asset_id,
                output::time(loan.borrowed_at)
            ));
        }
    }
    out
}
