// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rp loan`: lend and return radios

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use rp_core::{Accessories, LoanEpisode, LoanId};
use rp_daemon::{AssetRef, PersonRef};

use super::HistoryArgs;
use crate::client::DaemonClient;
use crate::output::{self, OutputFormat};

#[derive(clap::Args)]
pub struct LoanArgs {
    #[command(subcommand)]
    pub command: LoanCommand,
}

#[derive(Subcommand)]
pub enum LoanCommand {
    /// Lend a radio to a person
    Start {
        /// Radio code or id
        asset: AssetRef,
        /// Person code or id
        person: PersonRef,
        /// none, earpiece, mic or both
        #[arg(long, default_value = "none")]
        accessories: Accessories,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Return a radio
    End {
        id: u64,
        /// Replaces the loan comment
        #[arg(long)]
        comment: Option<String>,
    },
    /// Replace the comment of a loan; omit the text to clear it
    Comment { id: u64, text: Option<String> },
    Show { id: u64 },
    /// Loan history, newest first
    List {
        #[command(flatten)]
        history: HistoryArgs,
        /// Only loans to this person (code or id)
        #[arg(long)]
        person: Option<PersonRef>,
    },
}

pub async fn handle(command: LoanCommand, client: &DaemonClient, format: OutputFormat) -> Result<()> {
    match command {
        LoanCommand::Start {
            asset,
            person,
            accessories,
            comment,
        } => {
            let loan = client
                .start_loan(asset, person, accessories, comment)
                .await?;
            output::print(&loan, format, |l| {
                format!("Loan #{} opened: radio #{} to person #{}", l.id, l.asset_id, l.person_id)
            });
        }
        LoanCommand::End { id, comment } => {
            let loan = client.end_loan(LoanId(id), comment).await?;
            output::print(&loan, format, |l| {
                let held = l
                    .returned_at
                    .map(|at| output::duration(at - l.borrowed_at))
                    .unwrap_or_default();
                format!("Loan #{} closed after {}", l.id, held)
            });
        }
        LoanCommand::Comment { id, text } => {
            let loan = client.set_loan_comment(LoanId(id), text).await?;
            output::print(&loan, format, |l| format!("Loan #{} comment updated", l.id));
        }
        LoanCommand::Show { id } => {
            let loan = client.get_loan(LoanId(id)).await?;
            output::print(&loan, format, render);
        }
        LoanCommand::List { history, person } => {
            let mut filter = history.filter(client).await?;
            if let Some(person) = person {
                filter.person_id = Some(client.resolve_person(person).await?);
            }
            let loans = client.loan_history(filter).await?;
            output::print_list(
                &loans,
                format,
                "No loans",
                &format!(
                    "{:<6} {:<7} {:<7} {:<17} {:<17} {:<9} COMMENT",
                    "ID", "RADIO", "PERSON", "BORROWED", "RETURNED", "KIT"
                ),
                row,
            );
        }
    }
    Ok(())
}

fn row(loan: &LoanEpisode) -> String {
    format!(
        "{:<6} {:<7} {:<7} {:<17} {:<17} {:<9} {}",
        loan.id,
        loan.asset_id,
        loan.person_id,
        output::time(loan.borrowed_at),
        loan.returned_at
            .map_or_else(|| "open".to_string(), output::time),
        loan.accessories,
        output::or_dash(loan.comment.as_deref()),
    )
}

fn render(loan: &LoanEpisode) -> String {
    let mut out = format!(
        "Loan #{}\n  Radio: #{}\n  Person: #{}\n  Accessories: {}\n  Borrowed: {}\n",
        loan.id,
        loan.asset_id,
        loan.person_id,
        loan.accessories,
        output::time(loan.borrowed_at)
    );
    match loan.returned_at {
        Some(at) => out.push_str(&format!("  Returned: {}\n", output::time(at))),
        None => out.push_str("  Returned: (open)\n"),
    }
    out.push_str(&format!(
        "  Duration: {}",
        output::duration(loan.duration(Utc::now()))
    ));
    if let Some(comment) = &loan.comment {
        out.push_str(&format!("\n  Comment: {}", comment));
    }
    out
}
