// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rp stats`: fleet usage summary

use anyhow::Result;
use rp_daemon::StatsReport;
use rp_engine::{MAINTENANCE_WINDOW_DAYS, OVERDUE_AFTER_DAYS};

use crate::client::DaemonClient;
use crate::output::{self, OutputFormat};

#[derive(clap::Args)]
pub struct StatsArgs {
    /// Length of the most-borrowed lists
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

pub async fn handle(args: StatsArgs, client: &DaemonClient, format: OutputFormat) -> Result<()> {
    let report = client.stats(args.top).await?;
    output::print(&report, format, render);
    Ok(())
}

fn hours(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |h| format!("{:.1}h", h))
}

fn render(report: &StatsReport) -> String {
    let mut out = String::new();
    out.push_str("Loans\n");
    out.push_str(&format!("  Total: {}\n", report.loans.total));
    out.push_str(&format!("  Active: {}\n", report.loans.active));
    out.push_str(&format!(
        "  Overdue (> {} days): {}\n",
        OVERDUE_AFTER_DAYS, report.loans.overdue
    ));
    out.push_str(&format!(
        "  Mean duration: {}\n",
        hours(report.loans.mean_closed_hours)
    ));
    out.push_str("Maintenance\n");
    out.push_str(&format!("  Active: {}\n", report.maintenance.active));
    out.push_str(&format!(
        "  Started this month: {}\n",
        report.maintenance.started_this_month
    ));
    out.push_str(&format!(
        "  Mean duration (last {} days): {}",
        MAINTENANCE_WINDOW_DAYS,
        hours(report.maintenance.mean_recent_hours)
    ));

    if !report.top_assets.is_empty() {
        out.push_str("\nMost borrowed radios");
        for usage in &report.top_assets {
            out.push_str(&format!(
                "\n  {:<10} {:<28} {}",
                usage.code,
                output::clip(&usage.label, 28),
                usage.loans
            ));
        }
    }
    if !report.top_borrowers.is_empty() {
        out.push_str("\nMost active borrowers");
        for usage in &report.top_borrowers {
            out.push_str(&format!(
                "\n  {:<10} {:<28} {}",
                usage.code,
                output::clip(&usage.name, 28),
                usage.loans
            ));
        }
    }
    out
}
