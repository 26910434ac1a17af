// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod asset;
pub mod center;
pub mod daemon;
pub mod loan;
pub mod maintenance;
pub mod person;
pub mod stats;
pub mod team;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rp_core::{EpisodeStatus, HistoryFilter};
use rp_daemon::AssetRef;

use crate::client::DaemonClient;

/// Listing options shared by loan and maintenance history
#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    /// Only open episodes
    #[arg(long, conflicts_with = "closed")]
    pub open: bool,
    /// Only closed episodes
    #[arg(long)]
    pub closed: bool,
    /// Only this radio (code or id)
    #[arg(long)]
    pub asset: Option<AssetRef>,
    /// Only episodes started at or after this instant (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_since)]
    pub since: Option<DateTime<Utc>>,
    /// Skip this many episodes
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    /// Show at most this many episodes
    #[arg(long)]
    pub limit: Option<usize>,
}

impl HistoryArgs {
    pub async fn filter(&self, client: &DaemonClient) -> Result<HistoryFilter> {
        let status = match (self.open, self.closed) {
            (true, _) => Some(EpisodeStatus::Open),
            (_, true) => Some(EpisodeStatus::Closed),
            _ => None,
        };
        let asset_id = match self.asset {
            Some(asset) => Some(client.resolve_asset(asset).await?),
            None => None,
        };
        Ok(HistoryFilter {
            status,
            asset_id,
            person_id: None,
            since: self.since,
            offset: self.offset,
            limit: self.limit,
        })
    }
}

pub fn parse_since(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected RFC 3339 or YYYY-MM-DD, got {s:?}"))
}
