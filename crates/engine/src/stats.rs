// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Usage statistics over the ledgers

use crate::directory::Directory;
use crate::runtime::Engine;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rp_core::{AssetId, Clock, Code, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Open loans older than this are counted as overdue
pub const OVERDUE_AFTER_DAYS: i64 = 7;

/// Window for the mean maintenance duration
pub const MAINTENANCE_WINDOW_DAYS: i64 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanStats {
    pub total: usize,
    pub active: usize,
    /// Mean duration of closed loans, in hours
    pub mean_closed_hours: Option<f64>,
    pub overdue: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceStats {
    pub active: usize,
    pub started_this_month: usize,
    /// Mean duration of episodes closed within the window, in hours
    pub mean_recent_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUsage {
    pub asset_id: AssetId,
    pub code: Code,
    pub label: String,
    pub loans: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowerUsage {
    pub person_id: PersonId,
    pub code: Code,
    pub name: String,
    pub loans: usize,
}

fn hours(d: Duration) -> f64 {
    d.num_seconds() as f64 / 3600.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Highest count first, ties by ascending key
fn rank<K: Ord + Copy>(counts: HashMap<K, usize>) -> Vec<(K, usize)> {
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

impl<C: Clock, D: Directory> Engine<C, D> {
    pub fn loan_stats(&self) -> LoanStats {
        let now = self.clock.now();
        let overdue_before = now - Duration::days(OVERDUE_AFTER_DAYS);
        self.store.read(|s| {
            let closed: Vec<f64> = s
                .loans
                .values()
                .filter_map(|l| l.returned_at.map(|r| hours(r - l.borrowed_at)))
                .collect();
            LoanStats {
                total: s.loans.len(),
                active: s.open_loan_count(),
                mean_closed_hours: mean(&closed),
                overdue: s
                    .loans
                    .values()
                    .filter(|l| l.is_open() && l.borrowed_at < overdue_before)
                    .count(),
            }
        })
    }

    pub fn maintenance_stats(&self) -> MaintenanceStats {
        let now = self.clock.now();
        let month = start_of_month(now);
        let window = now - Duration::days(MAINTENANCE_WINDOW_DAYS);
        self.store.read(|s| {
            let recent: Vec<f64> = s
                .maintenance
                .values()
                .filter_map(|m| {
                    let ended = m.ended_at?;
                    (ended >= window).then(|| hours(ended - m.started_at))
                })
                .collect();
            MaintenanceStats {
                active: s.open_maintenance_count(),
                started_this_month: s
                    .maintenance
                    .values()
                    .filter(|m| m.started_at >= month)
                    .count(),
                mean_recent_hours: mean(&recent),
            }
        })
    }

    /// Most borrowed radios still registered
    pub fn top_assets(&self, limit: usize) -> Vec<AssetUsage> {
        self.store.read(|s| {
            let mut counts = HashMap::new();
            for loan in s.loans.values() {
                *counts.entry(loan.asset_id).or_insert(0) += 1;
            }
            rank(counts)
                .into_iter()
                .filter_map(|(id, loans)| {
                    s.assets.get(&id).map(|a| AssetUsage {
                        asset_id: id,
                        code: a.code,
                        label: a.label(),
                        loans,
                    })
                })
                .take(limit)
                .collect()
        })
    }

    /// Most active borrowers still registered
    pub fn top_borrowers(&self, limit: usize) -> Vec<BorrowerUsage> {
        self.store.read(|s| {
            let mut counts = HashMap::new();
            for loan in s.loans.values() {
                *counts.entry(loan.person_id).or_insert(0) += 1;
            }
            rank(counts)
                .into_iter()
                .filter_map(|(id, loans)| {
                    s.people.get(&id).map(|p| BorrowerUsage {
                        person_id: id,
                        code: p.code,
                        name: p.full_name(),
                        loans,
                    })
                })
                .take(limit)
                .collect()
        })
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
