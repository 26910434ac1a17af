// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::id::LoanId;
use crate::loan::Accessories;
use chrono::{Duration, TimeZone};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

fn loan(id: u64, asset: u64, person: u64, hours: i64, closed: bool) -> LoanEpisode {
    let borrowed_at = t0() + Duration::hours(hours);
    LoanEpisode {
        id: LoanId(id),
        asset_id: AssetId(asset),
        person_id: PersonId(person),
        borrowed_at,
        returned_at: closed.then(|| borrowed_at + Duration::minutes(30)),
        accessories: Accessories::None,
        comment: None,
    }
}

fn sample() -> Vec<LoanEpisode> {
    vec![
        loan(1, 1, 10, 0, true),
        loan(2, 2, 10, 1, true),
        loan(3, 1, 11, 2, false),
        loan(4, 3, 12, 3, false),
    ]
}

fn ids(loans: &[LoanEpisode]) -> Vec<u64> {
    loans.iter().map(|l| l.id.0).collect()
}

#[test]
fn default_filter_returns_everything_newest_first() {
    let result = HistoryFilter::default().apply(&sample());
    assert_eq!(ids(&result), vec![4, 3, 2, 1]);
}

#[test]
fn status_filter_selects_open_or_closed() {
    let open = HistoryFilter {
        status: Some(EpisodeStatus::Open),
        ..HistoryFilter::default()
    };
    let closed = HistoryFilter {
        status: Some(EpisodeStatus::Closed),
        ..HistoryFilter::default()
    };
    assert_eq!(ids(&open.apply(&sample())), vec![4, 3]);
    assert_eq!(ids(&closed.apply(&sample())), vec![2, 1]);
}

#[test]
fn asset_and_person_filters() {
    assert_eq!(ids(&HistoryFilter::for_asset(AssetId(1)).apply(&sample())), vec![3, 1]);
    assert_eq!(ids(&HistoryFilter::for_person(PersonId(10)).apply(&sample())), vec![2, 1]);
}

#[test]
fn since_is_inclusive() {
    let filter = HistoryFilter {
        since: Some(t0() + Duration::hours(2)),
        ..HistoryFilter::default()
    };
    assert_eq!(ids(&filter.apply(&sample())), vec![4, 3]);
}

#[test]
fn offset_and_limit_paginate() {
    let filter = HistoryFilter {
        offset: 1,
        limit: Some(2),
        ..HistoryFilter::default()
    };
    assert_eq!(ids(&filter.apply(&sample())), vec![3, 2]);

    let past_end = HistoryFilter {
        offset: 10,
        ..HistoryFilter::default()
    };
    assert!(past_end.apply(&sample()).is_empty());
}

#[test]
fn equal_start_times_list_later_ids_first() {
    let mut loans = sample();
    loans.push(loan(5, 4, 13, 3, false));
    let result = HistoryFilter::default().apply(&loans);
    assert_eq!(ids(&result)[..2], [5, 4]);
}

#[test]
fn person_filter_never_matches_maintenance() {
    let episode = MaintenanceEpisode {
        id: crate::id::MaintenanceId(1),
        asset_id: AssetId(1),
        started_at: t0(),
        ended_at: None,
        description: "antenna".into(),
        operator: "bench".into(),
    };
    assert!(HistoryFilter::default().matches(&episode));
    assert!(!HistoryFilter::for_person(PersonId(1)).matches(&episode));
}
