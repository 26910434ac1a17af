// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::test_support::{borrower, engine, radio};
use chrono::Duration;
use rp_core::{Accessories, NewMaintenance};

#[tokio::test]
async fn empty_ledgers_have_no_means() {
    let (engine, _clock) = engine();
    let loans = engine.loan_stats();
    assert_eq!(loans.total, 0);
    assert_eq!(loans.mean_closed_hours, None);
    assert_eq!(engine.maintenance_stats().mean_recent_hours, None);
    assert!(engine.top_assets(5).is_empty());
}

#[tokio::test]
async fn loan_stats_count_active_and_overdue() {
    let (engine, clock) = engine();
    let a = radio(&engine);
    let b = radio(&engine);
    let c = radio(&engine);
    let x = borrower(&engine, "Xavier").await;

    let first = engine.start_loan(a.id, x.id, Accessories::None, None).await.unwrap();
    clock.advance(Duration::hours(4));
    engine.end_loan(first.id, None).await.unwrap();

    engine.start_loan(b.id, x.id, Accessories::None, None).await.unwrap();
    clock.advance(Duration::days(8));
    engine.start_loan(c.id, x.id, Accessories::None, None).await.unwrap();

    let stats = engine.loan_stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.mean_closed_hours, Some(4.0));
}

#[tokio::test]
async fn maintenance_stats_window_and_month() {
    let (engine, clock) = engine();
    let a = radio(&engine);
    let b = radio(&engine);

    let old = engine
        .start_maintenance(a.id, NewMaintenance::new("battery", "bench"))
        .await
        .unwrap();
    clock.advance(Duration::hours(10));
    engine.end_maintenance(old.id).await.unwrap();

    // Past the window: the 10 hour episode no longer counts
    clock.advance(Duration::days(100));
    let recent = engine
        .start_maintenance(a.id, NewMaintenance::new("antenna", "bench"))
        .await
        .unwrap();
    clock.advance(Duration::hours(2));
    engine.end_maintenance(recent.id).await.unwrap();
    engine
        .start_maintenance(b.id, NewMaintenance::new("screen", "bench"))
        .await
        .unwrap();

    let stats = engine.maintenance_stats();
    assert_eq!(stats.active, 1);
    assert_eq!(stats.mean_recent_hours, Some(2.0));
    assert_eq!(stats.started_this_month, 2);
}

#[tokio::test]
async fn top_lists_rank_by_loan_count() {
    let (engine, _clock) = engine();
    let busy = radio(&engine);
    let quiet = radio(&engine);
    let x = borrower(&engine, "Xavier").await;
    let y = borrower(&engine, "Yvette").await;

    for person in [x.id, y.id, x.id] {
        let loan = engine
            .start_loan(busy.id, person, Accessories::None, None)
            .await
            .unwrap();
        engine.end_loan(loan.id, None).await.unwrap();
    }
    engine.start_loan(quiet.id, y.id, Accessories::None, None).await.unwrap();

    let assets = engine.top_assets(10);
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].asset_id, busy.id);
    assert_eq!(assets[0].loans, 3);
    assert_eq!(engine.top_assets(1).len(), 1);

    let borrowers = engine.top_borrowers(10);
    // Both borrowed twice; ties break on id
    assert_eq!(borrowers[0].person_id, x.id);
    assert_eq!(borrowers[0].loans, 2);
    assert_eq!(borrowers[1].person_id, y.id);
}
