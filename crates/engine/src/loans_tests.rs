// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{borrower, engine, radio};
use chrono::Duration;
use rp_core::{Accessories, EpisodeStatus};

#[tokio::test]
async fn comment_edit_works_on_closed_loans_without_moving_dates() {
    let (engine, clock) = engine();
    let asset = radio(&engine);
    let x = borrower(&engine, "Xavier").await;
    let loan = engine
        .start_loan(asset.id, x.id, Accessories::Earpiece, None)
        .await
        .unwrap();
    clock.advance(Duration::hours(1));
    let closed = engine.end_loan(loan.id, None).await.unwrap();

    clock.advance(Duration::days(3));
    let edited = engine
        .set_loan_comment(loan.id, Some("scratched case".into()))
        .unwrap();
    assert_eq!(edited.comment.as_deref(), Some("scratched case"));
    assert_eq!(edited.borrowed_at, closed.borrowed_at);
    assert_eq!(edited.returned_at, closed.returned_at);

    let cleared = engine.set_loan_comment(loan.id, None).unwrap();
    assert_eq!(cleared.comment, None);
    assert!(engine.set_loan_comment(LoanId(40), None).is_err());
}

#[tokio::test]
async fn active_loans_by_asset_and_person() {
    let (engine, _clock) = engine();
    let a = radio(&engine);
    let b = radio(&engine);
    let x = borrower(&engine, "Xavier").await;

    assert_eq!(engine.active_loan_for(a.id).unwrap(), None);
    let first = engine.start_loan(a.id, x.id, Accessories::None, None).await.unwrap();
    engine.start_loan(b.id, x.id, Accessories::None, None).await.unwrap();

    assert_eq!(engine.active_loan_for(a.id).unwrap().map(|l| l.id), Some(first.id));
    assert_eq!(engine.active_loans_for(x.id).unwrap().len(), 2);
    assert!(engine.active_loan_for(AssetId(50)).is_err());
    assert!(engine.active_loans_for(PersonId(50)).is_err());
}

#[tokio::test]
async fn history_lists_newest_first_with_filters() {
    let (engine, clock) = engine();
    let asset = radio(&engine);
    let x = borrower(&engine, "Xavier").await;
    let y = borrower(&engine, "Yvette").await;

    let mut ids = Vec::new();
    for person in [x.id, y.id, x.id] {
        clock.advance(Duration::hours(1));
        let loan = engine
            .start_loan(asset.id, person, Accessories::None, None)
            .await
            .unwrap();
        ids.push(loan.id);
        clock.advance(Duration::minutes(10));
        engine.end_loan(loan.id, None).await.unwrap();
    }

    let history = engine.loan_history(&HistoryFilter::for_asset(asset.id));
    let listed: Vec<_> = history.iter().map(|l| l.id).collect();
    assert_eq!(listed, vec![ids[2], ids[1], ids[0]]);

    let by_x = engine.loan_history(&HistoryFilter::for_person(x.id));
    assert_eq!(by_x.len(), 2);

    let open = engine.loan_history(&HistoryFilter {
        status: Some(EpisodeStatus::Open),
        ..HistoryFilter::default()
    });
    assert!(open.is_empty());

    let page = engine.loan_history(&HistoryFilter {
        offset: 1,
        limit: Some(1),
        ..HistoryFilter::default()
    });
    assert_eq!(page[0].id, ids[1]);
}
