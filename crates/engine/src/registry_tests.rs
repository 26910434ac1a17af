// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{borrower, engine, radio};
use rp_core::{Accessories, Field, MAX_SEQUENCE, NewMaintenance};
use std::sync::Arc;

#[test]
fn created_assets_get_sequential_codes() {
    let (engine, _clock) = engine();
    let first = radio(&engine);
    let second = radio(&engine);
    assert_eq!(first.code.to_string(), "RAD-00001");
    assert_eq!(second.code.to_string(), "RAD-00002");
    assert!(!first.in_maintenance());
    assert_eq!(engine.asset_by_code(&second.code).unwrap().id, second.id);
}

#[test]
fn invalid_attributes_write_nothing() {
    let (engine, _clock) = engine();
    let err = engine
        .create_asset(AssetAttributes::new("", "DP4400"))
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert_eq!(radio(&engine).code.to_string(), "RAD-00001");
}

#[tokio::test]
async fn delete_refused_with_history_allowed_without() {
    let (engine, _clock) = engine();
    let used = radio(&engine);
    let unused = radio(&engine);
    let x = borrower(&engine, "Xavier").await;

    let loan = engine
        .start_loan(used.id, x.id, Accessories::None, None)
        .await
        .unwrap();
    engine.end_loan(loan.id, None).await.unwrap();

    let err = engine.delete_asset(used.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)), "got {err:?}");
    engine.get_asset(used.id).unwrap();

    engine.delete_asset(unused.id).await.unwrap();
    assert!(matches!(
        engine.get_asset(unused.id).unwrap_err(),
        EngineError::NotFound { .. }
    ));
}

#[tokio::test]
async fn maintenance_history_also_blocks_delete() {
    let (engine, _clock) = engine();
    let asset = radio(&engine);
    let episode = engine
        .start_maintenance(asset.id, NewMaintenance::new("battery", "bench"))
        .await
        .unwrap();
    engine.end_maintenance(episode.id).await.unwrap();
    assert!(matches!(
        engine.delete_asset(asset.id).await.unwrap_err(),
        EngineError::Conflict(_)
    ));
}

#[tokio::test]
async fn deleted_codes_are_never_reissued() {
    let (engine, _clock) = engine();
    let first = radio(&engine);
    engine.delete_asset(first.id).await.unwrap();
    let second = radio(&engine);
    assert_ne!(first.code, second.code);
    assert_eq!(second.code.to_string(), "RAD-00002");
}

#[tokio::test]
async fn edit_refused_on_loan_allowed_in_maintenance() {
    let (engine, _clock) = engine();
    let loaned = radio(&engine);
    let serviced = radio(&engine);
    let x = borrower(&engine, "Xavier").await;
    engine
        .start_loan(loaned.id, x.id, Accessories::None, None)
        .await
        .unwrap();
    engine
        .start_maintenance(serviced.id, NewMaintenance::new("battery", "bench"))
        .await
        .unwrap();

    let patch = AssetPatch {
        model: Field::Set("DP4801e".to_string()),
        ..AssetPatch::default()
    };
    let err = engine.update_asset(loaned.id, patch.clone()).await.unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));
    assert_eq!(engine.get_asset(loaned.id).unwrap().model, "DP4400");

    let updated = engine.update_asset(serviced.id, patch).await.unwrap();
    assert_eq!(updated.model, "DP4801e");
    assert!(updated.in_maintenance());
}

#[tokio::test]
async fn list_filters_by_derived_state() {
    let (engine, _clock) = engine();
    let idle = radio(&engine);
    let serviced = radio(&engine);
    engine
        .start_maintenance(serviced.id, NewMaintenance::new("battery", "bench"))
        .await
        .unwrap();

    assert_eq!(engine.list_assets(None).len(), 2);
    let available = engine.list_assets(Some(AssetState::Available));
    assert_eq!(available.iter().map(|a| a.id).collect::<Vec<_>>(), vec![idle.id]);
    let in_maintenance = engine.list_assets(Some(AssetState::InMaintenance));
    assert_eq!(in_maintenance[0].id, serviced.id);
    assert!(engine.list_assets(Some(AssetState::OnLoan)).is_empty());
}

#[test]
fn code_space_exhausts_after_last_five_digit_code() {
    let (engine, _clock) = engine();
    let attrs = AssetAttributes::new("Motorola", "DP4400");
    for _ in 0..MAX_SEQUENCE {
        engine.create_asset(attrs.clone()).unwrap();
    }
    let last = engine.list_assets(None).pop().unwrap();
    assert_eq!(last.code.to_string(), "RAD-99999");

    // Calls 100000 and 100001 both fail; nothing is written
    for _ in 0..2 {
        let err = engine.create_asset(attrs.clone()).unwrap_err();
        assert!(matches!(err, EngineError::Generation(_)), "got {err:?}");
    }
    assert_eq!(engine.list_assets(None).len(), MAX_SEQUENCE as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creations_never_share_a_code() {
    let (engine, _clock) = engine();
    let engine = Arc::new(engine);
    let tasks: Vec<_> = (0..64)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move { radio(&engine).code })
        })
        .collect();
    let mut codes = Vec::new();
    for task in tasks {
        codes.push(task.await.unwrap());
    }
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 64);
}
