// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn second_writer_times_out_while_first_holds() {
    let locks = AssetLocks::new(Duration::from_millis(50));
    let _held = locks.acquire(AssetId(1)).await.unwrap();

    let err = locks.acquire(AssetId(1)).await.unwrap_err();
    assert!(matches!(err, EngineError::Timeout { asset: AssetId(1), .. }), "got {err:?}");
}

#[tokio::test]
async fn different_assets_do_not_contend() {
    let locks = AssetLocks::new(Duration::from_millis(50));
    let _a = locks.acquire(AssetId(1)).await.unwrap();
    let _b = locks.acquire(AssetId(2)).await.unwrap();
    assert_eq!(locks.len(), 2);
}

#[tokio::test]
async fn release_admits_next_waiter() {
    let locks = Arc::new(AssetLocks::new(Duration::from_secs(5)));
    let held = locks.acquire(AssetId(1)).await.unwrap();

    let waiter = {
        let locks = locks.clone();
        tokio::spawn(async move { locks.acquire(AssetId(1)).await.map(|_| ()) })
    };
    tokio::task::yield_now().await;
    drop(held);

    waiter.await.unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn waiters_are_admitted_in_arrival_order() {
    let locks = Arc::new(AssetLocks::new(Duration::from_secs(5)));
    let order = Arc::new(Mutex::new(Vec::new()));
    let held = locks.acquire(AssetId(7)).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..5 {
        let locks = locks.clone();
        let order = order.clone();
        tasks.push(tokio::spawn(async move {
            let _guard = locks.acquire(AssetId(7)).await.unwrap();
            order.lock().unwrap().push(i);
        }));
        // Let the task enqueue before spawning the next one
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    drop(held);
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn released_slot_is_dropped() {
    let locks = AssetLocks::new(Duration::from_millis(50));
    drop(locks.acquire(AssetId(3)).await.unwrap());
    assert_eq!(locks.len(), 0);
}

#[tokio::test]
async fn slot_survives_while_a_waiter_is_queued() {
    let locks = Arc::new(AssetLocks::new(Duration::from_secs(5)));
    let held = locks.acquire(AssetId(4)).await.unwrap();

    let waiter = {
        let locks = locks.clone();
        tokio::spawn(async move { locks.acquire(AssetId(4)).await.map(|_| ()) })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    drop(held);
    assert_eq!(locks.len(), 1);

    waiter.await.unwrap().unwrap();
    assert_eq!(locks.len(), 0);
}

#[tokio::test]
async fn timed_out_waiter_leaves_no_slot_behind() {
    let locks = AssetLocks::new(Duration::from_millis(20));
    let held = locks.acquire(AssetId(5)).await.unwrap();
    locks.acquire(AssetId(5)).await.unwrap_err();
    assert_eq!(locks.len(), 1);

    drop(held);
    assert_eq!(locks.len(), 0);
}
