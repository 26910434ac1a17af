// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders shared by the engine tests

use crate::{Engine, EngineConfig};
use chrono::{DateTime, TimeZone, Utc};
use rp_core::{Asset, AssetAttributes, FakeClock, NewPerson, Person};
use rp_storage::Store;
use std::sync::Arc;
use std::time::Duration;

pub(crate) type TestEngine = Engine<FakeClock>;

pub(crate) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 8, 0, 0).unwrap()
}

pub(crate) fn engine() -> (TestEngine, FakeClock) {
    let clock = FakeClock::at(epoch());
    let config = EngineConfig::default().with_lock_timeout(Duration::from_secs(2));
    let engine = Engine::with_store(Arc::new(Store::ephemeral()), clock.clone(), config);
    (engine, clock)
}

pub(crate) fn radio(engine: &TestEngine) -> Asset {
    engine
        .create_asset(AssetAttributes::new("Motorola", "DP4400").with_serial("SN-001"))
        .unwrap()
}

pub(crate) async fn borrower(engine: &TestEngine, last_name: &str) -> Person {
    engine
        .create_person(NewPerson::new(last_name, "Sam"))
        .await
        .unwrap()
}
