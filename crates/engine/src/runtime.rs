// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine for the radio pool
//!
//! Writers on an asset first take that asset's admission lock, then decide
//! and persist through a single store commit. Readers go straight to the
//! store and may observe the state one transition behind a waiting writer.

use crate::config::EngineConfig;
use crate::directory::{Directory, StoreDirectory};
use crate::error::EngineError;
use crate::locks::AssetLocks;
use chrono::{DateTime, Utc};
use rp_core::{Clock, SystemClock};
use rp_storage::Store;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// The lending and maintenance engine
pub struct Engine<C: Clock = SystemClock, D: Directory = StoreDirectory> {
    pub(crate) store: Arc<Store>,
    pub(crate) clock: C,
    pub(crate) directory: D,
    pub(crate) locks: AssetLocks,
    /// Serializes attaching people to teams/centers against removing those
    pub(crate) references: tokio::sync::Mutex<()>,
    config: EngineConfig,
    started_at: DateTime<Utc>,
}

impl Engine {
    /// Open the engine over the log at `wal_path`
    pub fn open(wal_path: &Path, config: EngineConfig) -> Result<Self, EngineError> {
        let store = Arc::new(Store::open(wal_path)?);
        Ok(Engine::with_store(store, SystemClock, config))
    }
}

impl<C: Clock> Engine<C, StoreDirectory> {
    /// Engine whose directory lookups are answered by the same store
    pub fn with_store(store: Arc<Store>, clock: C, config: EngineConfig) -> Self {
        let directory = StoreDirectory::new(store.clone());
        Engine::new(store, clock, directory, config)
    }
}

impl<C: Clock, D: Directory> Engine<C, D> {
    pub fn new(store: Arc<Store>, clock: C, directory: D, config: EngineConfig) -> Self {
        let started_at = clock.now();
        Self {
            store,
            locks: AssetLocks::new(config.lock_timeout),
            clock,
            directory,
            references: tokio::sync::Mutex::new(()),
            config,
            started_at,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counts of what the engine currently holds
    pub fn status(&self) -> EngineStatus {
        let now = self.clock.now();
        let wal_sequence = self.store.sequence();
        self.store.read(|s| EngineStatus {
            started_at: self.started_at,
            uptime_secs: (now - self.started_at).num_seconds().max(0) as u64,
            assets: s.assets.len(),
            people: s.people.len(),
            teams: s.teams.len(),
            centers: s.centers.len(),
            open_loans: s.open_loan_count(),
            open_maintenance: s.open_maintenance_count(),
            wal_sequence,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub started_at: DateTime<Utc>,
    pub uptime_secs: u64,
    pub assets: usize,
    pub people: usize,
    pub teams: usize,
    pub centers: usize,
    pub open_loans: usize,
    pub open_maintenance: usize,
    pub wal_sequence: u64,
}

/// Episode boundaries on one asset never move backwards in time, even when
/// the wall clock does.
pub(crate) fn not_before(now: DateTime<Utc>, boundary: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match boundary {
        Some(boundary) if boundary > now => boundary,
        _ => now,
    }
}

/// Blank comments are stored as no comment
pub(crate) fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
