// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance ledger queries

use crate::directory::Directory;
use crate::error::EngineError;
use crate::runtime::Engine;
use rp_core::{AssetId, Clock, HistoryFilter, MaintenanceEpisode, MaintenanceId};

impl<C: Clock, D: Directory> Engine<C, D> {
    pub fn get_maintenance(&self, id: MaintenanceId) -> Result<MaintenanceEpisode, EngineError> {
        self.store
            .read(|s| s.maintenance.get(&id).cloned())
            .ok_or_else(|| EngineError::not_found("maintenance", id))
    }

    pub fn active_maintenance_for(
        &self,
        asset_id: AssetId,
    ) -> Result<Option<MaintenanceEpisode>, EngineError> {
        self.store.read(|s| {
            if !s.assets.contains_key(&asset_id) {
                return Err(EngineError::not_found("asset", asset_id));
            }
            Ok(s.open_maintenance_for(asset_id).cloned())
        })
    }

    /// Maintenance episodes matching `filter`, newest first
    ///
    /// A person criterion matches nothing, since maintenance has no borrower.
    pub fn maintenance_history(&self, filter: &HistoryFilter) -> Vec<MaintenanceEpisode> {
        self.store.read(|s| filter.apply(s.maintenance.values()))
    }
}

#[cfg(test)]
#[path = "maintenance_tests.rs"]
mod tests;
