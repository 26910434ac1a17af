// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asset registry

use crate::directory::Directory;
use crate::error::EngineError;
use crate::runtime::Engine;
use rp_core::{
    Asset, AssetAttributes, AssetId, AssetPatch, AssetState, Clock, Code, CodeKind, Operation,
};

impl<C: Clock, D: Directory> Engine<C, D> {
    /// Register a radio under the next `RAD-` code
    pub fn create_asset(&self, attributes: AssetAttributes) -> Result<Asset, EngineError> {
        attributes.validate()?;
        let now = self.clock.now();
        let asset = self.store.commit(|state| -> Result<_, EngineError> {
            let code = state.next_code(CodeKind::Asset)?;
            let id = AssetId(state.ids().asset + 1);
            let asset = Asset::new(id, code, attributes, now);
            Ok((
                Operation::AssetCreate {
                    asset: asset.clone(),
                },
                asset,
            ))
        })?;
        tracing::info!(asset = %asset.code, id = %asset.id, "asset created");
        Ok(asset)
    }

    /// Edit descriptive attributes; refused while the radio is on loan
    pub async fn update_asset(&self, id: AssetId, patch: AssetPatch) -> Result<Asset, EngineError> {
        patch.validate()?;
        let _guard = self.locks.acquire(id).await?;
        let now = self.clock.now();
        let asset = self.store.commit(|state| -> Result<_, EngineError> {
            let current = state
                .assets
                .get(&id)
                .ok_or_else(|| EngineError::not_found("asset", id))?;
            if let Some(loan) = state.open_loan_for(id) {
                return Err(EngineError::Conflict(format!(
                    "{} is on loan (loan {}) and cannot be edited",
                    current.code, loan.id
                )));
            }
            let mut updated = current.clone();
            patch.clone().apply(&mut updated, now);
            Ok((Operation::AssetUpdate { id, patch, at: now }, updated))
        })?;
        tracing::info!(asset = %asset.code, "asset updated");
        Ok(asset)
    }

    /// Remove a radio that has never been loaned or serviced
    pub async fn delete_asset(&self, id: AssetId) -> Result<Asset, EngineError> {
        let _guard = self.locks.acquire(id).await?;
        let asset = self.store.commit(|state| -> Result<_, EngineError> {
            let asset = state
                .assets
                .get(&id)
                .ok_or_else(|| EngineError::not_found("asset", id))?;
            if state.asset_has_history(id) {
                return Err(EngineError::Conflict(format!(
                    "{} has loan or maintenance history and cannot be deleted",
                    asset.code
                )));
            }
            Ok((Operation::AssetDelete { id }, asset.clone()))
        })?;
        tracing::info!(asset = %asset.code, "asset deleted");
        Ok(asset)
    }

    pub fn get_asset(&self, id: AssetId) -> Result<Asset, EngineError> {
        self.store
            .read(|s| s.assets.get(&id).cloned())
            .ok_or_else(|| EngineError::not_found("asset", id))
    }

    pub fn asset_by_code(&self, code: &Code) -> Result<Asset, EngineError> {
        self.store
            .read(|s| s.asset_by_code(code).cloned())
            .ok_or_else(|| EngineError::not_found("asset", code))
    }

    /// All assets in id order, optionally only those in `state`
    pub fn list_assets(&self, state: Option<AssetState>) -> Vec<Asset> {
        self.store.read(|s| {
            s.assets
                .values()
                .filter(|a| state.is_none() || s.asset_state(a.id) == state)
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
