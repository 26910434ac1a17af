// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle coordinator
//!
//! The only place loans and maintenance episodes are opened or closed. Each
//! transition runs under the asset's admission lock and decides against the
//! store inside the same commit that persists it.

use crate::directory::Directory;
use crate::error::EngineError;
use crate::runtime::{normalize_comment, not_before, Engine};
use rp_core::{
    Accessories, AssetId, AssetState, Clock, LoanEpisode, LoanId, MaintenanceEpisode,
    MaintenanceId, NewMaintenance, Operation, PersonId, Transition,
};
use rp_storage::MaterializedState;

fn admit(
    state: &MaterializedState,
    asset_id: AssetId,
    transition: Transition,
) -> Result<(), EngineError> {
    let asset = state
        .assets
        .get(&asset_id)
        .ok_or_else(|| EngineError::not_found("asset", asset_id))?;
    let current = AssetState::derive(
        state.open_loan_for(asset_id).is_some(),
        state.open_maintenance_for(asset_id).is_some(),
    );
    current
        .admit(transition)
        .map(|_| ())
        .map_err(|reason| EngineError::Busy {
            asset: asset.code,
            reason,
        })
}

impl<C: Clock, D: Directory> Engine<C, D> {
    /// Lend a radio to a person
    pub async fn start_loan(
        &self,
        asset_id: AssetId,
        person_id: PersonId,
        accessories: Accessories,
        comment: Option<String>,
    ) -> Result<LoanEpisode, EngineError> {
        let _guard = self.locks.acquire(asset_id).await?;
        let now = self.clock.now();
        let loan = self.store.commit(|state| -> Result<_, EngineError> {
            if !state.assets.contains_key(&asset_id) {
                return Err(EngineError::not_found("asset", asset_id));
            }
            if !state.people.contains_key(&person_id) {
                return Err(EngineError::not_found("person", person_id));
            }
            admit(state, asset_id, Transition::StartLoan)?;

            let loan = LoanEpisode {
                id: LoanId(state.ids().loan + 1),
                asset_id,
                person_id,
                borrowed_at: not_before(now, state.last_boundary(asset_id)),
                returned_at: None,
                accessories,
                comment: normalize_comment(comment),
            };
            Ok((Operation::LoanOpen { loan: loan.clone() }, loan))
        })?;
        tracing::info!(
            loan = %loan.id,
            asset = %asset_id,
            person = %person_id,
            accessories = %loan.accessories,
            "loan started"
        );
        Ok(loan)
    }

    /// Return a radio; `comment` replaces the loan comment when given
    pub async fn end_loan(
        &self,
        loan_id: LoanId,
        comment: Option<String>,
    ) -> Result<LoanEpisode, EngineError> {
        let asset_id = self
            .store
            .read(|s| s.loans.get(&loan_id).map(|l| l.asset_id))
            .ok_or_else(|| EngineError::not_found("loan", loan_id))?;
        let _guard = self.locks.acquire(asset_id).await?;
        let now = self.clock.now();
        let loan = self.store.commit(|state| -> Result<_, EngineError> {
            let mut loan = state
                .loans
                .get(&loan_id)
                .cloned()
                .ok_or_else(|| EngineError::not_found("loan", loan_id))?;
            if !loan.is_open() {
                return Err(EngineError::AlreadyClosed {
                    entity: "loan",
                    id: loan_id.0,
                });
            }
            let returned_at = not_before(now, state.last_boundary(asset_id));
            let comment = normalize_comment(comment);
            loan.returned_at = Some(returned_at);
            if comment.is_some() {
                loan.comment = comment.clone();
            }
            Ok((
                Operation::LoanClose {
                    id: loan_id,
                    returned_at,
                    comment,
                },
                loan,
            ))
        })?;
        tracing::info!(loan = %loan.id, asset = %asset_id, "loan ended");
        Ok(loan)
    }

    /// Send a radio to maintenance
    pub async fn start_maintenance(
        &self,
        asset_id: AssetId,
        request: NewMaintenance,
    ) -> Result<MaintenanceEpisode, EngineError> {
        request.validate()?;
        let _guard = self.locks.acquire(asset_id).await?;
        let now = self.clock.now();
        let episode = self.store.commit(|state| -> Result<_, EngineError> {
            admit(state, asset_id, Transition::StartMaintenance)?;
            let episode = MaintenanceEpisode {
                id: MaintenanceId(state.ids().maintenance + 1),
                asset_id,
                started_at: not_before(now, state.last_boundary(asset_id)),
                ended_at: None,
                description: request.description,
                operator: request.operator,
            };
            Ok((
                Operation::MaintenanceOpen {
                    episode: episode.clone(),
                },
                episode,
            ))
        })?;
        tracing::info!(maintenance = %episode.id, asset = %asset_id, "maintenance started");
        Ok(episode)
    }

    /// Bring a radio back from maintenance
    pub async fn end_maintenance(
        &self,
        maintenance_id: MaintenanceId,
    ) -> Result<MaintenanceEpisode, EngineError> {
        let asset_id = self
            .store
            .read(|s| s.maintenance.get(&maintenance_id).map(|m| m.asset_id))
            .ok_or_else(|| EngineError::not_found("maintenance", maintenance_id))?;
        let _guard = self.locks.acquire(asset_id).await?;
        let now = self.clock.now();
        let episode = self.store.commit(|state| -> Result<_, EngineError> {
            let mut episode = state
                .maintenance
                .get(&maintenance_id)
                .cloned()
                .ok_or_else(|| EngineError::not_found("maintenance", maintenance_id))?;
            if !episode.is_open() {
                return Err(EngineError::AlreadyClosed {
                    entity: "maintenance",
                    id: maintenance_id.0,
                });
            }
            let ended_at = not_before(now, state.last_boundary(asset_id));
            episode.ended_at = Some(ended_at);
            Ok((
                Operation::MaintenanceClose {
                    id: maintenance_id,
                    ended_at,
                },
                episode,
            ))
        })?;
        let still_flagged = self
            .store
            .read(|s| s.assets.get(&asset_id).map(|a| a.in_maintenance()));
        tracing::info!(
            maintenance = %episode.id,
            asset = %asset_id,
            in_maintenance = ?still_flagged,
            "maintenance ended"
        );
        Ok(episode)
    }

    /// Current derived state of an asset
    pub fn query_asset_state(&self, asset_id: AssetId) -> Result<AssetState, EngineError> {
        self.store
            .read(|s| s.asset_state(asset_id))
            .ok_or_else(|| EngineError::not_found("asset", asset_id))
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
