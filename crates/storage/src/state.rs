// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay

use chrono::{DateTime, Utc};
use rp_core::{
    Asset, AssetId, AssetState, CenterId, Code, CodeKind, CodeSequences, GenerationError,
    LoanEpisode, LoanId, MaintenanceEpisode, MaintenanceId, Operation, Person, PersonId, Team,
    TeamId, TrainingCenter,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Highest surrogate id issued per table. Ids, like codes, are never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounters {
    pub asset: u64,
    pub person: u64,
    pub team: u64,
    pub center: u64,
    pub loan: u64,
    pub maintenance: u64,
}

/// Materialized state built from WAL operations
#[derive(Debug, Default)]
pub struct MaterializedState {
    pub assets: BTreeMap<AssetId, Asset>,
    pub people: BTreeMap<PersonId, Person>,
    pub teams: BTreeMap<TeamId, Team>,
    pub centers: BTreeMap<CenterId, TrainingCenter>,
    pub loans: BTreeMap<LoanId, LoanEpisode>,
    pub maintenance: BTreeMap<MaintenanceId, MaintenanceEpisode>,
    sequences: CodeSequences,
    ids: IdCounters,
    asset_codes: HashMap<Code, AssetId>,
    person_codes: HashMap<Code, PersonId>,
    open_loans: HashMap<AssetId, LoanId>,
    open_maintenance: HashMap<AssetId, MaintenanceId>,
    /// Latest episode start or end seen per asset
    boundaries: HashMap<AssetId, DateTime<Utc>>,
}

impl MaterializedState {
    /// Apply an operation to update the state
    ///
    /// Operations are decided against this state before they are logged, so
    /// references to missing records only occur in a hand-edited log and are
    /// ignored.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::AssetCreate { asset } => {
                self.sequences.record(asset.code);
                self.ids.asset = self.ids.asset.max(asset.id.0);
                self.asset_codes.insert(asset.code, asset.id);
                let mut asset = asset.clone();
                asset.sync_maintenance_flag(self.open_maintenance.contains_key(&asset.id));
                self.assets.insert(asset.id, asset);
            }

            Operation::AssetUpdate { id, patch, at } => {
                if let Some(asset) = self.assets.get_mut(id) {
                    patch.clone().apply(asset, *at);
                }
            }

            Operation::AssetDelete { id } => {
                if let Some(asset) = self.assets.remove(id) {
                    self.asset_codes.remove(&asset.code);
                }
            }

            Operation::PersonCreate { person } => {
                self.sequences.record(person.code);
                self.ids.person = self.ids.person.max(person.id.0);
                self.person_codes.insert(person.code, person.id);
                self.people.insert(person.id, person.clone());
            }

            Operation::PersonUpdate { id, patch, at } => {
                if let Some(person) = self.people.get_mut(id) {
                    patch.clone().apply(person, *at);
                }
            }

            Operation::PersonDelete { id } => {
                if let Some(person) = self.people.remove(id) {
                    self.person_codes.remove(&person.code);
                }
            }

            Operation::TeamCreate { team } => {
                self.ids.team = self.ids.team.max(team.id.0);
                self.teams.insert(team.id, team.clone());
            }

            Operation::TeamDelete { id } => {
                self.teams.remove(id);
            }

            Operation::CenterCreate { center } => {
                self.ids.center = self.ids.center.max(center.id.0);
                self.centers.insert(center.id, center.clone());
            }

            Operation::CenterDelete { id } => {
                self.centers.remove(id);
            }

            Operation::LoanOpen { loan } => {
                self.ids.loan = self.ids.loan.max(loan.id.0);
                self.touch_boundary(loan.asset_id, loan.borrowed_at);
                if loan.is_open() {
                    self.open_loans.insert(loan.asset_id, loan.id);
                }
                self.loans.insert(loan.id, loan.clone());
            }

            Operation::LoanClose {
                id,
                returned_at,
                comment,
            } => {
                let Some(loan) = self.loans.get_mut(id) else {
                    return;
                };
                if loan.returned_at.is_some() {
                    return;
                }
                loan.returned_at = Some(*returned_at);
                if comment.is_some() {
                    loan.comment = comment.clone();
                }
                let asset_id = loan.asset_id;
                if self.open_loans.get(&asset_id) == Some(id) {
                    self.open_loans.remove(&asset_id);
                }
                self.touch_boundary(asset_id, *returned_at);
            }

            Operation::LoanComment { id, comment } => {
                if let Some(loan) = self.loans.get_mut(id) {
                    loan.comment = comment.clone();
                }
            }

            Operation::MaintenanceOpen { episode } => {
                self.ids.maintenance = self.ids.maintenance.max(episode.id.0);
                self.touch_boundary(episode.asset_id, episode.started_at);
                self.maintenance.insert(episode.id, episode.clone());
                self.refresh_maintenance_flag(episode.asset_id);
            }

            Operation::MaintenanceClose { id, ended_at } => {
                let Some(episode) = self.maintenance.get_mut(id) else {
                    return;
                };
                if episode.ended_at.is_some() {
                    return;
                }
                episode.ended_at = Some(*ended_at);
                let asset_id = episode.asset_id;
                self.touch_boundary(asset_id, *ended_at);
                self.refresh_maintenance_flag(asset_id);
            }
        }
    }

    fn touch_boundary(&mut self, asset_id: AssetId, at: DateTime<Utc>) {
        let entry = self.boundaries.entry(asset_id).or_insert(at);
        if at > *entry {
            *entry = at;
        }
    }

    /// Recompute the projected flag from the episodes themselves, so closing
    /// one episode never clears the flag while another is still open.
    fn refresh_maintenance_flag(&mut self, asset_id: AssetId) {
        let open = self
            .maintenance
            .values()
            .find(|m| m.asset_id == asset_id && m.is_open())
            .map(|m| m.id);
        match open {
            Some(id) => {
                self.open_maintenance.insert(asset_id, id);
            }
            None => {
                self.open_maintenance.remove(&asset_id);
            }
        }
        if let Some(asset) = self.assets.get_mut(&asset_id) {
            asset.sync_maintenance_flag(open.is_some());
        }
    }

    // --- allocation, only meaningful inside a store commit ---

    /// The code the next creation of `kind` would receive
    pub fn next_code(&self, kind: CodeKind) -> Result<Code, GenerationError> {
        self.sequences.peek_next(kind)
    }

    pub fn ids(&self) -> IdCounters {
        self.ids
    }

    pub fn sequences(&self) -> &CodeSequences {
        &self.sequences
    }

    // --- lookups ---

    pub fn asset_by_code(&self, code: &Code) -> Option<&Asset> {
        self.asset_codes.get(code).and_then(|id| self.assets.get(id))
    }

    pub fn person_by_code(&self, code: &Code) -> Option<&Person> {
        self.person_codes.get(code).and_then(|id| self.people.get(id))
    }

    pub fn open_loan_for(&self, asset_id: AssetId) -> Option<&LoanEpisode> {
        self.open_loans
            .get(&asset_id)
            .and_then(|id| self.loans.get(id))
    }

    pub fn open_maintenance_for(&self, asset_id: AssetId) -> Option<&MaintenanceEpisode> {
        self.open_maintenance
            .get(&asset_id)
            .and_then(|id| self.maintenance.get(id))
    }

    /// Derived lifecycle state, `None` for an unknown asset
    pub fn asset_state(&self, asset_id: AssetId) -> Option<AssetState> {
        self.assets.get(&asset_id)?;
        Some(AssetState::derive(
            self.open_loans.contains_key(&asset_id),
            self.open_maintenance.contains_key(&asset_id),
        ))
    }

    /// Latest instant at which an episode of this asset started or ended
    pub fn last_boundary(&self, asset_id: AssetId) -> Option<DateTime<Utc>> {
        self.boundaries.get(&asset_id).copied()
    }

    pub fn open_loans_for_person(&self, person_id: PersonId) -> impl Iterator<Item = &LoanEpisode> {
        self.loans
            .values()
            .filter(move |l| l.person_id == person_id && l.is_open())
    }

    pub fn asset_has_history(&self, asset_id: AssetId) -> bool {
        self.loans.values().any(|l| l.asset_id == asset_id)
            || self.maintenance.values().any(|m| m.asset_id == asset_id)
    }

    pub fn person_has_history(&self, person_id: PersonId) -> bool {
        self.loans.values().any(|l| l.person_id == person_id)
    }

    pub fn team_in_use(&self, team_id: TeamId) -> bool {
        self.people.values().any(|p| p.team_id == Some(team_id))
    }

    pub fn center_in_use(&self, center_id: CenterId) -> bool {
        self.people.values().any(|p| p.center_id == Some(center_id))
    }

    pub fn open_loan_count(&self) -> usize {
        self.open_loans.len()
    }

    pub fn open_maintenance_count(&self) -> usize {
        self.open_maintenance.len()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
