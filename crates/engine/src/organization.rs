// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Teams and training centers

use crate::directory::Directory;
use crate::error::EngineError;
use crate::runtime::Engine;
use rp_core::{
    CenterId, Clock, NewCenter, NewTeam, Operation, Team, TeamId, TrainingCenter,
};

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl<C: Clock, D: Directory> Engine<C, D> {
    pub fn create_team(&self, team: NewTeam) -> Result<Team, EngineError> {
        team.validate()?;
        let now = self.clock.now();
        let team = self.store.commit(|state| -> Result<_, EngineError> {
            if state.teams.values().any(|t| same_name(&t.name, &team.name)) {
                return Err(EngineError::Conflict(format!(
                    "team {:?} already exists",
                    team.name
                )));
            }
            let team = Team {
                id: TeamId(state.ids().team + 1),
                name: team.name.trim().to_string(),
                category: team.category,
                created_at: now,
            };
            Ok((Operation::TeamCreate { team: team.clone() }, team))
        })?;
        tracing::info!(team = %team.id, name = %team.name, "team created");
        Ok(team)
    }

    /// Remove a team no person belongs to
    pub async fn delete_team(&self, id: TeamId) -> Result<Team, EngineError> {
        let _refs = self.references.lock().await;
        let team = self.store.commit(|state| -> Result<_, EngineError> {
            let team = state
                .teams
                .get(&id)
                .ok_or_else(|| EngineError::not_found("team", id))?;
            if state.team_in_use(id) {
                return Err(EngineError::Conflict(format!(
                    "team {:?} still has members",
                    team.name
                )));
            }
            Ok((Operation::TeamDelete { id }, team.clone()))
        })?;
        tracing::info!(team = %team.id, "team deleted");
        Ok(team)
    }

    pub fn get_team(&self, id: TeamId) -> Result<Team, EngineError> {
        self.store
            .read(|s| s.teams.get(&id).cloned())
            .ok_or_else(|| EngineError::not_found("team", id))
    }

    pub fn list_teams(&self) -> Vec<Team> {
        self.store.read(|s| s.teams.values().cloned().collect())
    }

    pub fn create_center(&self, center: NewCenter) -> Result<TrainingCenter, EngineError> {
        center.validate()?;
        let now = self.clock.now();
        let center = self.store.commit(|state| -> Result<_, EngineError> {
            if state
                .centers
                .values()
                .any(|c| same_name(&c.name, &center.name))
            {
                return Err(EngineError::Conflict(format!(
                    "training center {:?} already exists",
                    center.name
                )));
            }
            let center = TrainingCenter::new(CenterId(state.ids().center + 1), center, now);
            Ok((
                Operation::CenterCreate {
                    center: center.clone(),
                },
                center,
            ))
        })?;
        tracing::info!(center = %center.id, name = %center.name, "training center created");
        Ok(center)
    }

    /// Remove a training center no person is attached to
    pub async fn delete_center(&self, id: CenterId) -> Result<TrainingCenter, EngineError> {
        let _refs = self.references.lock().await;
        let center = self.store.commit(|state| -> Result<_, EngineError> {
            let center = state
                .centers
                .get(&id)
                .ok_or_else(|| EngineError::not_found("training center", id))?;
            if state.center_in_use(id) {
                return Err(EngineError::Conflict(format!(
                    "training center {:?} still has people attached",
                    center.name
                )));
            }
            Ok((Operation::CenterDelete { id }, center.clone()))
        })?;
        tracing::info!(center = %center.id, "training center deleted");
        Ok(center)
    }

    pub fn get_center(&self, id: CenterId) -> Result<TrainingCenter, EngineError> {
        self.store
            .read(|s| s.centers.get(&id).cloned())
            .ok_or_else(|| EngineError::not_found("training center", id))
    }

    pub fn list_centers(&self) -> Vec<TrainingCenter> {
        self.store.read(|s| s.centers.values().cloned().collect())
    }
}

#[cfg(test)]
#[path = "organization_tests.rs"]
mod tests;
