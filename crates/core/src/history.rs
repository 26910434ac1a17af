// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filtering and pagination over loan and maintenance history

use crate::id::{AssetId, PersonId};
use crate::loan::LoanEpisode;
use crate::maintenance::MaintenanceEpisode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    Open,
    Closed,
}

/// Something with an open/closed lifetime that can be listed
pub trait Episode {
    fn asset_id(&self) -> AssetId;
    fn person_id(&self) -> Option<PersonId>;
    fn opened_at(&self) -> DateTime<Utc>;
    fn closed_at(&self) -> Option<DateTime<Utc>>;

    fn status(&self) -> EpisodeStatus {
        match self.closed_at() {
            Some(_) => EpisodeStatus::Closed,
            None => EpisodeStatus::Open,
        }
    }
}

impl Episode for LoanEpisode {
    fn asset_id(&self) -> AssetId {
        self.asset_id
    }
    fn person_id(&self) -> Option<PersonId> {
        Some(self.person_id)
    }
    fn opened_at(&self) -> DateTime<Utc> {
        self.borrowed_at
    }
    fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.returned_at
    }
}

impl Episode for MaintenanceEpisode {
    fn asset_id(&self) -> AssetId {
        self.asset_id
    }
    fn person_id(&self) -> Option<PersonId> {
        None
    }
    fn opened_at(&self) -> DateTime<Utc> {
        self.started_at
    }
    fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }
}

/// Criteria for listing episodes. Every criterion left as `None` matches all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    #[serde(default)]
    pub status: Option<EpisodeStatus>,
    #[serde(default)]
    pub asset_id: Option<AssetId>,
    #[serde(default)]
    pub person_id: Option<PersonId>,
    /// Only episodes opened at or after this instant
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl HistoryFilter {
    pub fn for_asset(asset_id: AssetId) -> Self {
        Self {
            asset_id: Some(asset_id),
            ..Self::default()
        }
    }

    pub fn for_person(person_id: PersonId) -> Self {
        Self {
            person_id: Some(person_id),
            ..Self::default()
        }
    }

    pub fn matches<E: Episode>(&self, episode: &E) -> bool {
        if self.status.is_some_and(|s| s != episode.status()) {
            return false;
        }
        if self.asset_id.is_some_and(|a| a != episode.asset_id()) {
            return false;
        }
        // A person criterion never matches episodes that have no person.
        if let Some(person) = self.person_id {
            if episode.person_id() != Some(person) {
                return false;
            }
        }
        if self.since.is_some_and(|since| episode.opened_at() < since) {
            return false;
        }
        true
    }

    /// Select matching episodes, newest first, then apply offset and limit.
    ///
    /// Ties on the opening instant fall back to insertion order reversed, so
    /// callers should pass episodes in id order.
    pub fn apply<'a, E, I>(&self, episodes: I) -> Vec<E>
    where
        E: Episode + Clone + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let mut selected: Vec<E> = episodes
            .into_iter()
            .filter(|e| self.matches(*e))
            .cloned()
            .collect();
        selected.reverse();
        selected.sort_by(|a, b| b.opened_at().cmp(&a.opened_at()));
        let rest = selected.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => rest.take(limit).collect(),
            None => rest.collect(),
        }
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
