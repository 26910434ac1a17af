// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreign-key lookups for people
//!
//! The engine asks a [`Directory`] whether a team or training center exists
//! before it attaches a person to one. The default implementation answers
//! from the engine's own store.

use async_trait::async_trait;
use rp_core::{CenterId, TeamId};
use rp_storage::Store;
use std::sync::Arc;

#[async_trait]
pub trait Directory: Send + Sync + 'static {
    async fn team_exists(&self, id: TeamId) -> bool;
    async fn center_exists(&self, id: CenterId) -> bool;
}

/// Directory backed by the teams and centers tables of a store
#[derive(Clone)]
pub struct StoreDirectory {
    store: Arc<Store>,
}

impl StoreDirectory {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Directory for StoreDirectory {
    async fn team_exists(&self, id: TeamId) -> bool {
        self.store.read(|s| s.teams.contains_key(&id))
    }

    async fn center_exists(&self, id: CenterId) -> bool {
        self.store.read(|s| s.centers.contains_key(&id))
    }
}
