// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-asset admission locks
//!
//! Each asset gets its own fair async mutex, so writers on one asset are
//! admitted in arrival order while different assets never contend. A slot
//! lives only while someone holds or waits on it.

use crate::error::EngineError;
use rp_core::AssetId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slots = HashMap<AssetId, Arc<AsyncMutex<()>>>;

#[derive(Debug)]
pub(crate) struct AssetLocks {
    locks: Mutex<Slots>,
    timeout: Duration,
}

/// Exclusive access to one asset; releasing it drops the slot once idle
#[derive(Debug)]
pub(crate) struct AssetGuard<'a> {
    locks: &'a AssetLocks,
    asset: AssetId,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for AssetGuard<'_> {
    fn drop(&mut self) {
        drop(self.held.take());
        self.locks.release(self.asset);
    }
}

impl AssetLocks {
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        self.locks.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn slot(&self, asset: AssetId) -> Arc<AsyncMutex<()>> {
        self.slots().entry(asset).or_default().clone()
    }

    /// Remove the slot of `asset` when the map holds its only reference
    ///
    /// Clones are only taken under the map lock, so a count of one cannot
    /// grow while we look at it.
    fn release(&self, asset: AssetId) {
        let mut slots = self.slots();
        if slots.get(&asset).is_some_and(|slot| Arc::strong_count(slot) == 1) {
            slots.remove(&asset);
        }
    }

    /// Wait for exclusive access to `asset`, giving up after the timeout
    pub(crate) async fn acquire(&self, asset: AssetId) -> Result<AssetGuard<'_>, EngineError> {
        let slot = self.slot(asset);
        let waited = tokio::time::timeout(self.timeout, slot.lock_owned()).await;
        match waited {
            Ok(held) => Ok(AssetGuard {
                locks: self,
                asset,
                held: Some(held),
            }),
            Err(_) => {
                self.release(asset);
                tracing::warn!(%asset, timeout = ?self.timeout, "asset lock wait expired");
                Err(EngineError::Timeout {
                    asset,
                    waited: self.timeout,
                })
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots().len()
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
