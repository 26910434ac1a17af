// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable store: materialized state behind a write-ahead log
//!
//! All writes go through [`Store::commit`], which holds one lock across the
//! decision, the log append and the apply, so the store has a single writer
//! at a time. A decision that fails writes nothing. A failed append is cut
//! back off the log and leaves the state untouched; if the log cannot be cut
//! back, every later commit fails with [`WalError::Poisoned`].

use crate::state::MaterializedState;
use crate::wal::{Wal, WalError};
use rp_core::Operation;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

struct Inner {
    state: MaterializedState,
    wal: Option<Wal>,
}

pub struct Store {
    inner: Mutex<Inner>,
}

impl Store {
    /// Open the store at `path`, replaying the log into memory
    pub fn open(path: &Path) -> Result<Self, WalError> {
        let (wal, ops) = Wal::open(path)?;
        let mut state = MaterializedState::default();
        for op in &ops {
            state.apply(op);
        }
        Ok(Self {
            inner: Mutex::new(Inner {
                state,
                wal: Some(wal),
            }),
        })
    }

    /// A store that keeps everything in memory
    pub fn ephemeral() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: MaterializedState::default(),
                wal: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Decide an operation against the current state and persist it atomically
    ///
    /// `decide` sees the state as of this commit and returns the operation to
    /// log plus a value computed from it. The operation is appended to the
    /// log and then applied before the lock is released.
    pub fn commit<T, E, F>(&self, decide: F) -> Result<T, E>
    where
        F: FnOnce(&MaterializedState) -> Result<(Operation, T), E>,
        E: From<WalError>,
    {
        let mut inner = self.lock();
        let (op, value) = decide(&inner.state)?;
        if let Some(wal) = inner.wal.as_mut() {
            wal.append(&op)?;
        }
        inner.state.apply(&op);
        Ok(value)
    }

    /// Read from the current state
    pub fn read<R>(&self, f: impl FnOnce(&MaterializedState) -> R) -> R {
        f(&self.lock().state)
    }

    /// Number of entries in the log (0 for an ephemeral store)
    pub fn sequence(&self) -> u64 {
        self.lock().wal.as_ref().map(Wal::sequence).unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
