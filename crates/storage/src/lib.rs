// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rp-storage: WAL-backed persistence for the radio pool

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

mod state;
mod store;
mod wal;

pub use state::{IdCounters, MaterializedState};
pub use store::Store;
pub use wal::{Wal, WalError};
