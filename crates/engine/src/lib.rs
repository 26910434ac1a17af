// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Radio pool lending and maintenance engine

mod config;
mod directory;
mod error;
mod lifecycle;
mod loans;
mod locks;
mod maintenance;
mod organization;
mod people;
mod registry;
mod runtime;
mod stats;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, EngineConfig, CONFIG_FILE};
pub use directory::{Directory, StoreDirectory};
pub use error::{EngineError, ErrorKind};
pub use people::PersonFilter;
pub use runtime::{Engine, EngineStatus};
pub use stats::{
    AssetUsage, BorrowerUsage, LoanStats, MaintenanceStats, MAINTENANCE_WINDOW_DAYS,
    OVERDUE_AFTER_DAYS,
};
