// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Radio pool daemon (rpd) library
//!
//! The wire protocol is shared with the `rp` CLI; lifecycle and server are
//! used by the `rpd` binary.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod lifecycle;
pub mod protocol;
pub mod server;

pub use lifecycle::{Config, DaemonState, LifecycleError};
pub use protocol::{
    AssetDetail, AssetRef, PersonDetail, PersonRef, ProtocolError, RecordRef, Request, Response,
    StatsReport, PROTOCOL_VERSION,
};

/// Startup marker prefix written to log before anything else.
/// The CLI uses this to find where the current startup attempt begins.
/// Full format: "--- rpd: starting (pid: 12345)"
pub const STARTUP_MARKER_PREFIX: &str = "--- rpd: starting (pid: ";
