//! Shared harness for the CLI specs.
//!
//! Every `Project` gets its own data directory, state root and socket
//! directory, so specs run in parallel without sharing a daemon. The
//! daemon a project starts is stopped when the project is dropped.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use assert_cmd::assert::Assert;
use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

/// Upper bound for anything a spec polls for
pub const SPEC_WAIT_MAX_MS: u64 = 5_000;

/// Poll `check` until it holds or `max_ms` elapses
pub fn wait_for(max_ms: u64, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(max_ms);
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    check()
}

pub struct Project {
    data: TempDir,
    state: TempDir,
    sockets: TempDir,
}

impl Project {
    /// A data directory with an empty `rp.toml`
    pub fn empty() -> Self {
        let project = Self {
            data: TempDir::new().unwrap(),
            state: TempDir::new().unwrap(),
            sockets: TempDir::new().unwrap(),
        };
        project.file("rp.toml", "");
        project
    }

    pub fn path(&self) -> &Path {
        self.data.path()
    }

    /// XDG state root handed to the daemon
    pub fn state_path(&self) -> &Path {
        self.state.path()
    }

    pub fn socket_dir(&self) -> &Path {
        self.sockets.path()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.data.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// The per-ledger state directory under the state root
    pub fn ledger_dirs(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.state.path().join("rp/ledgers"))
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    pub fn rp(&self) -> CliBuilder {
        let mut cmd = Command::new(cargo_bin("rp"));
        cmd.current_dir(self.data.path())
            .env("RP_DATA_DIR", self.data.path())
            .env("RP_DAEMON_BINARY", cargo_bin("rpd"))
            .env("RP_SOCKET_DIR", self.sockets.path())
            .env("XDG_STATE_HOME", self.state.path())
            .env("RP_TIMEOUT_CONNECT_MS", SPEC_WAIT_MAX_MS.to_string())
            .env_remove("RUST_LOG");
        CliBuilder { cmd }
    }

    /// Run `rp <args> -o json` and parse stdout
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = args.to_vec();
        full.extend(["-o", "json"]);
        let out = self.rp().args(&full).passes().stdout();
        serde_json::from_str(&out).unwrap()
    }
}

impl Drop for Project {
    fn drop(&mut self) {
        let _ = self.rp().args(&["daemon", "stop"]).cmd.output();
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().failure())
    }
}

pub struct RunAssert(Assert);

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self(self.0.stdout(contains(expected)))
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self(self.0.stdout(contains(unexpected).not()))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self(self.0.stderr(contains(expected)))
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).into_owned()
    }
}
