//! Daemon lifecycle specs
//!
//! Verify daemon start/stop/status lifecycle.

use crate::prelude::*;

#[test]
fn daemon_status_when_not_running() {
    let temp = Project::empty();
    temp.rp()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn daemon_start_reports_success() {
    let temp = Project::empty();
    temp.rp()
        .args(&["daemon", "start"])
        .passes()
        .stdout_has("Daemon started");
}

#[test]
fn second_start_finds_the_running_daemon() {
    let temp = Project::empty();
    temp.rp().args(&["daemon", "start"]).passes();
    temp.rp()
        .args(&["daemon", "start"])
        .passes()
        .stdout_has("already running");
}

#[test]
fn daemon_status_shows_counts_and_uptime() {
    let temp = Project::empty();
    temp.rp().args(&["daemon", "start"]).passes();
    temp.rp()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Daemon running")
        .stdout_has("Uptime:")
        .stdout_has("Radios: 0");
}

#[test]
fn daemon_stop_then_status() {
    let temp = Project::empty();
    temp.rp().args(&["daemon", "start"]).passes();
    temp.rp()
        .args(&["daemon", "stop"])
        .passes()
        .stdout_has("Daemon stopped");
    temp.rp()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn daemon_writes_version_file_under_state_root() {
    let temp = Project::empty();
    temp.rp().args(&["daemon", "start"]).passes();

    let found = wait_for(SPEC_WAIT_MAX_MS, || {
        temp.ledger_dirs()
            .iter()
            .any(|dir| dir.join("daemon.version").exists())
    });
    assert!(found, "no daemon.version under {}", temp.state_path().display());
}

#[test]
fn commands_start_the_daemon_on_demand() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "list"])
        .passes()
        .stdout_has("No radios");
    temp.rp()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Daemon running");
}

#[test]
fn invalid_config_fails_startup_with_its_reason() {
    let temp = Project::empty();
    temp.file("rp.toml", "lock_timeout = 12\n");
    temp.rp()
        .args(&["asset", "list"])
        .fails()
        .stderr_has("Failed to start the daemon")
        .stderr_has("rp.toml");
}

#[test]
fn ledger_survives_a_daemon_restart() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "add", "--brand", "Motorola", "--model", "DP4400"])
        .passes();
    temp.rp().args(&["daemon", "stop"]).passes();

    temp.rp()
        .args(&["asset", "list"])
        .passes()
        .stdout_has("RAD-00001")
        .stdout_has("Motorola");
}
