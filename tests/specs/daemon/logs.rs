//! Daemon logs specs
//!
//! Verify daemon logs command behavior.

use crate::prelude::*;

#[test]
fn daemon_logs_show_the_startup_marker() {
    let temp = Project::empty();
    temp.rp().args(&["daemon", "start"]).passes();

    temp.rp()
        .args(&["daemon", "logs", "-n", "20"])
        .passes()
        .stdout_has("rpd: starting");
}

#[test]
fn daemon_logs_without_a_daemon() {
    let temp = Project::empty();
    temp.rp()
        .args(&["daemon", "logs"])
        .passes()
        .stdout_has("No log");
}
