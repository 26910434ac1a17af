//! CLI help specs
//!
//! Verify help output lists the command groups.

use crate::prelude::*;

#[test]
fn help_lists_command_groups() {
    let temp = Project::empty();
    let out = temp.rp().args(&["--help"]).passes().stdout();
    for group in ["asset", "person", "team", "center", "loan", "maintenance", "stats", "daemon"] {
        assert!(out.contains(group), "missing {group} in:\n{out}");
    }
}

#[test]
fn loan_help_lists_subcommands() {
    let temp = Project::empty();
    temp.rp()
        .args(&["loan", "--help"])
        .passes()
        .stdout_has("start")
        .stdout_has("end")
        .stdout_has("comment");
}

#[test]
fn completions_do_not_need_a_daemon() {
    let temp = Project::empty();
    temp.rp()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("rp");
    assert!(temp.ledger_dirs().is_empty());
}
