//! CLI error specs
//!
//! Verify rejected requests surface as readable errors with a failing exit code.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    let temp = Project::empty();
    temp.rp().args(&["frobnicate"]).fails();
}

#[test]
fn malformed_code_is_rejected_by_the_parser() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "show", "RAD-abc"])
        .fails()
        .stderr_has("RAD-abc");
}

#[test]
fn unknown_radio_suggests_listing() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "show", "RAD-00042"])
        .fails()
        .stderr_has("not found")
        .stderr_has("rp asset list");
}

#[test]
fn blank_brand_is_a_validation_error() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "add", "--brand", " ", "--model", "DP4400"])
        .fails()
        .stderr_has("brand");
}

#[test]
fn empty_edit_is_refused() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "edit", "RAD-00001"])
        .fails()
        .stderr_has("nothing to change");
}
