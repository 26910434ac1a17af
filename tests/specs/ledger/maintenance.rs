//! Maintenance specs

use crate::prelude::*;

fn radio() -> Project {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "add", "--brand", "Motorola", "--model", "DP4400"])
        .passes();
    temp
}

#[test]
fn maintenance_takes_a_radio_out_of_service() {
    let temp = radio();
    temp.rp()
        .args(&["maintenance", "start", "RAD-00001", "--description", "cracked antenna", "--operator", "Lee"])
        .passes()
        .stdout_has("Maintenance #1 opened on radio #1");

    temp.rp()
        .args(&["asset", "state", "RAD-00001"])
        .passes()
        .stdout_has("IN_MAINTENANCE");
    temp.rp()
        .args(&["asset", "show", "RAD-00001"])
        .passes()
        .stdout_has("cracked antenna (Lee)");

    temp.rp().args(&["person", "add", "Durand", "Alice"]).passes();
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .fails()
        .stderr_has("already in maintenance");

    temp.rp()
        .args(&["maintenance", "end", "1"])
        .passes()
        .stdout_has("Maintenance #1 closed");
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .passes();
}

#[test]
fn description_and_operator_are_required() {
    let temp = radio();
    temp.rp()
        .args(&["maintenance", "start", "RAD-00001", "--description", "", "--operator", "Lee"])
        .fails()
        .stderr_has("description");
}

#[test]
fn radio_under_maintenance_can_still_be_edited() {
    let temp = radio();
    temp.rp()
        .args(&["maintenance", "start", "RAD-00001", "--description", "firmware", "--operator", "Lee"])
        .passes();
    temp.rp()
        .args(&["asset", "edit", "RAD-00001", "--serial", "SN-9"])
        .passes();

    let list = temp.json(&["asset", "list"]);
    assert_eq!(list[0]["serial"], "SN-9");
}

#[test]
fn history_lists_episodes() {
    let temp = radio();
    temp.rp()
        .args(&["maintenance", "start", "RAD-00001", "--description", "battery", "--operator", "Lee"])
        .passes();
    temp.rp().args(&["maintenance", "end", "1"]).passes();
    temp.rp()
        .args(&["maintenance", "start", "RAD-00001", "--description", "strap", "--operator", "Kim"])
        .passes();

    let all = temp.json(&["maintenance", "list"]);
    assert_eq!(all.as_array().unwrap().len(), 2);

    temp.rp()
        .args(&["maintenance", "list", "--closed"])
        .passes()
        .stdout_has("battery")
        .stdout_lacks("strap");

    temp.rp()
        .args(&["maintenance", "end", "1"])
        .fails()
        .stderr_has("already closed");
}
