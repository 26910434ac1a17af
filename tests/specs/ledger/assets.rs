//! Radio inventory specs
//!
//! Verify registration, editing, listing and deletion of radios.

use crate::prelude::*;

fn add_radio(temp: &Project, brand: &str, model: &str) {
    temp.rp()
        .args(&["asset", "add", "--brand", brand, "--model", model])
        .passes();
}

#[test]
fn add_assigns_sequential_codes() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "add", "--brand", "Motorola", "--model", "DP4400"])
        .passes()
        .stdout_has("Registered RAD-00001 (Motorola DP4400)");
    temp.rp()
        .args(&["asset", "add", "--brand", "Kenwood", "--model", "NX-3220", "--serial", "K-77"])
        .passes()
        .stdout_has("Registered RAD-00002");
}

#[test]
fn list_shows_every_radio() {
    let temp = Project::empty();
    add_radio(&temp, "Motorola", "DP4400");
    add_radio(&temp, "Kenwood", "NX-3220");

    temp.rp()
        .args(&["asset", "list"])
        .passes()
        .stdout_has("CODE")
        .stdout_has("RAD-00001")
        .stdout_has("RAD-00002");
}

#[test]
fn new_radio_is_available() {
    let temp = Project::empty();
    add_radio(&temp, "Motorola", "DP4400");

    temp.rp()
        .args(&["asset", "state", "RAD-00001"])
        .passes()
        .stdout_has("RAD-00001 AVAILABLE");

    let state = temp.json(&["asset", "state", "1"]);
    assert_eq!(state["state"], "AVAILABLE");
}

#[test]
fn edit_changes_attributes_but_not_the_code() {
    let temp = Project::empty();
    add_radio(&temp, "Motorola", "DP4400");

    temp.rp()
        .args(&["asset", "edit", "RAD-00001", "--model", "DP4800", "--serial", "SN-1"])
        .passes()
        .stdout_has("Updated RAD-00001");

    let detail = temp.json(&["asset", "show", "RAD-00001"]);
    assert_eq!(detail["asset"]["model"], "DP4800");
    assert_eq!(detail["asset"]["serial"], "SN-1");
    assert_eq!(detail["asset"]["code"], "RAD-00001");
}

#[test]
fn clear_serial_removes_it() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "add", "--brand", "Motorola", "--model", "DP4400", "--serial", "SN-1"])
        .passes();
    temp.rp()
        .args(&["asset", "edit", "RAD-00001", "--clear-serial"])
        .passes();

    let detail = temp.json(&["asset", "show", "RAD-00001"]);
    assert!(detail["asset"]["serial"].is_null());
}

#[test]
fn unused_radio_can_be_deleted_and_its_code_is_not_reused() {
    let temp = Project::empty();
    add_radio(&temp, "Motorola", "DP4400");
    temp.rp()
        .args(&["asset", "rm", "RAD-00001"])
        .passes()
        .stdout_has("Deleted RAD-00001");
    temp.rp()
        .args(&["asset", "list"])
        .passes()
        .stdout_has("No radios");

    temp.rp()
        .args(&["asset", "add", "--brand", "Kenwood", "--model", "NX-3220"])
        .passes()
        .stdout_has("RAD-00002");
}

#[test]
fn radio_with_history_cannot_be_deleted() {
    let temp = Project::empty();
    add_radio(&temp, "Motorola", "DP4400");
    temp.rp()
        .args(&["maintenance", "start", "RAD-00001", "--description", "antenna", "--operator", "Ops"])
        .passes();
    temp.rp().args(&["maintenance", "end", "1"]).passes();

    temp.rp()
        .args(&["asset", "rm", "RAD-00001"])
        .fails()
        .stderr_has("cannot be deleted");
}

#[test]
fn list_filters_by_state() {
    let temp = Project::empty();
    add_radio(&temp, "Motorola", "DP4400");
    add_radio(&temp, "Kenwood", "NX-3220");
    temp.rp()
        .args(&["maintenance", "start", "RAD-00002", "--description", "battery", "--operator", "Ops"])
        .passes();

    temp.rp()
        .args(&["asset", "list", "--state", "in-maintenance"])
        .passes()
        .stdout_has("RAD-00002")
        .stdout_lacks("RAD-00001");

    let available = temp.json(&["asset", "list", "--state", "available"]);
    let codes: Vec<&str> = available
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["RAD-00001"]);
}
