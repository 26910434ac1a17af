//! People, team and training center specs

use crate::prelude::*;

#[test]
fn person_gets_a_usr_code() {
    let temp = Project::empty();
    temp.rp()
        .args(&["person", "add", "Durand", "Alice"])
        .passes()
        .stdout_has("Registered USR-00001 (Durand Alice)");
}

#[test]
fn person_joins_a_team_and_center() {
    let temp = Project::empty();
    temp.rp()
        .args(&["team", "add", "Alpha", "--category", "rescue"])
        .passes()
        .stdout_has("Created team #1 Alpha");
    temp.rp()
        .args(&["center", "add", "North", "--manager", "Bob", "--phone", "555-0100"])
        .passes()
        .stdout_has("Created training center #1 North");
    temp.rp()
        .args(&["person", "add", "Durand", "Alice", "--team", "1", "--center", "1"])
        .passes();
    temp.rp()
        .args(&["person", "add", "Martin", "Paul"])
        .passes();

    temp.rp()
        .args(&["person", "list", "--team", "1"])
        .passes()
        .stdout_has("Durand Alice")
        .stdout_lacks("Martin Paul");
    temp.rp()
        .args(&["person", "show", "USR-00001"])
        .passes()
        .stdout_has("Team: #1")
        .stdout_has("Training center: #1");
}

#[test]
fn team_with_members_cannot_be_deleted() {
    let temp = Project::empty();
    temp.rp()
        .args(&["team", "add", "Alpha", "--category", "logistics"])
        .passes();
    temp.rp()
        .args(&["person", "add", "Durand", "Alice", "--team", "1"])
        .passes();

    temp.rp()
        .args(&["team", "rm", "1"])
        .fails()
        .stderr_has("still has members");

    temp.rp()
        .args(&["person", "edit", "USR-00001", "--no-team"])
        .passes();
    temp.rp()
        .args(&["team", "rm", "1"])
        .passes()
        .stdout_has("Deleted team #1");
}

#[test]
fn duplicate_team_names_conflict_regardless_of_case() {
    let temp = Project::empty();
    temp.rp()
        .args(&["team", "add", "Alpha", "--category", "rescue"])
        .passes();
    temp.rp()
        .args(&["team", "add", "ALPHA", "--category", "external"])
        .fails()
        .stderr_has("already exists");
}

#[test]
fn unknown_team_category_is_rejected() {
    let temp = Project::empty();
    temp.rp()
        .args(&["team", "add", "Alpha", "--category", "pirates"])
        .fails()
        .stderr_has("pirates");
}

#[test]
fn borrower_cannot_be_deleted() {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "add", "--brand", "Motorola", "--model", "DP4400"])
        .passes();
    temp.rp().args(&["person", "add", "Durand", "Alice"]).passes();
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .passes();
    temp.rp().args(&["loan", "end", "1"]).passes();

    temp.rp()
        .args(&["person", "rm", "USR-00001"])
        .fails()
        .stderr_has("loan history");
}

#[test]
fn rename_keeps_the_code() {
    let temp = Project::empty();
    temp.rp().args(&["person", "add", "Durand", "Alice"]).passes();
    temp.rp()
        .args(&["person", "edit", "1", "--last-name", "Dupont"])
        .passes()
        .stdout_has("Updated USR-00001");
    temp.rp()
        .args(&["person", "list"])
        .passes()
        .stdout_has("Dupont Alice");
}
