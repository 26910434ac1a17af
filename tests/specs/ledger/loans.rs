//! Loan specs
//!
//! Verify the lend/return cycle and the exclusivity of a radio's state.

use crate::prelude::*;

fn radio_and_borrower() -> Project {
    let temp = Project::empty();
    temp.rp()
        .args(&["asset", "add", "--brand", "Motorola", "--model", "DP4400"])
        .passes();
    temp.rp().args(&["person", "add", "Durand", "Alice"]).passes();
    temp
}

#[test]
fn lend_and_return() {
    let temp = radio_and_borrower();

    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001", "--accessories", "both"])
        .passes()
        .stdout_has("Loan #1 opened");
    temp.rp()
        .args(&["asset", "state", "RAD-00001"])
        .passes()
        .stdout_has("ON_LOAN");
    temp.rp()
        .args(&["asset", "show", "RAD-00001"])
        .passes()
        .stdout_has("Loan: #1 to person #1");

    temp.rp()
        .args(&["loan", "end", "1"])
        .passes()
        .stdout_has("Loan #1 closed");
    temp.rp()
        .args(&["asset", "state", "RAD-00001"])
        .passes()
        .stdout_has("AVAILABLE");
}

#[test]
fn radio_on_loan_cannot_be_lent_again() {
    let temp = radio_and_borrower();
    temp.rp().args(&["person", "add", "Martin", "Paul"]).passes();
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .passes();

    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00002"])
        .fails()
        .stderr_has("already loaned")
        .stderr_has("rp asset show");
}

#[test]
fn radio_on_loan_cannot_go_to_maintenance() {
    let temp = radio_and_borrower();
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .passes();

    temp.rp()
        .args(&["maintenance", "start", "RAD-00001", "--description", "x", "--operator", "Ops"])
        .fails()
        .stderr_has("already loaned");
}

#[test]
fn closing_twice_is_refused() {
    let temp = radio_and_borrower();
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .passes();
    temp.rp().args(&["loan", "end", "1"]).passes();

    temp.rp()
        .args(&["loan", "end", "1"])
        .fails()
        .stderr_has("already closed");
}

#[test]
fn comment_can_be_replaced_and_cleared() {
    let temp = radio_and_borrower();
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001", "--comment", "exercise"])
        .passes();

    let loan = temp.json(&["loan", "show", "1"]);
    assert_eq!(loan["comment"], "exercise");

    temp.rp()
        .args(&["loan", "comment", "1", "night shift"])
        .passes();
    let loan = temp.json(&["loan", "show", "1"]);
    assert_eq!(loan["comment"], "night shift");

    temp.rp().args(&["loan", "comment", "1"]).passes();
    let loan = temp.json(&["loan", "show", "1"]);
    assert!(loan["comment"].is_null());
}

#[test]
fn person_shows_what_they_hold() {
    let temp = radio_and_borrower();
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .passes();

    temp.rp()
        .args(&["person", "show", "USR-00001"])
        .passes()
        .stdout_has("loan #1 radio #1");
}

#[test]
fn history_filters_by_status_and_person() {
    let temp = radio_and_borrower();
    temp.rp()
        .args(&["asset", "add", "--brand", "Kenwood", "--model", "NX-3220"])
        .passes();
    temp.rp().args(&["person", "add", "Martin", "Paul"]).passes();

    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .passes();
    temp.rp().args(&["loan", "end", "1"]).passes();
    temp.rp()
        .args(&["loan", "start", "RAD-00002", "USR-00002"])
        .passes();

    let open = temp.json(&["loan", "list", "--open"]);
    let open = open.as_array().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["id"], 2);

    let alice = temp.json(&["loan", "list", "--person", "USR-00001"]);
    let alice = alice.as_array().unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0]["id"], 1);

    let radio = temp.json(&["loan", "list", "--asset", "RAD-00002"]);
    assert_eq!(radio.as_array().unwrap().len(), 1);

    temp.rp()
        .args(&["loan", "list", "--closed"])
        .passes()
        .stdout_has("BORROWED");
}
