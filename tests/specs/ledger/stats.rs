//! Statistics specs

use crate::prelude::*;

#[test]
fn empty_ledger_has_zero_stats() {
    let temp = Project::empty();
    temp.rp()
        .args(&["stats"])
        .passes()
        .stdout_has("Total: 0")
        .stdout_has("Mean duration: -");
}

#[test]
fn stats_rank_the_most_borrowed() {
    let temp = Project::empty();
    for model in ["DP4400", "DP4800"] {
        temp.rp()
            .args(&["asset", "add", "--brand", "Motorola", "--model", model])
            .passes();
    }
    temp.rp().args(&["person", "add", "Durand", "Alice"]).passes();

    for _ in 0..2 {
        temp.rp()
            .args(&["loan", "start", "RAD-00002", "USR-00001"])
            .passes();
        let open = temp.json(&["loan", "list", "--open"]);
        let id = open[0]["id"].to_string();
        temp.rp().args(&["loan", "end", &id]).passes();
    }
    temp.rp()
        .args(&["loan", "start", "RAD-00001", "USR-00001"])
        .passes();

    let report = temp.json(&["stats", "--top", "1"]);
    assert_eq!(report["loans"]["total"], 3);
    assert_eq!(report["loans"]["active"], 1);
    assert_eq!(report["top_assets"].as_array().unwrap().len(), 1);
    assert_eq!(report["top_assets"][0]["code"], "RAD-00002");
    assert_eq!(report["top_borrowers"][0]["loans"], 3);

    temp.rp()
        .args(&["stats"])
        .passes()
        .stdout_has("Most borrowed radios")
        .stdout_has("Durand Alice");
}
