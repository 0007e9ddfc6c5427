use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn shelflife() -> Command {
    Command::cargo_bin("shelflife").unwrap()
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn extract_from_stdin() {
    let json = stdout_json(
        shelflife()
            .arg("extract")
            .write_stdin("FRESH YOGHURT\nMFG: 01/01/2024\nEXP: 01/07/2024\n"),
    );
    assert_eq!(json["success"], true);
    assert_eq!(json["expiry_date_raw"], "01/07/2024");
    assert_eq!(json["manufacturing_date_raw"], "01/01/2024");
    assert_eq!(json["normalized_expiry"]["canonical"], "2024-07-01");
    assert!(json.get("expiry_status").is_none());
}

#[test]
fn extract_from_file_with_today() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("label.txt");
    std::fs::write(&path, "Best Before: 12-03-2024\n").unwrap();

    let json = stdout_json(
        shelflife()
            .arg("extract")
            .arg(&path)
            .args(["--today", "2024-03-10"]),
    );
    assert_eq!(json["success"], true);
    assert_eq!(json["manufacturing_date_raw"], "not detected");
    assert_eq!(json["expiry_status"]["status"], "expiring_soon");
    assert_eq!(json["expiry_status"]["days_left"], 2);
}

#[test]
fn extract_reports_not_found() {
    let json = stdout_json(shelflife().arg("extract").write_stdin("Net wt 250g\n"));
    assert_eq!(json["success"], false);
    assert_eq!(json["failure"], "not_found");
    assert_eq!(json["message"], "no expiry date found");
    assert_eq!(json["raw_text"], "Net wt 250g\n");
}

#[test]
fn extract_reports_ordering_violation() {
    let json = stdout_json(
        shelflife()
            .arg("extract")
            .write_stdin("MFG: 01/07/2024\nEXP: 01/01/2024\n"),
    );
    assert_eq!(json["success"], false);
    assert_eq!(json["failure"], "ordering_violation");
}

#[test]
fn config_file_overrides_labels_and_window() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("shelflife.toml");
    std::fs::write(
        &config,
        "notification_days = 10\n[labels]\nexpiry = [\"Expires\"]\n",
    )
    .unwrap();

    let json = stdout_json(
        shelflife()
            .arg("--config")
            .arg(&config)
            .args(["extract", "--today", "2024-03-01"])
            .write_stdin("Expires 08.03.2024"),
    );
    assert_eq!(json["expiry_date_raw"], "08.03.2024");
    assert_eq!(json["expiry_status"]["status"], "expiring_soon");
    assert_eq!(json["expiry_status"]["days_left"], 7);
}

#[test]
fn missing_input_file_fails() {
    shelflife()
        .args(["extract", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "notification_days = -1\n").unwrap();

    shelflife()
        .arg("--config")
        .arg(&config)
        .arg("extract")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn normalize_tokens() {
    let json = stdout_json(shelflife().args(["normalize", "03-04-2024", "15 - JAN - 2024", "??"]));
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["normalized"]["canonical"], "2024-04-03");
    assert_eq!(items[0]["template"], "DD-MM-YYYY");
    assert_eq!(items[1]["normalized"]["canonical"], "2024-01-15");
    assert_eq!(items[2]["normalized"]["unparsed"], "??");
    assert!(items[2].get("template").is_none());
}

#[test]
fn normalize_requires_a_token() {
    shelflife().arg("normalize").assert().failure();
}
