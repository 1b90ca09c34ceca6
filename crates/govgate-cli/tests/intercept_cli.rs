//! End-to-end tests of the govgate binary against a materialized governance root.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn govgate() -> Command {
    Command::cargo_bin("govgate").expect("govgate binary not found")
}

fn governed_root() -> TempDir {
    let tmp = TempDir::new().expect("temp dir");
    govgate_test_util::write_governance_fixture(tmp.path()).expect("fixture");
    tmp
}

fn write_payload(root: &TempDir, name: &str, json: &str) -> String {
    let path = root.path().join(name);
    std::fs::write(&path, json).expect("write payload");
    path.to_str().expect("utf8 path").to_string()
}

#[test]
fn approved_payload_exits_zero() {
    let root = governed_root();
    let payload = write_payload(&root, "payload.json", r#"{"value": "MSCU1234567"}"#);

    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
        .args(["--payload", &payload])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"APPROVED\""));
}

#[test]
fn blocked_payload_exits_two_and_names_the_rule() {
    let root = governed_root();
    let payload = write_payload(&root, "payload.json", r#"{"value": "not-a-container"}"#);

    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
        .args(["--payload", &payload])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"outcome\": \"BLOCKED\""))
        .stdout(predicate::str::contains("2021"));
}

#[test]
fn wrong_claimed_hash_exits_three() {
    let root = governed_root();
    let payload = write_payload(&root, "payload.json", r#"{"value": "MSCU1234567"}"#);

    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
        .args(["--payload", &payload])
        .args(["--claimed-hash", "deadbeef"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("\"outcome\": \"SECURITY_REJECTED\""));
}

#[test]
fn fingerprint_output_round_trips_as_the_handshake() {
    let root = governed_root();
    let payload = write_payload(&root, "payload.json", r#"{"value": "MSCU1234567"}"#);

    let output = govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .arg("fingerprint")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("fingerprint json");
    assert_eq!(report["schema"], "govgate.fingerprint.v1");
    let master = report["master_hash"].as_str().expect("master hash");
    assert_eq!(master.len(), 64);

    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
        .args(["--payload", &payload])
        .args(["--claimed-hash", master])
        .assert()
        .success();
}

#[test]
fn require_handshake_rejects_bare_calls() {
    let root = governed_root();
    let payload = write_payload(&root, "payload.json", r#"{"value": "MSCU1234567"}"#);

    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .arg("--require-handshake")
        .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
        .args(["--payload", &payload])
        .assert()
        .code(3);
}

#[test]
fn every_decision_lands_in_the_audit_ledger() {
    let root = governed_root();
    let good = write_payload(&root, "good.json", r#"{"value": "MSCU1234567"}"#);
    let bad = write_payload(&root, "bad.json", r#"{"value": "nope"}"#);

    for payload in [&good, &bad] {
        govgate()
            .args(["--governance-root", root.path().to_str().unwrap()])
            .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
            .args(["--payload", payload])
            .assert();
    }

    let ledger_dir = root.path().join("audit_logs");
    let entries: Vec<_> = std::fs::read_dir(&ledger_dir)
        .expect("ledger dir")
        .collect::<Result<_, _>>()
        .expect("ledger entries");
    assert_eq!(entries.len(), 1, "one daily ledger file");
    let text = std::fs::read_to_string(entries[0].path()).expect("read ledger");
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn payload_from_stdin_is_accepted() {
    let root = governed_root();

    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
        .args(["--payload", "-"])
        .write_stdin(r#"{"value": "MSCU1234567"}"#)
        .assert()
        .success();
}

#[test]
fn non_object_payload_is_a_usage_error() {
    let root = governed_root();

    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
        .args(["--payload", "-"])
        .write_stdin("[1, 2, 3]")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be a JSON object"));
}

#[test]
fn missing_governance_root_is_an_error() {
    govgate()
        .args(["--governance-root", "/nonexistent/governance"])
        .arg("fingerprint")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn config_file_sets_the_audit_directory() {
    let root = governed_root();
    let payload = write_payload(&root, "payload.json", r#"{"value": "MSCU1234567"}"#);
    std::fs::write(root.path().join("govgate.toml"), r#"audit_dir = "ledger""#)
        .expect("write config");

    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["intercept", "--process", govgate_test_util::PROCESS_CONTAINER_INTAKE])
        .args(["--payload", &payload])
        .assert()
        .success();

    assert!(root.path().join("ledger").exists());
    assert!(!root.path().join("audit_logs").exists());
}

#[test]
fn as_of_controls_temporal_bindings() {
    let root = governed_root();
    let payload = write_payload(&root, "payload.json", r#"{"value": 150}"#);

    // Outside the archived binding's window the process is ungoverned.
    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["--as-of", "2026-01-01"])
        .args(["intercept", "--process", govgate_test_util::PROCESS_ARCHIVED_REPORT])
        .args(["--payload", &payload])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rule_count\": 0"));

    // Inside the window the WARNING percentage rule runs (still approved).
    govgate()
        .args(["--governance-root", root.path().to_str().unwrap()])
        .args(["--as-of", "2020-06-01"])
        .args(["intercept", "--process", govgate_test_util::PROCESS_ARCHIVED_REPORT])
        .args(["--payload", &payload])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rule_count\": 1"));
}
