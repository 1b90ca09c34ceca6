use assert_cmd::Command;

/// Helper to get a Command for the govgate binary.
#[allow(deprecated)]
fn govgate_cmd() -> Command {
    Command::cargo_bin("govgate").unwrap()
}

#[test]
fn help_works() {
    govgate_cmd().arg("--help").assert().success();
}

#[test]
fn intercept_help_names_the_handshake_flag() {
    govgate_cmd()
        .args(["intercept", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("claimed-hash"));
}
