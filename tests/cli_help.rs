use assert_cmd::Command;

#[test]
fn help_lists_both_subcommands() {
    let assert = Command::cargo_bin("freqcmp").unwrap().arg("--help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("run"));
    assert!(stdout.contains("validate"));
}

#[test]
fn run_requires_the_release_arguments() {
    Command::cargo_bin("freqcmp").unwrap().arg("run").assert().failure();
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("freqcmp").unwrap().arg("frobnicate").assert().failure();
}
