use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn see() -> Command {
    Command::cargo_bin("see").expect("binary exists")
}

#[test]
fn evaluates_batch_expression() {
    see()
        .arg("1+1")
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn failed_batch_expression_exits_with_two() {
    see()
        .args(["1+1", "x=", "x"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("2"))
        .stderr(predicate::str::contains("Failed to evaluate expression"));
}

#[test]
fn missing_file_exits_with_one() {
    let dir = tempdir().expect("create temp dir");
    see()
        .arg("-f")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn runs_file_segments_in_one_session() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("program.see");
    fs::write(&script, "x = 2\ny = 3\n\\ ignored text\nx * y\n").expect("write script");

    see()
        .arg("-f")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed Node: (x = 2); (y = 3)"))
        .stdout(predicate::str::contains("Result: 6"))
        .stdout(predicate::str::contains("ignored").not());
}

#[test]
fn file_parse_failure_exits_with_two() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("broken.see");
    fs::write(&script, "1 +\n").expect("write script");

    see()
        .arg("-f")
        .arg(&script)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse '1 +"));
}

#[test]
fn prints_help() {
    see()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: see [-c] [--help] [-f file] [expr ...] [-i]"));
}

#[test]
fn unknown_option_is_reported_but_harmless() {
    see()
        .args(["--bogus", "3*3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9"))
        .stderr(predicate::str::contains("Unknown option: --bogus"));
}

#[test]
fn const_flag_is_only_honored_first() {
    see().args(["-c", "x = 1"]).assert().code(2);
    see().args(["1", "-c", "x = 1"]).assert().success();
}

#[test]
fn no_arguments_enters_interactive_mode() {
    see()
        .write_stdin("dump y\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive See Console"))
        .stdout(predicate::str::contains("see >"))
        .stdout(predicate::str::contains("see >y is not defined."))
        .stdout(predicate::str::contains("Current scope: {}"));
}

#[test]
fn interactive_statements_share_the_session() {
    see()
        .write_stdin("x = 5\ndump x\nx * 2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed Node: (x = 5)"))
        .stdout(predicate::str::contains("x is Int(5)"))
        .stdout(predicate::str::contains("Result: 10"));
}

#[test]
fn interactive_failures_still_exit_successfully() {
    see()
        .write_stdin("1 / 0\nx =\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to evaluate '1 / 0'"))
        .stderr(predicate::str::contains("Failed to parse 'x ='"));
}

#[test]
fn interactive_help_command() {
    see()
        .write_stdin("?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: see"));
}

#[test]
fn interactive_flag_ignores_following_arguments() {
    see()
        .args(["40+1", "-i", "1/0", "--help"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("41"))
        .stdout(predicate::str::contains("Usage").not())
        .stderr(predicate::str::contains("Failed").not());
}

#[test]
fn batch_failures_before_interactive_flag_do_not_set_exit_code() {
    see()
        .args(["x=", "-i"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to evaluate expression"))
        .stdout(predicate::str::contains("Interactive See Console"));
}

#[test]
fn double_dash_is_an_unknown_option() {
    see()
        .args(["--", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"))
        .stderr(predicate::str::contains("Unknown option: --"));
}
