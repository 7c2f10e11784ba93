use assert_cmd::Command;
use predicates::prelude::*;

// Nothing listens on the discard port, so requests fail fast.
const UNREACHABLE: &str = "http://127.0.0.1:9/api/ask/";

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("medimind").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: medimind [OPTIONS] <COMMAND>"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("--endpoint <ENDPOINT>"))
        .stdout(predicate::str::contains("--timeout-secs <TIMEOUT_SECS>"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_cli_ask_help() {
    let mut cmd = Command::cargo_bin("medimind").unwrap();
    cmd.arg("ask")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: medimind ask [OPTIONS] <QUESTION>"));
}

#[test]
fn test_cli_web_help() {
    let mut cmd = Command::cargo_bin("medimind").unwrap();
    cmd.arg("web")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port <PORT>"));
}

#[test]
fn test_cli_no_command() {
    let mut cmd = Command::cargo_bin("medimind").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage: medimind [OPTIONS] <COMMAND>"));
}

#[test]
fn test_cli_ask_empty_question_skips_network() {
    let mut cmd = Command::cargo_bin("medimind").unwrap();
    cmd.args(["--endpoint", UNREACHABLE, "ask", ""])
        .assert()
        .success()
        .stdout("Please enter a question.\n");
}

#[test]
fn test_cli_ask_unreachable_service() {
    let mut cmd = Command::cargo_bin("medimind").unwrap();
    cmd.args(["ask", "What causes migraines?"])
        .env("MEDIMIND_ENDPOINT", UNREACHABLE)
        .assert()
        .success()
        .stdout("Error: Something went wrong.\n");
}

#[test]
fn test_cli_chat_reads_stdin() {
    let mut cmd = Command::cargo_bin("medimind").unwrap();
    cmd.args(["--endpoint", UNREACHABLE, "chat"])
        .write_stdin("\n   \nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a question."));
}
