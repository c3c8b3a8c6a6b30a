//! Integration tests for the seqmatch CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper building a quiet session command fed from a script of lines.
fn session(script: &str) -> Command {
    let mut cmd = Command::cargo_bin("seqmatch").unwrap();
    cmd.arg("--quiet").write_stdin(script.to_string());
    cmd
}

#[test]
fn test_welcome_message_without_quiet() {
    let mut cmd = Command::cargo_bin("seqmatch").unwrap();
    cmd.write_stdin("quit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Use one of the following commands"));
}

#[test]
fn test_input_and_tokenization() {
    session("input a.txt one two three\ntokenization a.txt word\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded a.txt"))
        .stdout(predicate::str::contains("one~two~three"));
}

#[test]
fn test_input_replacing_reports_updated() {
    session("input a.txt one\ninput a.txt two\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded a.txt"))
        .stdout(predicate::str::contains("Updated a.txt"));
}

#[test]
fn test_smart_tokenization_keeps_connected_words() {
    session("input a.txt it's well-known\ntokenization a.txt smart\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("it's~well-known"));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.txt");
    fs::write(&path, "alpha beta gamma").unwrap();

    session(&format!("load {}\ntokenization sample.txt word\nquit\n", path.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded sample.txt"))
        .stdout(predicate::str::contains("alpha~beta~gamma"));
}

#[test]
fn test_load_missing_file_reports_uniform_error() {
    session("load /definitely/not/here.txt\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: Could not read file."));
}

#[test]
fn test_preloaded_files_are_available() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pre.txt");
    fs::write(&path, "x y z").unwrap();

    let mut cmd = Command::cargo_bin("seqmatch").unwrap();
    cmd.arg("--quiet")
        .arg(&path)
        .write_stdin("tokenization pre.txt word\nquit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loaded pre.txt"))
        .stdout(predicate::str::contains("x~y~z"));
}

#[test]
fn test_analyze_and_matches() {
    session("input a x y z\ninput b x y z\nanalyze word 1\nmatches a b\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis took "))
        .stdout(predicate::str::contains("Match of length 3: 0-0"));
}

#[test]
fn test_overlapping_matches_are_all_listed() {
    session("input a a b a b\ninput b a b a b\nanalyze word 1\nmatches a b\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Match of length 4: 0-0\nMatch of length 2: 0-2\nMatch of length 2: 2-0",
        ));
}

#[test]
fn test_list_and_top() {
    let script = "input a x y\ninput b x y\ninput c q r\nanalyze word 1\n\
                  list avg\ntop 1 avg\nquit\n";
    session(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("a-b: 100.00%"))
        .stdout(predicate::str::contains("a-c: 0.00%"))
        .stdout(predicate::str::contains("b-c: 0.00%"));
}

#[test]
fn test_list_without_analysis_fails_recoverably() {
    session("list avg\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: no analysis result available"));
}

#[test]
fn test_histogram() {
    let script = "input a x y\ninput b x y\ninput c q r\nanalyze word 1\nhistogram avg\nquit\n";
    session(script)
        .assert()
        .success()
        .stdout(predicate::str::contains(":| 1"))
        .stdout(predicate::str::contains(":|| 2"));
}

#[test]
fn test_histogram_rejects_count_metric() {
    session("input a x\ninput b x\nanalyze word 1\nhistogram len\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: Metric must be a percentage."));
}

#[test]
fn test_full_editing_transcript() {
    let script = "input a x y z w\ninput b x y z w\nanalyze word 1\nedit a b\n\
                  matches\nprint 1\ntruncate 1 1\nextend 1 -1\ndiscard 1\n\
                  add 0 0 2\nset first\nexit\nmatches a b\nquit\n";
    session(script)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Comparison of a, b: 100.00% similarity, 1 matches.",
        ))
        .stdout(predicate::str::contains("Match of length 4: 0-0"))
        .stdout(predicate::str::contains("a: [x y z w]"))
        .stdout(predicate::str::contains("75.00% similarity, 1 matches."))
        .stdout(predicate::str::contains("0.00% similarity, 0 matches."))
        .stdout(predicate::str::contains("50.00% similarity, 1 matches."))
        .stdout(predicate::str::contains("OK, exit editing mode."))
        .stdout(predicate::str::contains("Match of length 2: 0-0"));
}

#[test]
fn test_editing_mode_gates_top_level_commands() {
    let script = "input a x\ninput b x\nanalyze word 1\nedit a b\nanalyze word 1\nexit\nquit\n";
    session(script)
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: unknown command"));
}

#[test]
fn test_editing_rejects_invalid_operations() {
    let script = "input a x y\ninput b x q\nanalyze word 1\nedit a b\n\
                  add 0 0 2\ndiscard 5\ntruncate 1 1\nexit\nquit\n";
    session(script)
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: tokens do not match in the selected range"))
        .stderr(predicate::str::contains("Error: invalid match index"))
        .stderr(predicate::str::contains("Error: match cannot be truncated completely"));
}

#[test]
fn test_clear_resets_session() {
    session("input a x\nclear\ntokenization a word\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all texts."))
        .stderr(predicate::str::contains("no text stored for identifier 'a'"));
}

#[test]
fn test_unknown_command_keeps_session_alive() {
    session("frobnicate\ninput a x\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded a"))
        .stderr(predicate::str::contains("Error: unknown command"));
}

#[test]
fn test_argument_errors_are_reported() {
    session("analyze word 0\nanalyze word abc\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("'0' must be positive."))
        .stderr(predicate::str::contains("'abc' must be an integer."));
}

#[test]
fn test_config_file_sets_analysis_defaults() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("seqmatch.toml");
    fs::write(&config, "[analysis]\nstrategy = \"word\"\nmin_match_length = 1\n").unwrap();

    let mut cmd = Command::cargo_bin("seqmatch").unwrap();
    cmd.arg("--quiet")
        .arg("--config")
        .arg(&config)
        .write_stdin("input a x y\ninput b x y\nanalyze\nmatches a b\nquit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Match of length 2: 0-0"));
}

#[test]
fn test_invalid_config_file_fails_startup() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("seqmatch.toml");
    fs::write(&config, "[analysis]\nmin_match_length = 0\n").unwrap();

    let mut cmd = Command::cargo_bin("seqmatch").unwrap();
    cmd.arg("--quiet").arg("--config").arg(&config).write_stdin("quit\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("min_match_length"));
}
