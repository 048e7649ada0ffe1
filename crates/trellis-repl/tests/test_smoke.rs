//! End-to-end smoke tests for the demo shell.

use assert_cmd::Command;
use predicates::prelude::*;

fn repl() -> Command {
    Command::cargo_bin("trellis-repl").expect("binary builds")
}

#[test]
fn test_routes_a_nested_command() {
    repl()
        .write_stdin("fleet status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("all agents nominal"));
}

#[test]
fn test_aliases_reach_the_same_command() {
    repl()
        .write_stdin("fl st\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("all agents nominal"));
}

#[test]
fn test_usage_error_spells_out_the_full_path() {
    repl()
        .write_stdin("fleet agent\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "usage: fleet agent <start|stop> <agent>",
        ));
}

#[test]
fn test_permission_gate_blocks_until_granted() {
    repl()
        .write_stdin("fleet agent stop alpha\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "you do not have permission to do that",
        ));

    repl()
        .args(["--grant", "fleet.admin"])
        .write_stdin("fleet agent stop alpha\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("stopping agent 'alpha'"));
}

#[test]
fn test_completion_lists_sub_commands() {
    repl()
        .write_stdin("complete fleet \nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent  status"));
}

#[test]
fn test_completion_narrows_on_a_partial_token() {
    repl()
        .write_stdin("complete fleet a\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent"));
}

#[test]
fn test_custom_completer_answers_on_a_leaf() {
    repl()
        .write_stdin("complete echo w\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("world"));
}

#[test]
fn test_unknown_root_is_reported() {
    repl()
        .write_stdin("warp 9\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command 'warp'"));
}

#[test]
fn test_eof_ends_the_shell_cleanly() {
    repl().write_stdin("echo hello\n").assert().success();
}
