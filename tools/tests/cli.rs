use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

const GRAMMAR: &str = "tests/data/telescope.cfg";

fn cykel() -> Command {
    Command::cargo_bin("cykel").unwrap()
}

#[test]
fn batch_counts() {
    cykel()
        .arg(GRAMMAR)
        .arg("tests/data/telescope.txt")
        .assert()
        .success()
        .stdout(concat!(
            "i saw the man\t1\n",
            "i saw the man with the telescope\t2\n",
            "i saw a man on the hill with a telescope\t5\n",
            "the man saw\t0\n",
        ));
}

#[test]
fn batch_trees() {
    cykel()
        .args([GRAMMAR, "tests/data/telescope.txt", "--trees"])
        .assert()
        .success()
        .stdout(contains("i saw the man\t1\n[S [NP i] [VP [V saw] [NP [DET the] [N man]]]]\n"))
        .stdout(contains(
            "[S [NP i] [VP [VP [V saw] [NP [DET the] [N man]]] [PP [P with] [NP [DET the] [N telescope]]]]]"))
        .stdout(contains("the man saw\t0\n"));
}

#[test]
fn check_passes() {
    cykel()
        .args([GRAMMAR, "tests/data/telescope.txt", "--check"])
        .assert()
        .success()
        .stderr(contains("0 of 4 sentences mismatched"));
}

#[test]
fn check_reports_mismatches() {
    cykel()
        .args([GRAMMAR, "tests/data/mismatch.txt", "--check"])
        .assert()
        .code(1)
        .stderr(contains("Mismatch: 'i saw the man with the telescope' expected 1 got 2"))
        .stderr(contains("1 of 2 sentences mismatched"))
        .stderr(contains("Mismatch: 'i saw the man'").not());
}

#[test]
fn mismatches_ignored_without_check() {
    cykel()
        .args([GRAMMAR, "tests/data/mismatch.txt"])
        .assert()
        .success();
}

#[test]
fn bad_grammar() {
    cykel()
        .args(["tests/data/not_cnf.cfg", "tests/data/telescope.txt"])
        .assert()
        .code(2)
        .stderr(contains("Not in CNF: S -> NP 'saw' NP"));
}

#[test]
fn missing_files() {
    cykel()
        .args(["tests/data/nothing.cfg", "tests/data/telescope.txt"])
        .assert()
        .code(2)
        .stderr(contains("Can't read grammar"));
    cykel()
        .args([GRAMMAR, "tests/data/nothing.txt"])
        .assert()
        .code(2)
        .stderr(contains("Can't read sentences"));
}

#[test]
fn interactive() {
    cykel()
        .arg(GRAMMAR)
        .write_stdin("i saw the man\n\nsaw the man\n")
        .assert()
        .success()
        .stdout(contains("i saw the man\t1\n[S [NP i] [VP [V saw] [NP [DET the] [N man]]]]"))
        .stdout(contains("saw the man\t0"));
}
