// tests/cli_tests.rs
//
// Runs the `pb` binary against the schemas in tests/data.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn pb() -> Command {
    let mut cmd = Command::cargo_bin("pb").unwrap();
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn ast_prints_json_by_default() {
    pb().args(["ast", "tests/data/good/addressbook.proto"])
        .assert()
        .success()
        .stdout(contains("\"type\": \"syntax\""))
        .stdout(contains("\"type\": \"message\""))
        .stdout(contains("\"text\": \"PhoneNumber\""));
}

#[test]
fn ast_debug_format() {
    pb().args(["ast", "--format", "debug", "tests/data/good/nested/routes.proto"])
        .assert()
        .success()
        .stdout(contains("Service(").and(contains("MapField(")));
}

#[test]
fn ast_reports_syntax_errors_with_diagnostics() {
    pb().args(["ast", "tests/data/bad/broken.proto"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("pbkit::syntax"))
        .stderr(contains("broken.proto"))
        .stderr(contains("integer literal"));
}

#[test]
fn ast_reports_missing_files() {
    pb().args(["ast", "tests/data/missing.proto"])
        .assert()
        .failure()
        .stderr(contains("pbkit::io").and(contains("missing.proto")));
}

#[test]
fn check_walks_directories_and_skips_other_extensions() {
    pb().args(["check", "tests/data/good"])
        .assert()
        .success()
        .stdout(contains("addressbook.proto"))
        .stdout(contains("routes.proto"))
        .stdout(contains("notes.txt").not())
        .stdout(contains("checked 2 files: 2 ok, 0 failed"));
}

#[test]
fn check_fails_when_any_file_fails() {
    pb().args(["check", "tests/data"])
        .assert()
        .failure()
        .code(1)
        .stdout(contains("checked 3 files: 2 ok, 1 failed"))
        .stderr(contains("pbkit::syntax"));
}

#[test]
fn comments_lists_leading_comments() {
    pb().args(["comments", "tests/data/good/addressbook.proto"])
        .assert()
        .success()
        .stdout(contains("syntax @ 2"))
        .stdout(contains("// Sample address book schema."))
        .stdout(contains("message @ 11"))
        .stdout(contains("// A single contact."));
}

#[test]
fn comments_descends_into_service_bodies() {
    pb().args(["comments", "tests/data/good/nested/routes.proto"])
        .assert()
        .success()
        .stdout(contains("rpc @ 5"))
        .stdout(contains("/* Bidirectional stream. */"));
}

#[test]
fn zigzag_encodes_each_value() {
    pb().args(["zigzag", "0", "-1", "1", "-2", "2147483647"])
        .assert()
        .success()
        .stdout("0\t0\n-1\t1\n1\t2\n-2\t3\n2147483647\t4294967294\n");
}
