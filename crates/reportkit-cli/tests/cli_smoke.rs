//! Smoke tests for the `reportkit` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cmd() -> Command {
    Command::cargo_bin("reportkit").unwrap()
}

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render").and(predicate::str::contains("template")));
}

#[test]
fn test_template_prints_description() {
    cmd()
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sections\"").and(predicate::str::contains("\"type\": \"pie\"")));
}

#[test]
fn test_render_writes_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let description = dir.path().join("report.json");
    fs::write(
        &description,
        r#"{
            "title": "Smoke",
            "sections": [{
                "title": "Shares",
                "charts": [{"type": "pie", "labels": ["A", "B", "C"], "data": [45, 35, 20]}],
                "content": [{"type": "finding", "content": "A leads"}]
            }]
        }"#,
    )
    .unwrap();
    let output = dir.path().join("out.html");

    cmd()
        .arg("render")
        .arg(&description)
        .arg("-o")
        .arg(&output)
        .arg("--no-scripts")
        .assert()
        .success();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("class=\"plot-spec\"").count(), 1);
    assert!(html.contains(r#""labels":["A","B","C"]"#));
    assert!(html.contains("Loading chart"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_render_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let description = dir.path().join("report.json");
    fs::write(&description, r#"{"title": "Stdout report", "sections": []}"#).unwrap();

    cmd()
        .arg("render")
        .arg(&description)
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Stdout report</h1>"));
}

#[test]
fn test_render_missing_description_fails() {
    cmd()
        .args(["render", "/nonexistent/report.json", "--stdout"])
        .assert()
        .failure();
}
