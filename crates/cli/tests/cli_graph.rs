use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

mod helpers;

#[test]
fn graph_prints_project_packages_only_by_default() {
    let temp = tempdir().unwrap();
    let manifest = helpers::write_manifest(temp.path());

    let output = cargo_bin_cmd!("depweight")
        .current_dir(temp.path())
        .arg("graph")
        .arg("--manifest")
        .arg(&manifest)
        .arg("example.com/app")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = "\
digraph G {
    node [shape=rectangle];
    rankdir=LR;
    example_com_app [label=\"example.com/app\"];
    example_com_app_db [label=\"example.com/app/db\"];
    example_com_app_log [label=\"example.com/app/log\"];
    example_com_app -> example_com_app_db;
    example_com_app -> example_com_app_log;
    example_com_app_db -> example_com_app_log;
}
";
    assert_eq!(String::from_utf8(output).unwrap(), expected);
}

#[test]
fn graph_with_std_includes_standard_packages() {
    let temp = tempdir().unwrap();
    let manifest = helpers::write_manifest(temp.path());

    cargo_bin_cmd!("depweight")
        .current_dir(temp.path())
        .args(["graph", "--std", "--manifest"])
        .arg(&manifest)
        .arg("example.com/app")
        .assert()
        .success()
        .stdout(predicate::str::contains("database_sql -> context;"))
        .stdout(predicate::str::contains("example_com_app -> fmt;"));
}

#[test]
fn graph_format_controls_labels() {
    let temp = tempdir().unwrap();
    let manifest = helpers::write_manifest(temp.path());

    cargo_bin_cmd!("depweight")
        .current_dir(temp.path())
        .args(["graph", "--format", "{{.ID}} ({{.ImportCount}})", "--manifest"])
        .arg(&manifest)
        .arg("example.com/app")
        .assert()
        .success()
        .stdout(predicate::str::contains("example_com_app [label=\"example.com/app (3)\"];"));
}

#[test]
fn graph_rejects_invalid_format() {
    let temp = tempdir().unwrap();
    let manifest = helpers::write_manifest(temp.path());

    cargo_bin_cmd!("depweight")
        .current_dir(temp.path())
        .args(["graph", "--format", "{{.Nope}}", "--manifest"])
        .arg(&manifest)
        .arg("example.com/app")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format string"));
}

#[test]
fn graph_requires_roots() {
    let temp = tempdir().unwrap();
    let manifest = helpers::write_manifest(temp.path());

    cargo_bin_cmd!("depweight")
        .current_dir(temp.path())
        .args(["graph", "--manifest"])
        .arg(&manifest)
        .assert()
        .failure();
}

#[test]
fn strict_graph_fails_on_unlisted_import() {
    let temp = tempdir().unwrap();
    let manifest = helpers::write_manifest(temp.path());

    // `context` is imported by database/sql but not listed in the manifest.
    cargo_bin_cmd!("depweight")
        .current_dir(temp.path())
        .args(["graph", "--strict", "--manifest"])
        .arg(&manifest)
        .arg("example.com/app")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown package: context"));
}

#[test]
fn config_file_enables_std_packages() {
    let temp = tempdir().unwrap();
    let manifest = helpers::write_manifest(temp.path());
    std::fs::write(temp.path().join("depweight.yaml"), "graph:\n  include_std: true\n").unwrap();

    cargo_bin_cmd!("depweight")
        .current_dir(temp.path())
        .args(["graph", "--manifest"])
        .arg(&manifest)
        .arg("example.com/app")
        .assert()
        .success()
        .stdout(predicate::str::contains("fmt [label=\"fmt\"];"));
}

#[test]
fn std_list_prints_sorted_ids() {
    let temp = tempdir().unwrap();
    let output = cargo_bin_cmd!("depweight")
        .current_dir(temp.path())
        .arg("std-list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body = String::from_utf8(output).unwrap();
    let ids: Vec<&str> = body.lines().collect();
    assert!(ids.contains(&"net/http"));
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}
