// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the followgraph CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Graph file inside the test's data directory
fn graph_path(data_dir: &TempDir) -> PathBuf {
    data_dir.path().join("graph.txt")
}

/// Build a followgraph command bound to the test's graph file
fn followgraph(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("followgraph").unwrap();
    cmd.env_remove("FOLLOWGRAPH_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--graph")
        .arg(graph_path(data_dir));
    cmd
}

/// Seed the data directory with a small graph
fn seed(data_dir: &TempDir) {
    followgraph(data_dir)
        .args(["add-user", "--first", "Ada", "--name", "Lovelace", "--age", "36"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created user: Ada Lovelace (id 1)"));
    followgraph(data_dir)
        .args(["add-user", "--first", "Alan", "--name", "Turing", "--age", "41"])
        .assert()
        .success();
    followgraph(data_dir)
        .args(["add-page", "Events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created page: Events (id 3)"));
}

#[test]
fn test_empty_graph_listing() {
    let data_dir = TempDir::new().unwrap();

    followgraph(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No vertices"));

    followgraph(&data_dir)
        .arg("edges")
        .assert()
        .success()
        .stdout(predicate::str::contains("No edges defined"));

    assert!(!graph_path(&data_dir).exists(), "read-only commands must not write");
}

#[test]
fn test_follow_lifecycle() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    followgraph(&data_dir)
        .args(["follow", "Ada Lovelace", "Turing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace now follows Turing"));
    followgraph(&data_dir)
        .args(["follow", "1", "Events"])
        .assert()
        .success();

    let text = std::fs::read_to_string(graph_path(&data_dir)).unwrap();
    assert_eq!(
        text,
        "{id = 1, name = Lovelace, firstname = Ada, age = 36, neighbors = [2, 3]}\n\
         {id = 2, name = Turing, firstname = Alan, age = 41, neighbors = []}\n\
         {id = 3, name = Events, admins = []}\n"
    );

    followgraph(&data_dir)
        .arg("edges")
        .assert()
        .success()
        .stdout(predicate::str::contains("Edges (2):"))
        .stdout(predicate::str::contains("Ada Lovelace -> Alan Turing, Events"));

    followgraph(&data_dir)
        .args(["follow", "Ada Lovelace", "Turing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already follows"));

    followgraph(&data_dir)
        .args(["follow", "Events", "Turing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an individual"));

    followgraph(&data_dir)
        .args(["unfollow", "Ada Lovelace", "Turing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no longer follows"));

    followgraph(&data_dir)
        .args(["distance", "Lovelace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alan Turing: unreachable"))
        .stdout(predicate::str::contains("Events: 1"));
}

#[test]
fn test_admin_removed_with_individual() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    followgraph(&data_dir)
        .args(["admin", "add", "Events", "Turing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Turing is now an admin of Events"));

    followgraph(&data_dir)
        .args(["admin", "list", "Events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admins of Events (1):"))
        .stdout(predicate::str::contains("Alan Turing (2)"));

    followgraph(&data_dir)
        .args(["remove", "Turing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Alan Turing (id 2)"));

    followgraph(&data_dir)
        .args(["admin", "list", "Events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Events has no admins."));

    followgraph(&data_dir)
        .args(["admin", "add", "Events", "Events"])
        .assert()
        .failure();
}

#[test]
fn test_stats_and_json_output() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);
    followgraph(&data_dir)
        .args(["follow", "Lovelace", "Turing"])
        .assert()
        .success();

    followgraph(&data_dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vertices: 3"))
        .stdout(predicate::str::contains("Edges: 1"))
        .stdout(predicate::str::contains("Average age: 38.50"))
        .stdout(predicate::str::contains("Strongly connected components: 3"));

    let output = followgraph(&data_dir)
        .args(["--json", "list", "--kind", "users"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let users = parsed.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["display"], "Ada Lovelace");
    assert_eq!(users[0]["follows"][0], 2);
    assert_eq!(users[1]["followers"][0], 1);
}

#[test]
fn test_export_dot_to_file() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);
    followgraph(&data_dir)
        .args(["follow", "Lovelace", "Events"])
        .assert()
        .success();

    let out = data_dir.path().join("graph.dot");
    followgraph(&data_dir)
        .args(["export", "--format", "dot", "--output"])
        .arg(&out)
        .assert()
        .success();

    let dot = std::fs::read_to_string(&out).unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("Ada Lovelace"));
    assert!(dot.contains("->"));
}

#[test]
fn test_line_break_in_name_keeps_file_loadable() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    followgraph(&data_dir)
        .args(["add-user", "--first", "Grace", "--name", "Hop\nper", "--age", "85"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line breaks"));

    followgraph(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vertices (3):"));
}

#[test]
fn test_malformed_graph_file_is_reported() {
    let data_dir = TempDir::new().unwrap();
    std::fs::write(graph_path(&data_dir), "{id = 1, name = Events}\n").unwrap();

    followgraph(&data_dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load graph"));
}

#[test]
fn test_config_file_selects_graph() {
    let data_dir = TempDir::new().unwrap();
    let config = data_dir.path().join("config.toml");
    let graph = data_dir.path().join("from-config.txt");
    std::fs::write(
        &config,
        format!("graph_file = {:?}\nlog_level = \"warn\"\n", graph.display().to_string()),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("followgraph").unwrap();
    cmd.env_remove("FOLLOWGRAPH_FILE")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .args(["add-page", "Events"])
        .assert()
        .success();

    assert!(graph.exists());
}

#[test]
fn test_completions_generation() {
    let data_dir = TempDir::new().unwrap();
    followgraph(&data_dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("followgraph"));
}
