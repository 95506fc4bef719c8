use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn foliocli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("foliocli"));
    cmd.arg("--data-dir")
        .arg(data_dir)
        .env_remove("FOLIO_DATA_DIR")
        .env_remove("FOLIO_AUTHOR")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

/// Publishes a post and returns its id.
fn publish(dir: &TempDir, title: &str, excerpt: &str) -> String {
    let output = stdout_of(foliocli(dir.path()).args(["new", "--title", title, "--excerpt", excerpt]));
    let line = output
        .lines()
        .find(|line| line.starts_with("Published post "))
        .expect("publish line");
    line.trim_start_matches("Published post ")
        .split_whitespace()
        .next()
        .expect("id")
        .to_string()
}

#[test]
fn fresh_install_lists_the_demo_posts() {
    let dir = tempdir().unwrap();
    foliocli(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains(" 1. Dockerizing Your First App"))
        .stdout(contains(" 4. Monitoring Basics: Prometheus + Grafana"))
        .stdout(contains(" 5. ").not());
}

#[test]
fn created_post_heads_the_list_and_survives_restarts() {
    let dir = tempdir().unwrap();
    let id = publish(&dir, "Hello", "World");

    let list = stdout_of(foliocli(dir.path()).arg("list"));
    assert!(list.contains(&format!(" 1. Hello  [id {}]", id)));
    assert!(list.contains(" 5. Monitoring Basics"));

    foliocli(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("You • "))
        .stdout(contains("General"))
        .stdout(contains("No comments yet — be the first!"));
}

#[test]
fn missing_title_is_rejected() {
    let dir = tempdir().unwrap();
    foliocli(dir.path())
        .args(["new", "--title", "   ", "--excerpt", "World"])
        .assert()
        .failure()
        .stderr(contains("title"));

    foliocli(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains(" 5. ").not());
}

#[test]
fn delete_removes_the_post_and_its_comments() {
    let dir = tempdir().unwrap();
    let id = publish(&dir, "Hello", "World");

    foliocli(dir.path())
        .args(["comment", &id, "first!"])
        .assert()
        .success()
        .stdout(contains("Comment posted!"));
    let comments_file = dir.path().join(format!("comments_{}.json", id));
    assert!(comments_file.exists());

    foliocli(dir.path())
        .args(["delete", &id, "--yes"])
        .assert()
        .success()
        .stdout(contains("Blog deleted"));
    assert!(!comments_file.exists());

    foliocli(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Hello").not());
    foliocli(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Post not found."));
}

#[test]
fn blank_comment_is_rejected() {
    let dir = tempdir().unwrap();
    foliocli(dir.path())
        .args(["comment", "2", "   "])
        .assert()
        .failure()
        .stdout(contains("Please write something before posting."));

    foliocli(dir.path())
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(contains("Comments (0)"));
}

#[test]
fn demo_post_delete_and_undo() {
    let dir = tempdir().unwrap();
    foliocli(dir.path())
        .args(["comment", "1", "old thread"])
        .assert()
        .success();

    foliocli(dir.path())
        .args(["delete", "1", "--yes"])
        .assert()
        .success();
    foliocli(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Dockerizing").not());

    foliocli(dir.path())
        .args(["undo", "1"])
        .assert()
        .success()
        .stdout(contains("Restored post 1"));
    foliocli(dir.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(contains("Dockerizing Your First App"))
        .stdout(contains("Comments (0)"));
}

#[test]
fn declined_delete_keeps_the_post() {
    let dir = tempdir().unwrap();
    foliocli(dir.path())
        .args(["delete", "3"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Kept post 3"));
    foliocli(dir.path())
        .args(["show", "3"])
        .assert()
        .success()
        .stdout(contains("Post not found.").not());
}

#[test]
fn edit_forks_a_demo_post_in_place() {
    let dir = tempdir().unwrap();
    foliocli(dir.path())
        .args(["edit", "2", "--title", "K8s, again"])
        .assert()
        .success()
        .stdout(contains("Saved post 2"));

    let list = stdout_of(foliocli(dir.path()).arg("list"));
    assert!(list.contains(" 1. K8s, again  [id 2]"));
    assert!(!list.contains("Kubernetes 101"));
    assert_eq!(list.matches("[id 2]").count(), 1);
}

#[test]
fn author_comes_from_the_environment() {
    let dir = tempdir().unwrap();
    let output = stdout_of(
        foliocli(dir.path())
            .env("FOLIO_AUTHOR", "Ada")
            .args(["new", "--title", "Hello", "--excerpt", "World"]),
    );
    let id = output
        .lines()
        .find_map(|line| line.strip_prefix("Published post "))
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap()
        .to_string();

    foliocli(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Ada • "));
}

#[test]
fn reset_restores_the_demo_set() {
    let dir = tempdir().unwrap();
    publish(&dir, "Hello", "World");
    foliocli(dir.path()).args(["delete", "1", "--yes"]).assert().success();

    foliocli(dir.path()).args(["reset", "--yes"]).assert().success();

    let list = stdout_of(foliocli(dir.path()).arg("list"));
    assert!(!list.contains("Hello"));
    assert!(list.contains(" 1. Dockerizing Your First App"));
}

#[test]
fn portfolio_prints_a_section() {
    let dir = tempdir().unwrap();
    foliocli(dir.path())
        .args(["portfolio", "education"])
        .assert()
        .success()
        .stdout(contains("=== Education ==="))
        .stdout(contains("=== Skills ===").not());
}

#[test]
fn interactive_menu_reads_stdin() {
    let dir = tempdir().unwrap();
    foliocli(dir.path())
        .write_stdin("1\nr 2\nb\nq\n")
        .assert()
        .success()
        .stdout(contains("=== Folio ==="))
        .stdout(contains("--- Comments (0) ---"))
        .stdout(contains("Exiting Folio..."));
}

#[test]
fn undo_cannot_bring_back_a_local_post() {
    let dir = tempdir().unwrap();
    let id = publish(&dir, "Hello", "World");
    foliocli(dir.path()).args(["delete", &id, "--yes"]).assert().success();

    foliocli(dir.path())
        .args(["undo", &id])
        .assert()
        .success()
        .stdout(contains("removed it for good"));
    foliocli(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Hello").not());
}

#[test]
fn reset_leaves_unrelated_files_alone() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), "{}").unwrap();
    publish(&dir, "Hello", "World");

    foliocli(dir.path()).args(["reset", "--yes"]).assert().success();

    assert!(dir.path().join("package.json").exists());
    assert!(!dir.path().join("my_blogs_v1.json").exists());
}
