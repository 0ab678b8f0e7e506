use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn commit_file(dir: &Path, author: &str, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();

    let (user, email) = author.split_once(';').unwrap();
    git(dir, &["add", "."]);
    git(
        dir,
        &[
            "-c",
            &format!("user.name={user}"),
            "-c",
            &format!("user.email={email}"),
            "commit",
            "-m",
            &format!("add {name}"),
        ],
    );
}

fn sample_repo(dir: &Path) {
    init_git_repo(dir);
    commit_file(dir, "Alice;alice@example.com", "src/a.rs", "fn a() {}\nfn b() {}\n");
    commit_file(dir, "Bob;bob@example.com", "src/b.rs", "fn c() {}\n");
    commit_file(dir, "alice;ALICE@example.com", "src/a.rs", "fn a() {}\n");
}

#[test]
fn json_outputs_contributors() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    sample_repo(dir.path());

    let mut cmd = Command::cargo_bin("git-contributors").unwrap();
    cmd.arg("--repo").arg(dir.path()).arg("--json");
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let contributors = v["contributors"].as_array().unwrap();
    assert_eq!(contributors.len(), 2);
    assert_eq!(contributors[0]["commits"], 2);
    assert_eq!(contributors[0]["insertions"], 2);
    assert_eq!(contributors[0]["deletions"], 1);
    assert_eq!(contributors[1]["name"], "Bob");
    assert_eq!(v["version"], 1);
}

#[test]
fn markdown_outputs_table() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    sample_repo(dir.path());

    let mut cmd = Command::cargo_bin("git-contributors").unwrap();
    cmd.current_dir(dir.path()).arg("--markdown");
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "| Name | Commits | Insertions | Deletions |");
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("| "));
    assert!(lines[2].contains(" | 2 | 2 | 1 |"));
    assert_eq!(lines[3], "| Bob | 1 | 1 | 0 |");
}

#[test]
fn missing_repository_fails_with_message() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-existing-directory");

    let mut cmd = Command::cargo_bin("git-contributors").unwrap();
    cmd.arg("--repo").arg(&missing);
    let out = cmd.assert().failure().get_output().stderr.clone();
    let stderr = String::from_utf8_lossy(&out);
    assert!(stderr.contains(&format!(
        "Could not find .git repository at \"{}\"",
        missing.display()
    )));
}

#[test]
fn empty_repository_has_no_contributors() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());

    let mut cmd = Command::cargo_bin("git-contributors").unwrap();
    cmd.arg("--repo").arg(dir.path()).arg("--json");
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["contributors"].as_array().map(|a| a.len()), Some(0));
}
