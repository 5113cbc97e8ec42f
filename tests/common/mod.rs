#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use std::path::Path;

/// Run a git command in `dir`, panicking on failure, returning trimmed stdout
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to spawn git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout)
        .expect("git produced non-UTF-8 output")
        .trim()
        .to_string()
}

/// Initialize a repository with one commit on `main`
///
/// Returns the SHA of that commit.
pub fn init_repo(dir: &Path) -> String {
    git(dir, &["init", "-b", "main"]);
    git(dir, &["config", "user.name", "Tester"]);
    git(dir, &["config", "user.email", "tester@example.com"]);
    git(dir, &["commit", "--allow-empty", "-m", "initial commit"]);
    git(dir, &["rev-parse", "HEAD"])
}

/// Create a commit that no branch references
///
/// `git commit-tree` writes the commit object without moving any ref. The
/// message length controls the commit object's byte size, which is what the
/// sort stage orders by.
pub fn dangling_commit(dir: &Path, message: &str) -> String {
    let tree = git(dir, &["rev-parse", "HEAD^{tree}"]);
    git(dir, &["commit-tree", &tree, "-m", message])
}

/// Pretend `commit` has been pushed: point a remote-tracking branch at it
pub fn track_on_origin(dir: &Path, branch: &str, commit: &str) {
    let refname = format!("refs/remotes/origin/{branch}");
    git(dir, &["update-ref", &refname, commit]);
}

pub fn tag_names(dir: &Path) -> Vec<String> {
    git(dir, &["tag"])
        .lines()
        .map(str::to_string)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn repository_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// The cleaner binary, pointed at `dir` and logging inside it
pub fn run_cleaner(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("git-tag-cleaner").expect("binary not built");
    cmd.current_dir(dir)
        .arg("--git")
        .arg(dir)
        .arg("--output")
        .arg(dir.join("git-tag-cleaner.log"))
        .args(args);
    cmd
}
