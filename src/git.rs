//! The git command backend
//!
//! Every repository query and mutation goes through an explicit
//! argument-vector invocation of the `git` binary. No command line is ever
//! assembled through a shell, so tag and branch names cannot be interpolated
//! into shell syntax.
//!
//! A nonzero exit from git surfaces as an `Err` carrying the command and its
//! stderr; callers decide whether that is fatal (deletion) or a per-item
//! warning (branch containment).

use crate::tags::{Tag, TagKind};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::trace;

/// `%00`-separated fields: short ref name, object type, object SHA, peeled
/// commit SHA (empty for lightweight tags)
const TAG_LIST_FORMAT: &str = "%(refname:short)%00%(objecttype)%00%(objectname)%00%(*objectname)";

/// Handle on a repository, addressed through `git -C <path>`
#[derive(Debug)]
pub struct GitBackend {
    repo_path: PathBuf,
}

impl GitBackend {
    /// Open a repository, failing fast if the path does not hold one
    pub fn open(repo_path: &Path) -> anyhow::Result<Self> {
        let backend = GitBackend {
            repo_path: repo_path.to_path_buf(),
        };

        backend
            .run(&["rev-parse", "--git-dir"])
            .with_context(|| format!("not a git repository: {}", repo_path.display()))?;

        Ok(backend)
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Enumerate all tags with their kind, target commit and object size
    pub fn list_tags(&self) -> anyhow::Result<Vec<Tag>> {
        let raw = self.run(&["for-each-ref", "--format", TAG_LIST_FORMAT, "refs/tags"])?;

        let mut tags = Vec::new();
        for line in raw.lines().filter(|line| !line.is_empty()) {
            let fields = line.split('\0').collect::<Vec<_>>();
            let &[name, object_type, object_sha, peeled_sha] = fields.as_slice() else {
                anyhow::bail!("unexpected for-each-ref line: {line:?}");
            };

            let (kind, target_commit_sha) = match object_type {
                "commit" => (TagKind::Lightweight, object_sha),
                "tag" => (TagKind::Annotated, peeled_sha),
                other => anyhow::bail!("tag {name} references a {other} object, not a commit"),
            };

            let size = self.object_size(target_commit_sha)?;
            tags.push(Tag::new(
                name.to_string(),
                target_commit_sha.to_string(),
                kind,
                size,
            ));
        }

        Ok(tags)
    }

    /// Remote branches whose history includes the given commit
    ///
    /// An `Err` here means the query itself failed; it is never an empty set.
    pub fn remote_branches_containing(&self, commit_sha: &str) -> anyhow::Result<Vec<String>> {
        let raw = self.run(&[
            "branch",
            "-r",
            "--contains",
            commit_sha,
            "--format",
            "%(refname:short)",
        ])?;

        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Names of the configured remotes
    pub fn remotes(&self) -> anyhow::Result<Vec<String>> {
        let raw = self.run(&["remote"])?;

        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Delete a tag from the local repository
    pub fn delete_tag(&self, tag_name: &str) -> anyhow::Result<()> {
        self.run(&["tag", "-d", tag_name]).map(|_| ())
    }

    /// Push a tag deletion (empty-ref push) to a remote
    pub fn push_tag_deletion(&self, remote: &str, tag_name: &str) -> anyhow::Result<()> {
        let refspec = format!(":refs/tags/{tag_name}");
        self.run(&["push", remote, &refspec]).map(|_| ())
    }

    fn object_size(&self, sha: &str) -> anyhow::Result<u64> {
        let raw = self.run(&["cat-file", "-s", sha])?;

        raw.trim()
            .parse::<u64>()
            .with_context(|| format!("unexpected cat-file -s output for {sha}: {raw:?}"))
    }

    fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        trace!(?args, "invoking git");

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_path)
            .args(args)
            .output()
            .with_context(|| format!("failed to spawn git {}", args.join(" ")))?;

        if !output.status.success() {
            anyhow::bail!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("git {} produced non-UTF-8 output", args.join(" ")))
    }
}
