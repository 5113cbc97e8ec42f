//! The deletion decider and the end-to-end sweep
//!
//! Each surviving candidate walks a small state machine:
//! `candidate → checked → {delete, keep}`. The `checked` transition queries
//! remote-branch containment of the tag's target commit; a query failure is a
//! distinct outcome that always keeps the tag, never an empty set.

use crate::cli::RunConfig;
use crate::git::GitBackend;
use crate::tags::{self, Tag};
use clap::ValueEnum;
use colored::Colorize;
use std::cell::RefCell;
use std::io::Write;
use tracing::{debug, info, warn};

/// The configured deletion criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeleteCriterion {
    /// Declared for compatibility; carries no decision rule and is rejected
    /// at startup
    Size,
    /// Delete tags whose target commit is on no remote branch
    NoBranch,
}

/// Outcome of the per-tag state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Delete,
    Keep(KeepReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// At least one remote branch contains the target commit
    OnBranch,
    /// No deletion criterion configured; the sweep only reports
    ReportOnly,
    /// The containment query failed, so reachability is unknown
    QueryFailed,
}

/// Decide the fate of a checked tag
///
/// A tag with at least one containing branch is never deleted, regardless of
/// criterion. An unreachable tag is deleted only under the `no-branch`
/// criterion.
pub fn decide(containing_branches: &[String], criterion: Option<DeleteCriterion>) -> Decision {
    if !containing_branches.is_empty() {
        return Decision::Keep(KeepReason::OnBranch);
    }

    match criterion {
        Some(DeleteCriterion::NoBranch) => Decision::Delete,
        Some(DeleteCriterion::Size) | None => Decision::Keep(KeepReason::ReportOnly),
    }
}

/// One line of the sweep report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepEntry {
    pub tag: Tag,
    pub decision: Decision,
}

pub struct Cleaner {
    git: GitBackend,
    config: RunConfig,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Cleaner {
    pub fn new(git: GitBackend, config: RunConfig, writer: Box<dyn std::io::Write>) -> Self {
        Cleaner {
            git,
            config,
            writer: RefCell::new(writer),
        }
    }

    /// Run the full sweep: enumerate, filter, sort, decide, act
    pub fn run(&self) -> anyhow::Result<Vec<SweepEntry>> {
        self.check_remotes()?;

        let tags = self.git.list_tags()?;
        info!(count = tags.len(), "enumerated tags");

        let candidates = tags::filter_by_kind(tags, self.config.tag_type_filter);
        let candidates = tags::filter_preserved(candidates, self.config.preserve_pattern.as_ref());
        let candidates = tags::sort_by_size(candidates);
        debug!(count = candidates.len(), "candidates after filtering");

        let mut entries = Vec::with_capacity(candidates.len());
        for tag in candidates {
            let decision = self.check_tag(&tag)?;
            self.report(&tag, decision)?;
            entries.push(SweepEntry { tag, decision });
        }

        Ok(entries)
    }

    /// Advance one tag through `candidate → checked → {delete, keep}`
    fn check_tag(&self, tag: &Tag) -> anyhow::Result<Decision> {
        let branches = match self.git.remote_branches_containing(&tag.target_commit_sha) {
            Ok(branches) => branches,
            Err(err) => {
                // reachability is unknown, which is never grounds for deletion
                warn!(tag = %tag.name, error = %err, "branch containment query failed, keeping tag");
                return Ok(Decision::Keep(KeepReason::QueryFailed));
            }
        };

        debug!(
            tag = %tag.name,
            branches = branches.len(),
            size = tag.referenced_object_size,
            "checked tag"
        );

        let decision = decide(&branches, self.config.delete_criterion);
        if decision == Decision::Delete {
            self.delete(tag)?;
        }

        Ok(decision)
    }

    /// Delete a tag locally, then push the deletion to each configured remote
    ///
    /// Intent is logged before anything runs so a partial failure can be
    /// reconstructed from the log. A failed push is reported per-remote and
    /// does not stop the remaining pushes; a failed local deletion aborts the
    /// whole run.
    fn delete(&self, tag: &Tag) -> anyhow::Result<()> {
        info!(
            tag = %tag.name,
            commit = %tag.target_commit_sha,
            size = tag.referenced_object_size,
            "deleting tag"
        );
        self.git.delete_tag(&tag.name)?;

        for remote in &self.config.remote_names {
            info!(tag = %tag.name, remote = %remote, "pushing tag deletion");
            match self.git.push_tag_deletion(remote, &tag.name) {
                Ok(()) => info!(tag = %tag.name, remote = %remote, "pushed tag deletion"),
                Err(err) => {
                    warn!(tag = %tag.name, remote = %remote, error = %err, "push failed");
                    writeln!(
                        self.writer.borrow_mut(),
                        "{} could not push deletion of {} to {remote}",
                        "warning:".yellow(),
                        tag.name
                    )?;
                }
            }
        }

        Ok(())
    }

    /// Fail fast on remote names git does not know about
    fn check_remotes(&self) -> anyhow::Result<()> {
        if self.config.remote_names.is_empty() {
            return Ok(());
        }

        let known = self.git.remotes()?;
        for remote in &self.config.remote_names {
            if !known.contains(remote) {
                anyhow::bail!("unknown remote: {remote}");
            }
        }

        Ok(())
    }

    fn report(&self, tag: &Tag, decision: Decision) -> anyhow::Result<()> {
        let verdict = match decision {
            Decision::Delete => "deleted:".red(),
            Decision::Keep(KeepReason::OnBranch) => "kept:   ".green(),
            Decision::Keep(KeepReason::ReportOnly) => "kept:   ".green(),
            Decision::Keep(KeepReason::QueryFailed) => "kept:   ".yellow(),
        };
        let reason = match decision {
            Decision::Delete => "no containing branch",
            Decision::Keep(KeepReason::OnBranch) => "on a branch",
            Decision::Keep(KeepReason::ReportOnly) => "report-only sweep",
            Decision::Keep(KeepReason::QueryFailed) => "containment query failed",
        };

        writeln!(
            self.writer.borrow_mut(),
            "{verdict} {} ({} bytes, {reason})",
            tag.name,
            tag.referenced_object_size
        )?;

        Ok(())
    }
}
