//! git-tag-cleaner
//!
//! A maintenance sweep over git tags: enumerate them, filter by kind and
//! preserve pattern, sort by referenced-object size, then decide per tag
//! whether its target commit is still reachable from a remote branch and
//! delete it if not (and only if asked to).
//!
//! The pipeline stages live in [`tags`] and [`cleaner`]; all repository
//! access goes through the [`git`] command backend.

pub mod cleaner;
pub mod cli;
pub mod git;
pub mod logging;
pub mod tags;
