//! Tag records and the filter/sort stages of the sweep
//!
//! A [`Tag`] is an immutable snapshot taken at enumeration time: the ref name,
//! the commit it ultimately points at, whether a separate tag object exists,
//! and the byte size of the referenced object. The filter and sort stages are
//! pure functions over lists of these snapshots; nothing here talks to git.

use anyhow::Context;
use clap::ValueEnum;
use derive_new::new;
use regex::Regex;

/// How a tag ref stores its target
///
/// - Lightweight: the ref points directly at a commit
/// - Annotated: the ref points at a tag object which in turn points at a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Lightweight,
    Annotated,
}

/// Snapshot of a single tag, produced by enumeration
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Tag {
    pub name: String,
    pub target_commit_sha: String,
    pub kind: TagKind,
    pub referenced_object_size: u64,
}

impl Tag {
    pub fn is_annotated(&self) -> bool {
        self.kind == TagKind::Annotated
    }
}

/// Which tag kinds the sweep considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TagTypeFilter {
    /// Only lightweight tags (refs pointing directly at a commit)
    Commit,
    /// All tags, annotated included
    All,
}

/// A compiled preserve pattern, anchored at the start of the tag name
///
/// Matching uses match-from-start semantics rather than substring search:
/// `release-` preserves `release-1` but a pattern `v1` does not preserve
/// `old-v1`.
#[derive(Debug, Clone)]
pub struct PreservePattern(Regex);

impl PreservePattern {
    pub fn try_parse(raw: &str) -> anyhow::Result<Self> {
        // the non-capturing group keeps the anchor in front of top-level
        // alternations like `release-|archive-`
        let re = Regex::new(&format!("^(?:{raw})"))
            .with_context(|| format!("invalid preserve pattern: {raw}"))?;

        Ok(Self(re))
    }

    pub fn matches(&self, tag_name: &str) -> bool {
        self.0.is_match(tag_name)
    }
}

/// Keep only tags of the requested kind
pub fn filter_by_kind(tags: Vec<Tag>, type_filter: TagTypeFilter) -> Vec<Tag> {
    match type_filter {
        TagTypeFilter::All => tags,
        TagTypeFilter::Commit => tags.into_iter().filter(|tag| !tag.is_annotated()).collect(),
    }
}

/// Drop every tag whose name matches the preserve pattern
pub fn filter_preserved(tags: Vec<Tag>, pattern: Option<&PreservePattern>) -> Vec<Tag> {
    match pattern {
        None => tags,
        Some(pattern) => tags
            .into_iter()
            .filter(|tag| !pattern.matches(&tag.name))
            .collect(),
    }
}

/// Order tags by referenced-object size, largest first
///
/// The sort is stable, so tags of equal size keep their enumeration order.
pub fn sort_by_size(mut tags: Vec<Tag>) -> Vec<Tag> {
    tags.sort_by(|a, b| b.referenced_object_size.cmp(&a.referenced_object_size));
    tags
}
