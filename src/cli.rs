//! Command line surface and its validated runtime configuration
//!
//! [`Cli`] is the raw clap-parsed flag set; [`RunConfig`] is what the sweep
//! actually consumes, built once by [`RunConfig::try_from_cli`] and read-only
//! afterwards. All startup validation lives in that conversion: repository
//! path resolution, preserve-pattern compilation and rejection of the `size`
//! criterion.

use crate::cleaner::DeleteCriterion;
use crate::tags::{PreservePattern, TagTypeFilter};
use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "git-tag-cleaner",
    version = "0.1.0",
    about = "A tool for removing old tags",
    long_about = "Identifies git tags that point to commits unreachable from any remote branch \
    and optionally deletes them, locally and on selected remotes. \
    Without --delete the sweep only reports what it would do.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
pub struct Cli {
    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[arg(short, long, help = "Suppress console log output")]
    pub quiet: bool,
    #[arg(
        short,
        long,
        default_value = "git-tag-cleaner.log",
        help = "Log file destination"
    )]
    pub output: PathBuf,
    #[arg(
        short,
        long,
        help = "Path to the git repository (else $GIT_DIR, else the current directory)"
    )]
    pub git: Option<PathBuf>,
    #[arg(
        short = 't',
        long = "type",
        value_enum,
        default_value_t = TagTypeFilter::All,
        help = "Tag type filter"
    )]
    pub tag_type: TagTypeFilter,
    #[arg(
        short,
        long,
        help = "Never touch tags matching this pattern (anchored at the start of the name)"
    )]
    pub preserve: Option<String>,
    #[arg(
        short,
        long,
        value_enum,
        help = "Deletion criterion; omit for a report-only sweep"
    )]
    pub delete: Option<DeleteCriterion>,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Remote names to push tag deletions to (dangerous)"
    )]
    pub remotes: Vec<String>,
}

/// Validated, read-only configuration for one sweep
#[derive(Debug)]
pub struct RunConfig {
    pub repo_path: PathBuf,
    pub tag_type_filter: TagTypeFilter,
    pub preserve_pattern: Option<PreservePattern>,
    pub delete_criterion: Option<DeleteCriterion>,
    pub remote_names: Vec<String>,
}

impl RunConfig {
    pub fn try_from_cli(cli: &Cli) -> anyhow::Result<Self> {
        if cli.delete == Some(DeleteCriterion::Size) {
            anyhow::bail!(
                "deletion criterion 'size' has no decision rule implemented; \
                use --delete no-branch"
            );
        }

        let repo_path = match &cli.git {
            Some(path) => path.clone(),
            None => match std::env::var_os("GIT_DIR") {
                Some(dir) => PathBuf::from(dir),
                None => std::env::current_dir().context("cannot determine current directory")?,
            },
        };

        let preserve_pattern = cli
            .preserve
            .as_deref()
            .map(PreservePattern::try_parse)
            .transpose()?;

        Ok(RunConfig {
            repo_path,
            tag_type_filter: cli.tag_type,
            preserve_pattern,
            delete_criterion: cli.delete,
            remote_names: cli.remotes.clone(),
        })
    }
}
