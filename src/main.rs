use anyhow::Result;
use clap::Parser;
use git_tag_cleaner::cleaner::Cleaner;
use git_tag_cleaner::cli::{Cli, RunConfig};
use git_tag_cleaner::git::GitBackend;
use git_tag_cleaner::logging::{self, LogOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        file: cli.output.clone(),
    })?;

    let config = RunConfig::try_from_cli(&cli)?;
    let git = GitBackend::open(&config.repo_path)?;

    let cleaner = Cleaner::new(git, config, Box::new(std::io::stdout()));
    cleaner.run()?;

    Ok(())
}
