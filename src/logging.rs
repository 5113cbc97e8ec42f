//! Tracing subscriber construction
//!
//! The subscriber is built exactly once, in `main`, from the parsed CLI; no
//! module owns logger state. Two fmt layers share one filter: a console layer
//! on stderr (dropped entirely under `--quiet`) and a plain-text file layer
//! appending to the `--output` path. `RUST_LOG` overrides the verbosity
//! computed from `-v`.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug)]
pub struct LogOptions {
    pub verbose: u8,
    pub quiet: bool,
    pub file: PathBuf,
}

pub fn init(options: &LogOptions) -> anyhow::Result<()> {
    let default_level = match options.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(open_log_file(&options.file)?));

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if options.quiet {
        registry.init();
    } else {
        let console_layer = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        registry.with(console_layer).init();
    }

    Ok(())
}

fn open_log_file(path: &Path) -> anyhow::Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file at {}", path.display()))
}
