//! CLI for subsync.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use subsync_core::config::{self, SyncConfig};

use commands::{run_fetch, run_inspect, run_sources, run_sync, RunOverrides};

/// Top-level CLI for subsync.
#[derive(Debug, Parser)]
#[command(name = "subsync")]
#[command(about = "Fetch proxy subscription lists and keep filtered local copies", long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default XDG location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sync every configured source (or the ones named with --source).
    Run {
        /// Run up to N pipelines concurrently (default from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Directory for per-source artifacts (default from config).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Only sync this source key. Repeatable.
        #[arg(long = "source", value_name = "KEY")]
        source: Vec<String>,
        /// Fraction of sources that must succeed for exit code 0.
        #[arg(long, value_name = "R")]
        min_success: Option<f64>,
    },

    /// Sync one source into a fixed file and preview the first configs.
    Fetch {
        /// Source key from the config.
        key: String,
        /// Artifact path (default <output_dir>/<key>_subscriptions.txt).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List configured sources.
    Sources,

    /// Show header, line count and digest of an artifact.
    Inspect {
        /// Path to the artifact.
        path: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<SyncConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    /// Parse arguments and dispatch. `Ok(false)` means the command ran but did
    /// not succeed (e.g. the success threshold was missed).
    pub async fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                jobs,
                output_dir,
                source,
                min_success,
            } => {
                let overrides = RunOverrides {
                    jobs,
                    output_dir,
                    sources: source,
                    min_success,
                };
                run_sync(cfg, overrides).await
            }
            CliCommand::Fetch { key, output } => run_fetch(&cfg, &key, output).await,
            CliCommand::Sources => {
                run_sources(&cfg);
                Ok(true)
            }
            CliCommand::Inspect { path } => run_inspect(&path),
        }
    }
}

#[cfg(test)]
mod tests;
