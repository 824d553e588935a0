//! `subsync run`: sync all (or selected) sources in parallel.

use anyhow::{bail, Result};
use std::path::PathBuf;
use std::sync::Arc;
use subsync_core::config::SyncConfig;
use subsync_core::{ArtifactStore, CurlFetcher, Orchestrator};

use super::report::print_report;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct RunOverrides {
    pub jobs: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub sources: Vec<String>,
    pub min_success: Option<f64>,
}

impl RunOverrides {
    pub fn apply(&self, mut cfg: SyncConfig) -> Result<SyncConfig> {
        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                bail!("--jobs must be at least 1");
            }
            cfg.max_concurrent = jobs;
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(ratio) = self.min_success {
            cfg.min_success_ratio = ratio;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

pub async fn run_sync(cfg: SyncConfig, overrides: RunOverrides) -> Result<bool> {
    let cfg = overrides.apply(cfg)?;
    let sources = cfg.select_sources(&overrides.sources)?;
    let store = ArtifactStore::Directory(cfg.output_dir.clone());
    let orchestrator = Orchestrator::from_config(&cfg, Arc::new(CurlFetcher), store);

    let report = orchestrator.run(&sources).await;
    print_report(&report);
    Ok(report.overall_success)
}
