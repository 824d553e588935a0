//! `subsync fetch`: single-source mode writing to a fixed path.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use subsync_core::artifact::format;
use subsync_core::config::SyncConfig;
use subsync_core::{ArtifactStore, CurlFetcher, Orchestrator, SuccessPolicy};

use super::report::print_report;

const PREVIEW_LINES: usize = 3;

pub async fn run_fetch(cfg: &SyncConfig, key: &str, output: Option<PathBuf>) -> Result<bool> {
    let sources = cfg.select_sources(&[key.to_string()])?;
    let path = output.unwrap_or_else(|| cfg.single_output_path(key));
    let store = ArtifactStore::SingleFile(path.clone());
    let orchestrator = Orchestrator::from_config(cfg, Arc::new(CurlFetcher), store)
        .with_policy(SuccessPolicy::new(1.0));

    let report = orchestrator.run(&sources).await;
    print_report(&report);

    let Some(outcome) = report.outcomes.first() else {
        return Ok(false);
    };
    if outcome.succeeded {
        let preview = if outcome.preview.is_empty() {
            preview_from_artifact(&path)?
        } else {
            outcome.preview.clone()
        };
        println!("Saved to {}", path.display());
        for line in preview {
            println!("  {}", line);
        }
    }
    Ok(report.overall_success)
}

/// First configs of an existing artifact, for runs where nothing was rewritten.
fn preview_from_artifact(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read artifact {}", path.display()))?;
    Ok(format::parse(&text)
        .map(|parsed| {
            parsed
                .body
                .lines()
                .take(PREVIEW_LINES)
                .map(|l| l.trim().to_string())
                .collect()
        })
        .unwrap_or_default())
}
