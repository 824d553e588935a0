//! Multi-source orchestration.
//!
//! Drives one pipeline per source with bounded concurrency and a per-pipeline
//! deadline, then folds the outcomes into a `RunReport`.

mod parallel;
mod run;

pub use parallel::run_pipelines_parallel;
pub use run::run_one;

use std::sync::Arc;
use std::time::Duration;

use crate::artifact::ArtifactStore;
use crate::config::SyncConfig;
use crate::fetch::Fetcher;
use crate::outcome::{RunReport, SuccessPolicy};
use crate::pipeline::PipelineContext;
use crate::source::Source;

/// Owns the collaborators and limits for a run. Holds no state between runs.
pub struct Orchestrator {
    ctx: Arc<PipelineContext>,
    max_concurrent: usize,
    pipeline_timeout: Duration,
    policy: SuccessPolicy,
}

impl Orchestrator {
    pub fn new(
        ctx: PipelineContext,
        max_concurrent: usize,
        pipeline_timeout: Duration,
        policy: SuccessPolicy,
    ) -> Self {
        Self {
            ctx: Arc::new(ctx),
            max_concurrent: max_concurrent.max(1),
            pipeline_timeout,
            policy,
        }
    }

    pub fn from_config(cfg: &SyncConfig, fetcher: Arc<dyn Fetcher>, store: ArtifactStore) -> Self {
        Self::new(
            PipelineContext::from_config(cfg, fetcher, store),
            cfg.max_concurrent,
            cfg.pipeline_timeout(),
            SuccessPolicy::new(cfg.min_success_ratio),
        )
    }

    pub fn with_policy(mut self, policy: SuccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.ctx.store
    }

    /// Run every source's pipeline and aggregate. Outcomes come back in `sources` order.
    pub async fn run(&self, sources: &[Source]) -> RunReport {
        tracing::info!(
            sources = sources.len(),
            max_concurrent = self.max_concurrent,
            timeout = ?self.pipeline_timeout,
            "sync run started"
        );
        let outcomes = run_pipelines_parallel(
            Arc::clone(&self.ctx),
            sources,
            self.max_concurrent,
            self.pipeline_timeout,
        )
        .await;
        let report = RunReport::collect(sources, outcomes, self.policy);
        tracing::info!(
            succeeded = report.succeeded,
            total = report.total,
            overall_success = report.overall_success,
            "sync run finished"
        );
        report
    }
}
