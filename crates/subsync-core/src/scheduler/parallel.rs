//! Run pipelines concurrently with a fixed in-flight limit.
//!
//! A semaphore with `max_concurrent` permits gates dispatch. Each pipeline
//! holds its permit until its blocking work returns, even past its deadline,
//! so at most `max_concurrent` pipelines ever run at once.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::outcome::RunOutcome;
use crate::pipeline::PipelineContext;
use crate::source::Source;

use super::run::run_one;

/// Returns outcomes in completion order. A task lost to a join error is logged
/// and has no entry; `RunReport::collect` fills the gap.
pub async fn run_pipelines_parallel(
    ctx: Arc<PipelineContext>,
    sources: &[Source],
    max_concurrent: usize,
    deadline: Duration,
) -> Vec<RunOutcome> {
    let slots = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut join_set = tokio::task::JoinSet::new();
    let mut outcomes = Vec::with_capacity(sources.len());

    for source in sources.iter().cloned() {
        let slot = match Arc::clone(&slots).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!(source = %source.key, "pipeline slot: {}", e);
                break;
            }
        };
        tracing::debug!(
            source = %source.key,
            free_slots = slots.available_permits(),
            "starting pipeline"
        );
        join_set.spawn(run_one(Arc::clone(&ctx), source, deadline, slot));
    }

    while let Some(res) = join_set.join_next().await {
        match res {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => tracing::error!("pipeline task join: {}", e),
        }
    }

    outcomes
}
