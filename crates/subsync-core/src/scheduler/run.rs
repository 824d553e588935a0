//! Run one pipeline on the blocking pool under a deadline.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OwnedSemaphorePermit;

use crate::outcome::{OutcomeStatus, RunOutcome};
use crate::pipeline::{run_pipeline, PipelineContext};
use crate::source::Source;

/// Runs `source`'s pipeline via `spawn_blocking`, bounded by `deadline`.
///
/// Always yields an outcome: a missed deadline becomes `TimedOut`, a panic
/// becomes `Crashed`. A timed-out pipeline keeps running in the background
/// and keeps `slot` until it returns, so the pool bound covers it too. Its
/// artifact write is atomic, so it can only land whole or not at all.
pub async fn run_one(
    ctx: Arc<PipelineContext>,
    source: Source,
    deadline: Duration,
    slot: OwnedSemaphorePermit,
) -> RunOutcome {
    let handle = tokio::task::spawn_blocking({
        let ctx = Arc::clone(&ctx);
        let source = source.clone();
        move || {
            let _slot = slot;
            run_pipeline(&source, &ctx)
        }
    });

    match tokio::time::timeout(deadline, handle).await {
        Ok(Ok(outcome)) => {
            tracing::debug!(source = %outcome.source_key, status = %outcome.status, "pipeline finished");
            outcome
        }
        Ok(Err(e)) => {
            let msg = if e.is_panic() {
                panic_message(e.into_panic())
            } else {
                e.to_string()
            };
            tracing::error!(source = %source.key, "pipeline task failed: {}", msg);
            RunOutcome::new(&source, OutcomeStatus::Crashed(msg))
        }
        Err(_) => {
            tracing::warn!(source = %source.key, ?deadline, "pipeline timed out");
            RunOutcome::new(&source, OutcomeStatus::TimedOut)
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
