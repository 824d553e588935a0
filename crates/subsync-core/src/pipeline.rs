//! One source's fetch → filter → detect → persist sequence.
//!
//! Blocking; the scheduler runs it on the blocking pool. All slow work (fetch,
//! filter, hashing) happens before the single atomic write at the end.

use std::sync::Arc;

use crate::artifact::ArtifactStore;
use crate::config::SyncConfig;
use crate::fetch::Fetcher;
use crate::filter::{filter_lines, FilterOptions, FilterStats};
use crate::outcome::{OutcomeStatus, RunOutcome};
use crate::source::Source;

const PREVIEW_LINES: usize = 3;
const PREVIEW_CHARS: usize = 80;

/// Shared, read-only collaborators of every pipeline in a run.
pub struct PipelineContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub store: ArtifactStore,
    pub filter: FilterOptions,
    pub stat_keywords: Vec<String>,
}

impl PipelineContext {
    pub fn new(fetcher: Arc<dyn Fetcher>, store: ArtifactStore, filter: FilterOptions) -> Self {
        Self {
            fetcher,
            store,
            filter,
            stat_keywords: Vec::new(),
        }
    }

    /// Filter options and keywords from `cfg`.
    pub fn from_config(cfg: &SyncConfig, fetcher: Arc<dyn Fetcher>, store: ArtifactStore) -> Self {
        Self {
            fetcher,
            store,
            filter: FilterOptions {
                prefixes: cfg.accepted_prefixes.clone(),
                dedupe: cfg.dedupe,
            },
            stat_keywords: cfg.stat_keywords.clone(),
        }
    }
}

/// Run the whole pipeline for `source`. Never panics on I/O or network errors;
/// every ending is reported through the returned outcome.
pub fn run_pipeline(source: &Source, ctx: &PipelineContext) -> RunOutcome {
    let fetched = ctx.fetcher.fetch(source);
    let raw = match fetched.raw_body {
        Some(body) if fetched.succeeded => body,
        _ => {
            let reason = fetched.error.unwrap_or_else(|| "no body".to_string());
            return RunOutcome::new(source, OutcomeStatus::FetchFailed(reason));
        }
    };

    let body = filter_lines(&raw, &ctx.filter);
    let stats = FilterStats::compute(&raw, &body, &ctx.stat_keywords);
    if stats.dropped > 0 {
        tracing::info!(source = %source.key, dropped = stats.dropped, "filtered out non-matching lines");
    }
    if body.is_empty() {
        tracing::warn!(source = %source.key, "no line matched an accepted prefix; artifact left untouched");
        return RunOutcome::new(source, OutcomeStatus::NoContent).with_stats(stats);
    }

    let text = body.to_text();
    if !ctx.store.has_changed(source, &text) {
        return RunOutcome::new(source, OutcomeStatus::Unchanged).with_stats(stats);
    }

    if !ctx.store.persist(source, &text) {
        return RunOutcome::new(source, OutcomeStatus::PersistFailed).with_stats(stats);
    }

    let preview = body
        .lines()
        .iter()
        .take(PREVIEW_LINES)
        .map(|l| truncate_chars(l.trim(), PREVIEW_CHARS))
        .collect();
    RunOutcome::new(source, OutcomeStatus::Updated { lines: body.len() })
        .with_stats(stats)
        .with_preview(preview)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
