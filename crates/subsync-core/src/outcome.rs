//! Per-source outcomes and the aggregated run report.

use std::fmt;

use crate::filter::FilterStats;
use crate::source::Source;

/// How one pipeline ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// New content written.
    Updated { lines: usize },
    /// Content identical to the existing artifact; nothing written.
    Unchanged,
    FetchFailed(String),
    /// Fetched, but no line matched an accepted prefix; nothing written.
    NoContent,
    PersistFailed,
    /// Pipeline exceeded its deadline.
    TimedOut,
    /// Pipeline panicked or its task was lost.
    Crashed(String),
}

impl OutcomeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Updated { .. } | OutcomeStatus::Unchanged)
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Updated { lines } => write!(f, "updated ({} configs)", lines),
            OutcomeStatus::Unchanged => write!(f, "unchanged"),
            OutcomeStatus::FetchFailed(e) => write!(f, "fetch failed: {}", e),
            OutcomeStatus::NoContent => write!(f, "no matching configs"),
            OutcomeStatus::PersistFailed => write!(f, "could not save artifact"),
            OutcomeStatus::TimedOut => write!(f, "timed out"),
            OutcomeStatus::Crashed(e) => write!(f, "pipeline crashed: {}", e),
        }
    }
}

/// Result of one pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub source_key: String,
    pub label: String,
    pub icon: String,
    pub succeeded: bool,
    pub status: OutcomeStatus,
    /// Present once the body got through the filter.
    pub stats: Option<FilterStats>,
    /// First written configs (truncated), only for `Updated`.
    pub preview: Vec<String>,
}

impl RunOutcome {
    pub fn new(source: &Source, status: OutcomeStatus) -> Self {
        Self {
            source_key: source.key.clone(),
            label: source.label.clone(),
            icon: source.icon.clone(),
            succeeded: status.is_success(),
            status,
            stats: None,
            preview: Vec::new(),
        }
    }

    pub fn with_stats(mut self, stats: FilterStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_preview(mut self, preview: Vec<String>) -> Self {
        self.preview = preview;
        self
    }

    pub fn status_message(&self) -> String {
        self.status.to_string()
    }
}

/// Minimum fraction of sources that must succeed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuccessPolicy {
    pub min_ratio: f64,
}

impl SuccessPolicy {
    pub fn new(min_ratio: f64) -> Self {
        Self {
            min_ratio: min_ratio.clamp(0.0, 1.0),
        }
    }

    /// `succeeded / total >= min_ratio`. A run with no sources never succeeds.
    pub fn is_met(&self, succeeded: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        // Epsilon keeps e.g. 0.7 * 10 from demanding 7.000000000000001.
        succeeded as f64 + 1e-9 >= self.min_ratio * total as f64
    }
}

impl Default for SuccessPolicy {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// All outcomes of one run, in source configuration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcomes: Vec<RunOutcome>,
    pub succeeded: usize,
    pub total: usize,
    pub overall_success: bool,
}

impl RunReport {
    /// Re-key `outcomes` (completion order) to the order of `sources`.
    /// A source without an outcome is recorded as crashed.
    pub fn collect(sources: &[Source], mut outcomes: Vec<RunOutcome>, policy: SuccessPolicy) -> Self {
        let ordered: Vec<RunOutcome> = sources
            .iter()
            .map(|s| match outcomes.iter().position(|o| o.source_key == s.key) {
                Some(i) => outcomes.swap_remove(i),
                None => RunOutcome::new(s, OutcomeStatus::Crashed("no result collected".to_string())),
            })
            .collect();
        let succeeded = ordered.iter().filter(|o| o.succeeded).count();
        let total = ordered.len();
        Self {
            overall_success: policy.is_met(succeeded, total),
            outcomes: ordered,
            succeeded,
            total,
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}
