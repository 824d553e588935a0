//! Terminal rendering of run outcomes.

use subsync_core::{FilterStats, RunOutcome, RunReport};

fn name(outcome: &RunOutcome) -> String {
    if outcome.icon.is_empty() {
        outcome.label.clone()
    } else {
        format!("{} {}", outcome.icon, outcome.label)
    }
}

fn stats_suffix(stats: &FilterStats) -> String {
    let mut parts = vec![format!("{}/{} lines kept", stats.kept, stats.total_lines)];
    for (keyword, count) in &stats.keyword_counts {
        parts.push(format!("{}: {}", keyword, count));
    }
    format!(" [{}]", parts.join(", "))
}

/// One line per source: marker, name, status and, when the body was filtered, stats.
pub fn status_line(outcome: &RunOutcome) -> String {
    let marker = if outcome.succeeded { "ok  " } else { "FAIL" };
    let stats = outcome.stats.as_ref().map(stats_suffix).unwrap_or_default();
    format!("{} {}: {}{}", marker, name(outcome), outcome.status, stats)
}

pub fn summary_line(report: &RunReport) -> String {
    format!(
        "{}/{} sources succeeded; {}",
        report.succeeded,
        report.total,
        if report.overall_success {
            "run OK"
        } else {
            "run FAILED"
        }
    )
}

pub fn print_report(report: &RunReport) {
    for outcome in &report.outcomes {
        println!("{}", status_line(outcome));
    }
    println!("{}", summary_line(report));
}
