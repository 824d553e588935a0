//! Line filter: keep only configs whose trimmed line starts with an accepted scheme prefix.

use std::collections::HashSet;

/// What to keep from a fetched body.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Case-sensitive scheme prefixes, e.g. `trojan://`.
    pub prefixes: Vec<String>,
    /// Drop later repeats of a line (compared trimmed), keeping the first.
    pub dedupe: bool,
}

impl FilterOptions {
    pub fn new(prefixes: &[&str]) -> Self {
        Self {
            prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
            dedupe: false,
        }
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    fn accepts(&self, line: &str) -> bool {
        let t = line.trim();
        self.prefixes
            .iter()
            .any(|p| !p.is_empty() && t.starts_with(p.as_str()))
    }
}

/// Retained lines in source order. Every line is non-empty and prefix-matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredBody {
    lines: Vec<String>,
}

impl FilteredBody {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined with a single `\n`, no trailing newline.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split `raw` on newlines and keep the lines accepted by `opts`, preserving order.
pub fn filter_lines(raw: &str, opts: &FilterOptions) -> FilteredBody {
    let mut seen: HashSet<&str> = HashSet::new();
    let lines = raw
        .lines()
        .filter(|line| opts.accepts(line))
        .filter(|line| !opts.dedupe || seen.insert(line.trim()))
        .map(str::to_string)
        .collect();
    FilteredBody { lines }
}

/// Diagnostic counts over a filtered body. Never feeds back into the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total_lines: usize,
    pub kept: usize,
    pub dropped: usize,
    /// (keyword, retained lines containing it, case-insensitive)
    pub keyword_counts: Vec<(String, usize)>,
}

impl FilterStats {
    pub fn compute(raw: &str, filtered: &FilteredBody, keywords: &[String]) -> Self {
        let total_lines = raw.lines().count();
        let lowered: Vec<String> = filtered.lines().iter().map(|l| l.to_lowercase()).collect();
        let keyword_counts = keywords
            .iter()
            .filter(|k| !k.is_empty())
            .map(|k| {
                let needle = k.to_lowercase();
                let n = lowered.iter().filter(|l| l.contains(&needle)).count();
                (k.clone(), n)
            })
            .collect();
        Self {
            total_lines,
            kept: filtered.len(),
            dropped: total_lines.saturating_sub(filtered.len()),
            keyword_counts,
        }
    }
}
