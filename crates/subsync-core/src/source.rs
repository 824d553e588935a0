//! Upstream source identity, built once from configuration.

use std::time::Duration;

use crate::config::SourceConfig;

/// One upstream subscription endpoint. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub key: String,
    pub label: String,
    pub url: String,
    pub icon: String,
    /// Fetch timeout for a single GET.
    pub timeout: Duration,
}

impl Source {
    pub fn new(key: &str, label: &str, url: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            url: url.to_string(),
            icon: String::new(),
            timeout: Duration::from_secs(crate::config::DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `<icon> <label>`, or just the label when no icon is set.
    pub fn display_name(&self) -> String {
        if self.icon.is_empty() {
            self.label.clone()
        } else {
            format!("{} {}", self.icon, self.label)
        }
    }
}

impl From<&SourceConfig> for Source {
    fn from(c: &SourceConfig) -> Self {
        Self {
            key: c.key.clone(),
            label: c.label.clone(),
            url: c.url.clone(),
            icon: c.icon.clone(),
            timeout: Duration::from_secs(c.timeout_secs),
        }
    }
}
