use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::artifact::sanitize::{artifact_file_name, sanitize_label};
use crate::source::Source;

/// Default fetch timeout per source, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// One upstream subscription endpoint as written in config.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier (used on the command line and in logs).
    pub key: String,
    /// Human-readable label; also the basis of the artifact file name.
    pub label: String,
    /// HTTP/HTTPS URL returning one config per line.
    pub url: String,
    /// Cosmetic icon/flag shown in status lines and the artifact header.
    #[serde(default)]
    pub icon: String,
    /// Fetch timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

/// Global configuration loaded from `~/.config/subsync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Directory receiving one artifact per source in multi-source mode.
    pub output_dir: PathBuf,
    /// Fixed artifact path for single-source mode. None = `<output_dir>/<key>_subscriptions.txt`.
    #[serde(default)]
    pub single_output: Option<PathBuf>,
    /// Lines are kept only if they start with one of these (case-sensitive).
    pub accepted_prefixes: Vec<String>,
    /// Keywords counted in retained lines for the run report (case-insensitive).
    #[serde(default)]
    pub stat_keywords: Vec<String>,
    /// Drop repeated lines, keeping the first occurrence.
    #[serde(default)]
    pub dedupe: bool,
    /// Maximum pipelines in flight at once.
    pub max_concurrent: usize,
    /// Deadline for one whole pipeline (fetch + filter + detect + persist).
    pub pipeline_timeout_secs: u64,
    /// Fraction of sources that must succeed for the run to succeed.
    pub min_success_ratio: f64,
    pub sources: Vec<SourceConfig>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("subscriptions"),
            single_output: None,
            accepted_prefixes: vec!["trojan://".to_string(), "vless://".to_string()],
            stat_keywords: vec!["reality".to_string(), "xtls".to_string()],
            dedupe: false,
            max_concurrent: 4,
            pipeline_timeout_secs: 30,
            min_success_ratio: 0.5,
            sources: vec![SourceConfig {
                key: "trojan".to_string(),
                label: "Trojan".to_string(),
                url: "https://istanbulsydneyhotel.com/blogs/site/sni.php?kind=trojan".to_string(),
                icon: "🚀".to_string(),
                timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            }],
        }
    }
}

impl SyncConfig {
    pub fn pipeline_timeout(&self) -> Duration {
        Duration::from_secs(self.pipeline_timeout_secs)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("config has no [[sources]]");
        }
        if self.accepted_prefixes.iter().all(|p| p.is_empty()) {
            bail!("accepted_prefixes must contain at least one non-empty prefix");
        }
        if self.max_concurrent == 0 {
            bail!("max_concurrent must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.min_success_ratio) {
            bail!(
                "min_success_ratio must be within [0, 1], got {}",
                self.min_success_ratio
            );
        }
        let mut keys = HashSet::new();
        // Case-folded so case-insensitive filesystems cannot merge two artifacts.
        let mut file_names = HashSet::new();
        for s in &self.sources {
            if s.key.trim().is_empty() {
                bail!("source with label {:?} has an empty key", s.label);
            }
            if !keys.insert(s.key.as_str()) {
                bail!("duplicate source key {:?}", s.key);
            }
            let file_name = artifact_file_name(&s.label, &s.key);
            if !file_names.insert(file_name.to_lowercase()) {
                bail!(
                    "source {}: label {:?} maps to artifact {:?}, already used by another source",
                    s.key,
                    s.label,
                    file_name
                );
            }
            let parsed = url::Url::parse(&s.url)
                .with_context(|| format!("source {}: invalid url {:?}", s.key, s.url))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!("source {}: unsupported scheme {:?}", s.key, parsed.scheme());
            }
        }
        Ok(())
    }

    /// All configured sources, in configuration order.
    pub fn sources(&self) -> Vec<Source> {
        self.sources.iter().map(Source::from).collect()
    }

    /// Configured sources whose key is in `keys`, in configuration order.
    /// Fails on a key that is not configured.
    pub fn select_sources(&self, keys: &[String]) -> Result<Vec<Source>> {
        if keys.is_empty() {
            return Ok(self.sources());
        }
        for k in keys {
            if !self.sources.iter().any(|s| &s.key == k) {
                bail!("unknown source key {:?}", k);
            }
        }
        Ok(self
            .sources
            .iter()
            .filter(|s| keys.contains(&s.key))
            .map(Source::from)
            .collect())
    }

    /// Artifact path used by single-source mode for `source_key`. The key is
    /// sanitized, so the default path always stays inside `output_dir`.
    pub fn single_output_path(&self, source_key: &str) -> PathBuf {
        match &self.single_output {
            Some(p) => p.clone(),
            None => {
                let stem = match sanitize_label(source_key) {
                    s if s.is_empty() => "source".to_string(),
                    s => s,
                };
                self.output_dir.join(format!("{}_subscriptions.txt", stem))
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("subsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load and validate configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<SyncConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}
