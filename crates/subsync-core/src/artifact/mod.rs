//! Persisted artifacts: one text file per source holding a header and the filtered body.
//!
//! The artifact files are the only state kept between runs. `has_changed`
//! compares body digests against the file on disk; `persist` replaces the file
//! atomically.

pub mod format;
pub mod sanitize;
mod write;

pub use format::{ArtifactHeader, ParsedArtifact};
pub use write::{temp_path, write_atomic};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::checksum::body_digest;
use crate::source::Source;

/// Where artifacts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStore {
    /// Multi-source mode: `<dir>/<sanitized label>.txt` per source.
    Directory(PathBuf),
    /// Single-source mode: one fixed path.
    SingleFile(PathBuf),
}

impl ArtifactStore {
    /// Artifact path for `source`. Stable across runs for the same label.
    pub fn path_for(&self, source: &Source) -> PathBuf {
        match self {
            ArtifactStore::Directory(dir) => {
                dir.join(sanitize::artifact_file_name(&source.label, &source.key))
            }
            ArtifactStore::SingleFile(path) => path.clone(),
        }
    }

    /// True unless the existing artifact holds exactly `body`.
    ///
    /// Missing artifact → true. Unreadable or malformed artifact → true (the
    /// next persist rewrites it). Read-only, so repeated calls agree.
    pub fn has_changed(&self, source: &Source, body: &str) -> bool {
        let path = self.path_for(source);
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(source = %source.key, path = %path.display(), "no previous artifact");
                return true;
            }
            Err(e) => {
                tracing::warn!(
                    source = %source.key,
                    path = %path.display(),
                    error = %e,
                    "could not read previous artifact; treating as changed"
                );
                return true;
            }
        };

        let Some(parsed) = format::parse(&text) else {
            tracing::warn!(
                source = %source.key,
                path = %path.display(),
                "previous artifact has no recognizable header; treating as changed"
            );
            return true;
        };

        let old = body_digest(parsed.body);
        let new = body_digest(body);
        let changed = old != new;
        if !changed {
            tracing::info!(source = %source.key, digest = %new, "content unchanged since last update");
        }
        changed
    }

    /// Write header + `body` for `source`, stamped with the current local time.
    /// Returns false (after logging) on any I/O failure.
    pub fn persist(&self, source: &Source, body: &str) -> bool {
        let now = chrono::Local::now().naive_local();
        match self.persist_at(source, body, now) {
            Ok(path) => {
                tracing::info!(source = %source.key, path = %path.display(), "artifact saved");
                true
            }
            Err(e) => {
                tracing::warn!(source = %source.key, "could not save artifact: {:#}", e);
                false
            }
        }
    }

    /// Like `persist` with an explicit timestamp; returns the written path.
    pub fn persist_at(&self, source: &Source, body: &str, updated: NaiveDateTime) -> Result<PathBuf> {
        let path = self.path_for(source);
        let header = ArtifactHeader {
            title: source.display_name(),
            url: source.url.clone(),
            updated: updated.format(format::TIMESTAMP_FORMAT).to_string(),
        };
        write_atomic(&path, &format::render(&header, body))?;
        Ok(path)
    }
}

/// Summary of an artifact on disk, for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub header: ArtifactHeader,
    pub lines: usize,
    pub digest: String,
}

/// Read and parse the artifact at `path`. Ok(None) if the file is not in artifact format.
pub fn inspect(path: &Path) -> Result<Option<ArtifactInfo>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(format::parse(&text).map(|parsed| ArtifactInfo {
        lines: parsed.body.lines().count(),
        digest: body_digest(parsed.body),
        header: parsed.header,
    }))
}
