//! Whole-file replacement via temp file + rename.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `de.txt` → `de.txt.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Replace `path` with `contents`. Readers see either the previous file or the
/// new one, never a mix. Creates parent directories as needed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create dir: {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    let res = write_and_sync(&tmp, contents).and_then(|()| {
        fs::rename(&tmp, path).with_context(|| {
            format!("failed to rename {} to {}", tmp.display(), path.display())
        })
    });
    if res.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    res
}

fn write_and_sync(tmp: &Path, contents: &str) -> Result<()> {
    let mut f = File::create(tmp).with_context(|| format!("create {}", tmp.display()))?;
    f.write_all(contents.as_bytes())
        .with_context(|| format!("write {}", tmp.display()))?;
    f.sync_all().with_context(|| format!("sync {}", tmp.display()))?;
    Ok(())
}
