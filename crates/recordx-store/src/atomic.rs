//! Crash-safe file replacement
//!
//! A snapshot file is either the previous version or the new one, never a
//! truncated mix: bytes go to `<target>.tmp`, are flushed to disk, and the
//! temp file is renamed over the target.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{io_error, Result};

fn temp_sibling(target: &Path) -> PathBuf {
    target.with_extension("tmp")
}

/// Replace `target` with `content`
///
/// The parent directory is created when missing. Errors carry the target
/// path (not the temp path) as their entity.
///
/// # Errors
/// `Io` or `PermissionDenied` if any filesystem step fails.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    let label = target.display().to_string();
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(|e| io_error("create_data_dir", label.clone(), &e))?;
    }

    let temp = temp_sibling(target);
    let written = File::create(&temp).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });
    let outcome = match written {
        Ok(()) => fs::rename(&temp, target).map_err(|e| io_error("rename_temp", label, &e)),
        Err(e) => Err(io_error("write_temp", label, &e)),
    };
    if outcome.is_err() {
        let _ = fs::remove_file(&temp);
    }
    outcome
}
