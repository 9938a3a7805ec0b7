//! Whole-file replacement for expectation files.
//!
//! Content goes to a sibling `*.tmp` file which is flushed and renamed over
//! the target, so a concurrent reader sees either the old file or the new one.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Replace `target` with `content`, creating parent directories as needed.
///
/// # Errors
///
/// `Io` if the directory, the staging file or the rename fails. A failed
/// rename removes the staging file.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(|e| io_error("create_store_dir", e))?;
    }

    let staging = staging_path(target);
    let mut file = File::create(&staging).map_err(|e| io_error("write_store_temp", e))?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| io_error("write_store_temp", e))?;
    drop(file);

    fs::rename(&staging, target).map_err(|e| {
        let _ = fs::remove_file(&staging);
        io_error("rename_store_temp", e)
    })
}
