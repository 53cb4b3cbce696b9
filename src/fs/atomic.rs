//! Atomic file replacement for the settings file.
//!
//! Every persist writes the whole store. To avoid leaving a half-written
//! `config.ini` behind when the process dies mid-write, content goes to a
//! sibling temporary file first:
//!
//! 1. Write content to `.{filename}.tmp` in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! `std::fs::rename` replaces an existing destination on both POSIX and
//! Windows, provided source and destination live on the same volume, which
//! holds because the temp file is a sibling of the target.

use crate::error::{ConfigError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`, creating parent directories as needed.
///
/// The file handle is opened, written, synced and closed inside this call;
/// nothing stays open afterwards, including on the error paths.
///
/// # Arguments
///
/// * `path` - The settings file to replace
/// * `content` - The complete new text
///
/// # Returns
///
/// * `Ok(())` - The target now holds exactly `content`
/// * `Err(ConfigError::Io)` - Creating the directory, writing, syncing or
///   renaming failed; the previous file, if any, is untouched
/// * `Err(ConfigError::UserError)` - `path` has no usable file name
///
/// # Example
///
/// ```no_run
/// use ttnconf::fs::atomic_write_file;
///
/// atomic_write_file("config.ini", "[ttNodes]\nauto_update = False\n\n")?;
/// # Ok::<(), ttnconf::ConfigError>(())
/// ```
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }

    // Temp file lives beside the target so the rename stays on one volume
    let temp_path = temp_path_for(path)?;

    // Write to temp file with sync
    write_and_sync(&temp_path, content.as_bytes())?;

    // Atomically replace the target
    replace(&temp_path, path)
}

/// `.{filename}.tmp` next to the target.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        ConfigError::UserError(format!("invalid config path '{}'", target.display()))
    })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write `content` to `path` and fsync it. On failure the partial file is removed.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| ConfigError::io(path, e))?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(ConfigError::io(path, e));
    }

    Ok(())
}

/// Rename `source` over `target`, cleaning up `source` if the rename fails.
fn replace(source: &Path, target: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, target) {
        let _ = fs::remove_file(source);
        return Err(ConfigError::io(target, e));
    }

    sync_parent_dir(target);
    Ok(())
}

/// Persist the directory entry of `target` as well.
#[cfg(unix)]
fn sync_parent_dir(target: &Path) {
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_target: &Path) {}
