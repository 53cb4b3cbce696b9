//! Where the settings text lives between operations.

use crate::error::{ConfigError, Result};
use crate::fs::atomic_write_file;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Whole-text storage for a settings file.
///
/// Implementations hold no open handles between calls; each call reads or
/// replaces the complete content.
pub trait Backing {
    /// Read the complete persisted text.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(text))` - The persisted content
    /// * `Ok(None)` - Nothing has been persisted yet
    /// * `Err(ConfigError::Io)` - The content exists but could not be read
    /// * `Err(ConfigError::Encoding)` - The content is not valid UTF-8
    fn load(&self) -> Result<Option<String>>;

    /// Replace the complete content.
    ///
    /// # Arguments
    ///
    /// * `content` - The full text to persist; never appended
    ///
    /// # Returns
    ///
    /// * `Ok(())` - A following `load` returns exactly `content`
    /// * `Err(ConfigError::Io)` - Persisting failed and the old content stands
    fn store(&mut self, content: &str) -> Result<()>;

    /// Human-readable location used in log lines.
    fn location(&self) -> String;
}

/// A settings file on disk.
///
/// Reads go straight through `std::fs`; writes go through
/// [`atomic_write_file`], so a crash mid-persist leaves either the old or the
/// new file, never a torn one.
#[derive(Debug, Clone)]
pub struct FileBacking {
    path: PathBuf,
}

impl FileBacking {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backing for FileBacking {
    fn load(&self) -> Result<Option<String>> {
        // A missing file is the "nothing persisted" case, not an error
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::io(&self.path, e)),
        };

        String::from_utf8(bytes).map(Some).map_err(|_| ConfigError::Encoding {
            path: self.path.clone(),
        })
    }

    /// Creates missing parent directories before writing.
    fn store(&mut self, content: &str) -> Result<()> {
        atomic_write_file(&self.path, content)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backing for tests and embedding; counts persists.
#[derive(Debug, Clone, Default)]
pub struct MemoryBacking {
    content: Option<String>,
    writes: usize,
}

impl MemoryBacking {
    /// Nothing persisted yet, like a missing file.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            writes: 0,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of successful `store` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Backing for MemoryBacking {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.content.clone())
    }

    fn store(&mut self, content: &str) -> Result<()> {
        self.content = Some(content.to_string());
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_backing_missing_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let backing = FileBacking::new(temp_dir.path().join("config.ini"));

        assert!(backing.load().unwrap().is_none());
    }

    #[test]
    fn file_backing_round_trips_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut backing = FileBacking::new(temp_dir.path().join("config.ini"));

        backing.store("[ttNodes]\n").unwrap();

        assert_eq!(backing.load().unwrap().as_deref(), Some("[ttNodes]\n"));
    }

    #[test]
    fn file_backing_rejects_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        fs::write(&path, [0x5b, 0xff, 0xfe, 0x5d]).unwrap();

        let err = FileBacking::new(&path).load().unwrap_err();

        assert!(matches!(err, ConfigError::Encoding { .. }));
    }

    #[test]
    fn file_backing_directory_path_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = FileBacking::new(temp_dir.path()).load().unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn memory_backing_counts_writes() {
        let mut backing = MemoryBacking::new();
        assert!(backing.load().unwrap().is_none());

        backing.store("a").unwrap();
        backing.store("b").unwrap();

        assert_eq!(backing.content(), Some("b"));
        assert_eq!(backing.writes(), 2);
    }
}
