//! Output destinations for rendered reports.
//!
//! Rendering never touches the outside world; handing the finished report to
//! a destination is the only external write of a grading run.
//!
//! # Example
//!
//! ```rust,ignore
//! use autograde::io::destinations::{FileDestination, MemoryDestination};
//!
//! let file_dest = FileDestination::new("score.md".into());
//! file_dest.write_str("# Quality Score")?;
//!
//! let mem_dest = MemoryDestination::new();
//! mem_dest.write_str("# Quality Score")?;
//! assert!(mem_dest.get_content().contains("Quality Score"));
//! ```

use crate::errors::{Error, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Trait for destinations that can receive a rendered report.
pub trait OutputDestination: Send + Sync {
    /// Write string content to the destination.
    fn write_str(&self, content: &str) -> Result<()>;

    /// Flush any buffered content.
    fn flush(&self) -> Result<()>;

    /// Get a description of the destination for log messages.
    fn description(&self) -> String;
}

/// File system output destination.
///
/// Replaces the file's content, creating missing parent directories.
#[derive(Debug, Clone)]
pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputDestination for FileDestination {
    fn write_str(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            super::ensure_dir(parent)?;
        }
        std::fs::write(&self.path, content).map_err(|e| Error::file_system(&self.path, e))
    }

    fn flush(&self) -> Result<()> {
        // File writes are already flushed
        Ok(())
    }

    fn description(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// In-memory output destination for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryDestination {
    buffer: Arc<RwLock<String>>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content of the buffer.
    pub fn get_content(&self) -> String {
        self.buffer.read().expect("RwLock poisoned").clone()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.read().expect("RwLock poisoned").is_empty()
    }
}

impl OutputDestination for MemoryDestination {
    fn write_str(&self, content: &str) -> Result<()> {
        self.buffer
            .write()
            .expect("RwLock poisoned")
            .push_str(content);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> String {
        "memory".to_string()
    }
}

/// Standard output destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDestination;

impl StdoutDestination {
    pub fn new() -> Self {
        Self
    }
}

impl OutputDestination for StdoutDestination {
    fn write_str(&self, content: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(content.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        io::stdout().lock().flush()?;
        Ok(())
    }

    fn description(&self) -> String {
        "stdout".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_destination_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.md");

        let dest = FileDestination::new(path.clone());
        dest.write_str("# Quality Score").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# Quality Score");
    }

    #[test]
    fn test_file_destination_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("nested").join("score.md");

        FileDestination::new(path.clone()).write_str("ok").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_file_destination_description() {
        let dest = FileDestination::new(PathBuf::from("/tmp/score.md"));
        assert!(dest.description().contains("score.md"));
    }

    #[test]
    fn test_memory_destination_appends() {
        let dest = MemoryDestination::new();
        assert!(dest.is_empty());

        dest.write_str("Hello").unwrap();
        dest.write_str(", World!").unwrap();

        assert_eq!(dest.get_content(), "Hello, World!");
    }
}
