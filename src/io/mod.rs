pub mod destinations;
pub mod input;

pub use destinations::{FileDestination, MemoryDestination, OutputDestination, StdoutDestination};
pub use input::GradingInput;

use crate::errors::{Error, Result};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_system(path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::file_system(path, e))?;
    }
    Ok(())
}
