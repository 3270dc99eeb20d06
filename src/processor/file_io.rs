//! # File I/O Module
//!
//! Whole-file reads and writes for the processor. Every call opens and closes
//! its own handle, so no handle outlives a single operation.

use std::path::Path;

use crate::error::HeaderError;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Read full file content as UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String, HeaderError> {
    std::fs::read_to_string(path).map_err(|e| HeaderError::io(path, e))
  }

  /// Replace the file content.
  pub fn write_file(path: &Path, content: &str) -> Result<(), HeaderError> {
    std::fs::write(path, content).map_err(|e| HeaderError::io(path, e))
  }
}
