//! # Error Module
//!
//! Typed errors for the failure modes a caller may want to tell apart.
//! Everything else travels as [`anyhow::Error`] with context attached.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors raised by headerman operations.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// A required argument is missing or arguments conflict.
  #[error("{0}")]
  Usage(String),

  /// The user declined the confirmation prompt. No file was touched.
  #[error("Aborted by user")]
  Aborted,

  /// The confirmation answer could not be read.
  #[error("Failed to read confirmation: {0}")]
  Prompt(#[source] std::io::Error),

  /// A single file could not be read or written.
  #[error("I/O error on '{path}': {source}")]
  Io { path: PathBuf, source: std::io::Error },

  /// The configuration file could not be loaded.
  #[error(transparent)]
  Config(#[from] ConfigError),
}

impl HeaderError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  /// Process exit code used by the CLI for this error.
  pub const fn exit_code(&self) -> i32 {
    match self {
      HeaderError::Usage(_) => 2,
      HeaderError::Aborted => 0,
      HeaderError::Prompt(_) | HeaderError::Io { .. } | HeaderError::Config(_) => 1,
    }
  }
}
