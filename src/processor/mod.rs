//! # Processor Module
//!
//! This module contains the core functionality: finding candidate files and
//! adding or removing header blocks in them.
//!
//! The module is organized into several submodules:
//! - [`file_collector`] - Candidate file discovery
//! - [`header_ops`] - Pure text transforms for inserting and stripping headers
//! - [`file_io`] - File reading and writing
//!
//! The single-file operations [`insert_header`], [`remove_header`] and
//! [`remove_exact_header`] are usable on their own. The [`Processor`] runs one
//! of them over a batch: it asks for confirmation once, visits the files one
//! at a time, isolates per-file failures and reports progress.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerman::confirm::AssumeYes;
//! use headerman::output::NoProgress;
//! use headerman::processor::{Processor, ProcessorConfig, discover};
//! use headerman::templates::HeaderTemplate;
//!
//! # fn main() -> anyhow::Result<()> {
//! let header = HeaderTemplate::load(Path::new("HEADER.txt"))?;
//! let files = discover(Path::new("src"), &["java".to_string()], true);
//!
//! let mut processor = Processor::new(ProcessorConfig::add(header))?;
//! let outcome = processor.run(&files, &mut AssumeYes, &mut NoProgress)?;
//! println!("{} files modified.", outcome.summary.files_modified);
//! # Ok(())
//! # }
//! ```

mod file_collector;
mod file_io;
mod header_ops;

use std::path::{Path, PathBuf};
use std::time::Instant;

pub use file_collector::{FileCollector, discover};
pub use file_io::FileIO;
pub use header_ops::{prepend_header, strip_exact_header, strip_header};
use tracing::{debug, trace, warn};

use crate::confirm::Confirm;
use crate::error::HeaderError;
use crate::output::ProgressSink;
use crate::report::{FileAction, FileReport, ProcessingSummary};
use crate::templates::{BuiltinResolver, CommentStyle, HeaderTemplate, StyleResolver, extension_of};

/// Prepends `block` to the file at `path`.
///
/// Returns `Ok(false)` without writing if the file already starts with
/// `block`, and `Ok(true)` after rewriting it otherwise.
pub fn insert_header(path: &Path, block: &str) -> Result<bool, HeaderError> {
  let content = FileIO::read_full_content(path)?;

  match prepend_header(&content, block) {
    Some(updated) => {
      FileIO::write_file(path, &updated)?;
      Ok(true)
    }
    None => Ok(false),
  }
}

/// Strips a leading comment block framed by `style` from the file at `path`.
///
/// Returns `Ok(false)` without writing when the style has no opener, the
/// file does not start with it, or no closer follows.
pub fn remove_header(path: &Path, style: CommentStyle) -> Result<bool, HeaderError> {
  if style.is_empty() {
    return Ok(false);
  }

  let content = FileIO::read_full_content(path)?;

  match strip_header(&content, style) {
    Some(updated) => {
      FileIO::write_file(path, &updated)?;
      Ok(true)
    }
    None => Ok(false),
  }
}

/// Strips `block` from the file at `path` only if the file starts with it
/// byte for byte.
pub fn remove_exact_header(path: &Path, block: &str) -> Result<bool, HeaderError> {
  let content = FileIO::read_full_content(path)?;

  match strip_exact_header(&content, block) {
    Some(updated) => {
      FileIO::write_file(path, &updated)?;
      Ok(true)
    }
    None => Ok(false),
  }
}

/// What a run does to every file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  /// Prepend the header block
  Add,
  /// Strip a leading header block
  Remove,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub operation: Operation,

  /// Raw header text. Required for [`Operation::Add`] and strict removal.
  pub header: Option<HeaderTemplate>,

  /// Maps file paths to comment styles.
  pub resolver: Box<dyn StyleResolver>,

  /// Only remove blocks identical to the header that would be added today.
  pub strict: bool,
}

impl ProcessorConfig {
  /// Configuration for adding `header` with the builtin style table.
  pub fn add(header: HeaderTemplate) -> Self {
    Self {
      operation: Operation::Add,
      header: Some(header),
      resolver: Box::new(BuiltinResolver),
      strict: false,
    }
  }

  /// Configuration for permissive removal with the builtin style table.
  pub fn remove() -> Self {
    Self {
      operation: Operation::Remove,
      header: None,
      resolver: Box::new(BuiltinResolver),
      strict: false,
    }
  }
}

/// Result of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
  /// One report per file, in processing order
  pub reports: Vec<FileReport>,
  pub summary: ProcessingSummary,
}

/// Runs one header operation over a batch of files.
pub struct Processor {
  operation: Operation,

  /// Header text and the blocks rendered from it during this run
  header: Option<HeaderTemplate>,

  resolver: Box<dyn StyleResolver>,

  strict: bool,
}

impl Processor {
  /// Creates a new processor.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::Usage`] if adding, or removing strictly, without
  /// header text.
  pub fn new(config: ProcessorConfig) -> Result<Self, HeaderError> {
    if config.header.is_none() {
      if config.operation == Operation::Add {
        return Err(HeaderError::Usage("provide an input header".to_string()));
      }
      if config.strict {
        return Err(HeaderError::Usage(
          "strict removal needs the header it should match (--input-file)".to_string(),
        ));
      }
    }

    Ok(Self {
      operation: config.operation,
      header: config.header,
      resolver: config.resolver,
      strict: config.strict,
    })
  }

  pub const fn operation(&self) -> Operation {
    self.operation
  }

  /// The comment style used for `path`.
  pub fn style_for(&self, path: &Path) -> CommentStyle {
    self.resolver.resolve(path)
  }

  /// The header block this processor writes (or, strictly, removes) for
  /// `path`, rendered on first use per extension.
  ///
  /// Returns `None` if the processor holds no header text.
  pub fn block_for(&mut self, path: &Path) -> Option<&str> {
    let extension = extension_of(path);
    let style = self.resolver.resolve_extension(extension);
    let header = self.header.as_mut()?;
    Some(header.block_for(extension, style))
  }

  /// Applies the operation to a single file.
  ///
  /// Returns whether the file was modified.
  pub fn process_file(&mut self, path: &Path) -> Result<bool, HeaderError> {
    match self.operation {
      Operation::Add => {
        let Some(block) = self.block_for(path) else {
          return Err(HeaderError::Usage("provide an input header".to_string()));
        };
        insert_header(path, block)
      }
      Operation::Remove if self.strict => {
        let style = self.style_for(path);
        if style.is_empty() {
          return Ok(false);
        }
        let Some(block) = self.block_for(path) else {
          return Ok(false);
        };
        remove_exact_header(path, block)
      }
      Operation::Remove => {
        let style = self.style_for(path);
        remove_header(path, style)
      }
    }
  }

  /// Processes `files` in order.
  ///
  /// Asks `confirm` once before touching anything; a refusal returns
  /// [`HeaderError::Aborted`] with every file untouched. An empty batch is
  /// not confirmed. A file that cannot be read or written is recorded as
  /// [`FileAction::Failed`] and processing continues with the next file.
  pub fn run(
    &mut self,
    files: &[PathBuf],
    confirm: &mut dyn Confirm,
    progress: &mut dyn ProgressSink,
  ) -> Result<RunOutcome, HeaderError> {
    if files.is_empty() {
      debug!("No files to process");
      return Ok(RunOutcome::default());
    }

    if !confirm.confirm(files.len()).map_err(HeaderError::Prompt)? {
      debug!("Confirmation declined, leaving {} files untouched", files.len());
      return Err(HeaderError::Aborted);
    }

    let start = Instant::now();
    let total = files.len();
    let mut reports = Vec::with_capacity(total);

    for (index, path) in files.iter().enumerate() {
      let report = match self.process_file(path) {
        Ok(true) => {
          trace!("Modified: {}", path.display());
          let action = match self.operation {
            Operation::Add => FileAction::Added,
            Operation::Remove => FileAction::Removed,
          };
          FileReport::new(path, action)
        }
        Ok(false) => {
          trace!("Unchanged: {}", path.display());
          FileReport::new(path, FileAction::Unchanged)
        }
        Err(e) => {
          warn!("Skipping {}: {}", path.display(), e);
          FileReport::failed(path, e.to_string())
        }
      };

      progress.file_done(index, total, &report);
      reports.push(report);
    }

    let summary = ProcessingSummary::from_reports(&reports, start.elapsed());
    debug!(
      "Processed {} files in {}ms, {} modified",
      total,
      summary.processing_time.as_millis(),
      summary.files_modified
    );
    progress.finish(&summary);

    Ok(RunOutcome { reports, summary })
  }
}
