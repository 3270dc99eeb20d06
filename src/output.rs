//! # Output Module
//!
//! This module centralizes all user-facing output for the headerman tool:
//! the start message, the single overwriting progress line and the final
//! summary.
//!
//! Progress goes through the [`ProgressSink`] trait so the processor can be
//! driven silently from tests or library code.

use std::io::{self, Write};
use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use tracing::debug;

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Header added or removed
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// File could not be processed
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Nothing to do
  pub const UNCHANGED: &str = "-";
}

/// Receives a callback after every processed file.
pub trait ProgressSink {
  /// Called once `report` is known for the file at position `index`
  /// (zero-based) out of `total`.
  fn file_done(&mut self, index: usize, total: usize, report: &FileReport);

  /// Called once after the last file.
  fn finish(&mut self, _summary: &ProcessingSummary) {}
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
  fn file_done(&mut self, _index: usize, _total: usize, _report: &FileReport) {}
}

/// Draws the progress line on stdout and prints the summary when done.
///
/// The progress line is rewritten in place with a carriage return. In quiet
/// mode nothing is printed.
#[derive(Debug, Default)]
pub struct TerminalProgress;

impl ProgressSink for TerminalProgress {
  fn file_done(&mut self, index: usize, total: usize, report: &FileReport) {
    if is_quiet() {
      return;
    }

    if is_verbose() {
      print_file_status(report);
    }

    if let Err(e) = write_progress(&mut io::stdout().lock(), index, total, &report.path) {
      debug!("Failed to draw progress line: {}", e);
    }
  }

  fn finish(&mut self, summary: &ProcessingSummary) {
    if is_quiet() {
      return;
    }

    println!();
    print_summary(summary);
  }
}

/// Integer percentage of files done after the file at `index`.
pub const fn percent_complete(index: usize, total: usize) -> usize {
  if total == 0 {
    return 100;
  }
  (index + 1) * 100 / total
}

/// The progress line for one file, padded and ending in a carriage return so
/// the next line overwrites it.
pub fn progress_line(index: usize, total: usize, path: &Path) -> String {
  format!(
    "{}% [{}]        \r",
    percent_complete(index, total),
    path.display()
  )
}

/// Writes the progress line for one file and flushes it, since it has no
/// newline to trigger a line-buffered flush.
pub fn write_progress<W: Write>(out: &mut W, index: usize, total: usize, path: &Path) -> io::Result<()> {
  write!(out, "{}", progress_line(index, total, path))?;
  out.flush()
}

/// Print the number of candidate files before processing starts.
pub fn print_start_message(file_count: usize, removing: bool) {
  if is_quiet() {
    return;
  }

  let verb = if removing { "Removing headers from" } else { "Adding headers to" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} candidate {}...", verb, file_count, files_word);
}

/// Print the final modified count, plus a warning line when files failed.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let mut line = format!(
    "{} files modified.",
    summary.files_modified.if_supports_color(Stream::Stdout, |s| s.green())
  );

  if is_verbose() {
    line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", line);

  if summary.files_failed > 0 {
    eprintln!(
      "{} {} {} could not be processed (run with -v for details).",
      symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
      summary.files_failed,
      if summary.files_failed == 1 { "file" } else { "files" }
    );
  }
}

/// Print the message shown when the user declines the prompt.
pub fn print_aborted() {
  if !is_quiet() {
    println!("Aborted. No files were modified.");
  }
}

/// Print one status line per file on stderr (verbose mode).
fn print_file_status(report: &FileReport) {
  let (symbol, message) = match report.action {
    FileAction::Added => (
      symbols::SUCCESS.if_supports_color(Stream::Stderr, |s| s.green()).to_string(),
      "header added",
    ),
    FileAction::Removed => (
      symbols::SUCCESS.if_supports_color(Stream::Stderr, |s| s.green()).to_string(),
      "header removed",
    ),
    FileAction::Unchanged => (
      symbols::UNCHANGED.if_supports_color(Stream::Stderr, |s| s.dimmed()).to_string(),
      "unchanged",
    ),
    FileAction::Failed => (
      symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()).to_string(),
      "failed",
    ),
  };

  match &report.error {
    Some(error) => eprintln!("{} {} ({}: {})", symbol, report.path.display(), message, error),
    None => eprintln!("{} {} ({})", symbol, report.path.display(), message),
  }
}
