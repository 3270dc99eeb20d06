//! # Report Module
//!
//! This module records what happened to every file of a run and can write
//! that record as a JSON report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// Error message if the file could not be processed
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub fn new(path: &Path, action: FileAction) -> Self {
    Self {
      path: path.to_path_buf(),
      action,
      error: None,
    }
  }

  pub fn failed(path: &Path, error: impl Into<String>) -> Self {
    Self {
      path: path.to_path_buf(),
      action: FileAction::Failed,
      error: Some(error.into()),
    }
  }

  pub const fn is_modified(&self) -> bool {
    matches!(self.action, FileAction::Added | FileAction::Removed)
  }
}

/// Possible outcomes for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// A header block was prepended
  Added,
  /// A header block was stripped
  Removed,
  /// The file was left as it was
  #[serde(rename = "none")]
  Unchanged,
  /// The file could not be read or written and was skipped
  Failed,
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Aggregate counts for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
  pub total_files: usize,
  pub files_modified: usize,
  pub files_unchanged: usize,
  pub files_failed: usize,
  pub processing_time: Duration,
}

impl ProcessingSummary {
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      processing_time,
      ..Self::default()
    };

    for report in reports {
      match report.action {
        FileAction::Added | FileAction::Removed => summary.files_modified += 1,
        FileAction::Unchanged => summary.files_unchanged += 1,
        FileAction::Failed => summary.files_failed += 1,
      }
    }

    summary
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  summary: JsonSummary,
  files: &'a [FileReport],
}

#[derive(Serialize)]
struct JsonSummary {
  total_files: usize,
  files_modified: usize,
  files_unchanged: usize,
  files_failed: usize,
  processing_time_secs: f64,
}

/// Writes JSON reports of a run.
pub struct ReportGenerator<'a> {
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Renders the report and writes it to the output path.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
    let content = Self::render_json(files, summary)?;

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }

  fn render_json(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    let report = JsonReport {
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      summary: JsonSummary {
        total_files: summary.total_files,
        files_modified: summary.files_modified,
        files_unchanged: summary.files_unchanged,
        files_failed: summary.files_failed,
        processing_time_secs: summary.processing_time.as_secs_f64(),
      },
      files,
    };

    serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_reports() -> Vec<FileReport> {
    vec![
      FileReport::new(Path::new("a.java"), FileAction::Added),
      FileReport::new(Path::new("b.py"), FileAction::Unchanged),
      FileReport::new(Path::new("c.rb"), FileAction::Removed),
      FileReport::failed(Path::new("d.c"), "permission denied"),
    ]
  }

  #[test]
  fn test_summary_counts() {
    let summary = ProcessingSummary::from_reports(&sample_reports(), Duration::from_millis(5));

    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.files_modified, 2);
    assert_eq!(summary.files_unchanged, 1);
    assert_eq!(summary.files_failed, 1);
  }

  #[test]
  fn test_is_modified() {
    let reports = sample_reports();
    let modified: Vec<bool> = reports.iter().map(FileReport::is_modified).collect();
    assert_eq!(modified, vec![true, false, true, false]);
  }

  #[test]
  fn test_json_report_shape() {
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::ZERO);
    let json = ReportGenerator::render_json(&reports, &summary).expect("render report");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["summary"]["files_modified"], 2);
    assert_eq!(value["files"][0]["path"], "a.java");
    assert_eq!(value["files"][0]["action"], "added");
    assert_eq!(value["files"][1]["action"], "none");
    assert_eq!(value["files"][3]["error"], "permission denied");
    assert!(value["files"][0].get("error").is_none());
  }

  #[test]
  fn test_generate_writes_file() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let output = temp_dir.path().join("report.json");
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::ZERO);

    ReportGenerator::new(&output)
      .generate(&reports, &summary)
      .expect("generate report");

    let parsed: serde_json::Value =
      serde_json::from_str(&fs::read_to_string(&output).expect("read report")).expect("valid json");
    assert_eq!(parsed["files"].as_array().map(Vec::len), Some(4));
  }
}
