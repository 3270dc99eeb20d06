//! # File Collector Module
//!
//! This module finds the candidate files under a root directory.
//!
//! The two modes filter differently on purpose:
//! - non-recursive mode matches the immediate children of the root against the
//!   shell glob `*.<ext>`, so hidden files are skipped like a shell would;
//! - recursive mode walks the whole tree and keeps every regular file whose
//!   path ends with `.<ext>`, hidden ones included.
//!
//! Symlinks to regular files count as files in both modes.
//!
//! Discovery never fails. Unreadable directories or entries are logged and
//! skipped, and a missing root simply yields no files.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Glob options matching shell behavior: `*` does not match a leading dot.
const SHELL_MATCH: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: true,
};

/// File collector for one discovery request.
#[derive(Debug, Clone)]
pub struct FileCollector {
  root: PathBuf,
  extensions: Vec<String>,
  recursive: bool,
  /// Canonical paths that are never returned
  excluded: Vec<PathBuf>,
}

impl FileCollector {
  /// Creates a collector.
  ///
  /// `extensions` are given without the leading dot. Duplicates are dropped
  /// so a file is never listed twice. An empty list means every extension.
  pub fn new(root: impl Into<PathBuf>, extensions: &[String], recursive: bool) -> Self {
    let mut unique: Vec<String> = Vec::with_capacity(extensions.len());
    for extension in extensions {
      if !unique.contains(extension) {
        unique.push(extension.clone());
      }
    }

    Self {
      root: root.into(),
      extensions: unique,
      recursive,
      excluded: Vec::new(),
    }
  }

  /// Leaves `paths` out of the result even if they match, e.g. the config
  /// file headerman itself reads from the scanned directory.
  ///
  /// Paths are compared after canonicalization, so `./src/x` and `src/x` are
  /// the same file.
  pub fn excluding<I>(mut self, paths: I) -> Self
  where
    I: IntoIterator<Item = PathBuf>,
  {
    self.excluded.extend(paths.into_iter().map(|path| canonical(&path)));
    self
  }

  /// Collects the candidate files.
  ///
  /// Callers must not rely on the order of the result.
  pub fn collect(&self) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", self.root.display());
    let start_time = std::time::Instant::now();

    let mut files = if self.recursive {
      self.walk_tree()
    } else {
      self.list_children()
    };

    if !self.excluded.is_empty() {
      files.retain(|path| {
        let keep = !self.excluded.contains(&canonical(path));
        if !keep {
          debug!("Excluding {}", path.display());
        }
        keep
      });
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    files
  }

  /// Immediate children of the root matching `*.<ext>` for each extension,
  /// or `*` when no extension was requested.
  fn list_children(&self) -> Vec<PathBuf> {
    let patterns: Vec<String> = if self.extensions.is_empty() {
      vec!["*".to_string()]
    } else {
      self.extensions.iter().map(|ext| format!("*.{ext}")).collect()
    };

    let children = match std::fs::read_dir(&self.root) {
      Ok(entries) => entries
        .filter_map(|entry| match entry {
          Ok(entry) => Some(entry),
          Err(e) => {
            debug!("Skipping unreadable entry in {}: {}", self.root.display(), e);
            None
          }
        })
        .map(|entry| entry.path())
        // `Path::is_file` follows symlinks, `DirEntry::file_type` does not
        .filter(|path| path.is_file())
        .collect::<Vec<_>>(),
      Err(e) => {
        debug!("Cannot read directory {}: {}", self.root.display(), e);
        return Vec::new();
      }
    };

    let mut files = Vec::with_capacity(children.len());
    for raw_pattern in &patterns {
      let pattern = match Pattern::new(raw_pattern) {
        Ok(pattern) => pattern,
        Err(e) => {
          warn!("Invalid extension pattern '{}': {}", raw_pattern, e);
          continue;
        }
      };

      let mut matched: Vec<PathBuf> = children
        .iter()
        .filter(|path| {
          path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches_with(name, SHELL_MATCH))
        })
        .cloned()
        .collect();
      // Mirror glob's alphabetical listing within one pattern.
      matched.sort();
      files.extend(matched);
    }

    files
  }

  /// Every regular file below the root, filtered by path suffix.
  fn walk_tree(&self) -> Vec<PathBuf> {
    let suffixes: Vec<String> = self.extensions.iter().map(|ext| format!(".{ext}")).collect();

    WalkDir::new(&self.root)
      .into_iter()
      .filter_map(|entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
          debug!("Skipping unreadable entry: {}", e);
          None
        }
      })
      .filter(|entry| entry.path().is_file())
      .map(walkdir::DirEntry::into_path)
      .filter(|path| suffixes.is_empty() || has_any_suffix(path, &suffixes))
      .collect()
  }
}

fn canonical(path: &Path) -> PathBuf {
  path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn has_any_suffix(path: &Path, suffixes: &[String]) -> bool {
  let path = path.to_string_lossy();
  suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
}

/// Produces the candidate files under `root`.
///
/// See the module documentation for how `extensions` and `recursive`
/// interact.
pub fn discover(root: &Path, extensions: &[String], recursive: bool) -> Vec<PathBuf> {
  FileCollector::new(root, extensions, recursive).collect()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
  }

  fn names(files: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = files
      .iter()
      .map(|p| p.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string())
      .collect();
    names.sort();
    names
  }

  fn fixture() -> TempDir {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "a").expect("write");
    fs::write(root.join("b.txt"), "b").expect("write");
    fs::write(root.join("c.java"), "c").expect("write");
    fs::write(root.join(".hidden.txt"), "h").expect("write");
    fs::create_dir(root.join("nested")).expect("mkdir");
    fs::write(root.join("nested").join("d.txt"), "d").expect("write");
    fs::write(root.join("nested").join("e.py"), "e").expect("write");
    temp_dir
  }

  #[test]
  fn test_non_recursive_with_extension() {
    let temp_dir = fixture();
    let files = discover(temp_dir.path(), &exts(&["txt"]), false);

    assert_eq!(names(&files), vec!["a.txt", "b.txt"]);
  }

  #[test]
  fn test_non_recursive_without_extension_lists_files_only() {
    let temp_dir = fixture();
    let files = discover(temp_dir.path(), &[], false);

    assert_eq!(names(&files), vec!["a.txt", "b.txt", "c.java"]);
  }

  #[test]
  fn test_non_recursive_multiple_extensions() {
    let temp_dir = fixture();
    let files = discover(temp_dir.path(), &exts(&["java", "txt", "txt"]), false);

    assert_eq!(files.len(), 3);
    assert_eq!(names(&files), vec!["a.txt", "b.txt", "c.java"]);
  }

  #[test]
  fn test_recursive_without_extension() {
    let temp_dir = fixture();
    let files = discover(temp_dir.path(), &[], true);

    assert_eq!(
      names(&files),
      vec![".hidden.txt", "a.txt", "b.txt", "c.java", "d.txt", "e.py"]
    );
  }

  #[test]
  fn test_recursive_suffix_match() {
    let temp_dir = fixture();
    let files = discover(temp_dir.path(), &exts(&["txt"]), true);

    // Suffix matching keeps the hidden file the glob would skip.
    assert_eq!(names(&files), vec![".hidden.txt", "a.txt", "b.txt", "d.txt"]);
  }

  #[test]
  fn test_missing_root_yields_nothing() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing");

    assert!(discover(&missing, &[], false).is_empty());
    assert!(discover(&missing, &exts(&["txt"]), true).is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn test_symlinked_files_are_discovered() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path().join("root");
    let real = temp_dir.path().join("real");
    fs::create_dir(&root).expect("mkdir");
    fs::create_dir(&real).expect("mkdir");
    fs::write(real.join("Target.java"), "class Target {}").expect("write");
    std::os::unix::fs::symlink(real.join("Target.java"), root.join("Link.java")).expect("symlink");
    // Dangling links are not files
    std::os::unix::fs::symlink(real.join("Gone.java"), root.join("Dangling.java")).expect("symlink");

    assert_eq!(names(&discover(&root, &exts(&["java"]), false)), vec!["Link.java"]);
    assert_eq!(names(&discover(&root, &exts(&["java"]), true)), vec!["Link.java"]);
  }

  #[test]
  fn test_excluded_paths_are_skipped() {
    let temp_dir = fixture();
    let root = temp_dir.path();

    let files = FileCollector::new(root, &[], false)
      .excluding([root.join("b.txt"), root.join("nested").join("..").join("c.java")])
      .collect();
    assert_eq!(names(&files), vec!["a.txt"]);

    // Excluding a path that does not exist changes nothing
    let files = FileCollector::new(root, &exts(&["txt"]), true)
      .excluding([root.join("report.json")])
      .collect();
    assert_eq!(files.len(), 4);
  }

  #[test]
  fn test_has_any_suffix() {
    let suffixes = exts(&[".js"]);
    assert!(has_any_suffix(Path::new("web/app.js"), &suffixes));
    assert!(has_any_suffix(Path::new("web/app.min.js"), &suffixes));
    assert!(!has_any_suffix(Path::new("web/app.json"), &suffixes));
  }
}
