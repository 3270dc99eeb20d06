//! # Templates Module
//!
//! This module turns raw header text into the exact block of bytes that is
//! prepended to a source file, using the multi-line comment syntax of the
//! file's language.
//!
//! The module includes:
//! - [`CommentStyle`] the closed set of comment syntaxes headerman knows
//! - [`StyleResolver`] for mapping a file path to its comment style
//! - [`render_header`] for materializing a header block
//! - [`HeaderTemplate`] the raw header text plus the per-extension cache of
//!   rendered blocks for one run
//!
//! ## Example
//!
//! ```rust
//! use headerman::templates::{CommentStyle, HeaderTemplate};
//!
//! let mut template = HeaderTemplate::new("Copyright 2024\nAll rights reserved");
//! let block = template.block_for("java", CommentStyle::for_extension("java"));
//!
//! assert_eq!(block, "/*\n * Copyright 2024\n * All rights reserved\n */");
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::Config;
use crate::verbose_log;

/// A multi-line comment syntax: an opener line, a prefix for every body line
/// and a closer line.
///
/// Each variant owns the set of file extensions it applies to. Extensions are
/// matched exactly as written, without case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentStyle {
  /// `/* … */` with ` * ` in front of every line (C family, Java, JS, PHP…)
  Block,
  /// `""" … """` without a line prefix (Python)
  TripleQuote,
  /// `: ' … '` no-op heredoc trick (shell scripts)
  Shell,
  /// `=begin … =end` embedded documentation (Ruby)
  Document,
  /// No comment syntax known. Headers are written as plain text and cannot
  /// be removed again.
  #[serde(rename = "none", alias = "empty")]
  Empty,
}

impl CommentStyle {
  /// Every style that wraps text, in lookup order.
  pub const WRAPPING: [CommentStyle; 4] = [
    CommentStyle::Block,
    CommentStyle::TripleQuote,
    CommentStyle::Shell,
    CommentStyle::Document,
  ];

  pub const fn opener(self) -> &'static str {
    match self {
      CommentStyle::Block => "/*",
      CommentStyle::TripleQuote => "\"\"\"",
      CommentStyle::Shell => ": '",
      CommentStyle::Document => "=begin",
      CommentStyle::Empty => "",
    }
  }

  pub const fn line_prefix(self) -> &'static str {
    match self {
      CommentStyle::Block => " * ",
      CommentStyle::TripleQuote | CommentStyle::Shell | CommentStyle::Document | CommentStyle::Empty => "",
    }
  }

  pub const fn closer(self) -> &'static str {
    match self {
      CommentStyle::Block => " */",
      CommentStyle::TripleQuote => "\"\"\"",
      CommentStyle::Shell => "'",
      CommentStyle::Document => "=end",
      CommentStyle::Empty => "",
    }
  }

  /// File extensions (without the leading dot) this style is used for.
  pub const fn extensions(self) -> &'static [&'static str] {
    match self {
      CommentStyle::Block => &["java", "c", "cc", "h", "hh", "hpp", "cpp", "php", "js", "m", "cs"],
      CommentStyle::TripleQuote => &["py"],
      CommentStyle::Shell => &["sh"],
      CommentStyle::Document => &["rb"],
      CommentStyle::Empty => &[],
    }
  }

  /// Looks up the builtin style owning `extension`.
  ///
  /// Unknown extensions resolve to [`CommentStyle::Empty`].
  pub fn for_extension(extension: &str) -> Self {
    Self::WRAPPING
      .into_iter()
      .find(|style| style.extensions().contains(&extension))
      .unwrap_or(CommentStyle::Empty)
  }

  /// Whether this style has no opener to anchor on.
  pub const fn is_empty(self) -> bool {
    matches!(self, CommentStyle::Empty)
  }
}

/// Returns the extension of `path`: the text after the final `.` of the file
/// name, or an empty string if there is none.
pub fn extension_of(path: &Path) -> &str {
  path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
}

/// Trait for resolving comment styles for file paths.
///
/// Resolution must be pure: the same extension always yields the same style
/// for the lifetime of a resolver.
pub trait StyleResolver: Send + Sync {
  /// Resolve the comment style for a bare extension.
  fn resolve_extension(&self, extension: &str) -> CommentStyle;

  /// Resolve the comment style for the given file path.
  fn resolve(&self, path: &Path) -> CommentStyle {
    self.resolve_extension(extension_of(path))
  }
}

/// Default resolver using the builtin extension table.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl StyleResolver for BuiltinResolver {
  fn resolve_extension(&self, extension: &str) -> CommentStyle {
    CommentStyle::for_extension(extension)
  }
}

/// Resolver that checks the `[styles]` table of the configuration first, then
/// falls back to the builtin table.
#[derive(Debug)]
pub struct ConfigurableResolver {
  overrides: HashMap<String, CommentStyle>,
}

impl ConfigurableResolver {
  pub const fn new(overrides: HashMap<String, CommentStyle>) -> Self {
    Self { overrides }
  }
}

impl StyleResolver for ConfigurableResolver {
  fn resolve_extension(&self, extension: &str) -> CommentStyle {
    if let Some(style) = self.overrides.get(extension) {
      verbose_log!("Using config style override for: .{}", extension);
      return *style;
    }

    CommentStyle::for_extension(extension)
  }
}

/// Create a style resolver for the given configuration.
///
/// A configuration with style overrides yields a [`ConfigurableResolver`];
/// anything else uses the [`BuiltinResolver`].
pub fn create_resolver(config: Option<&Config>) -> Box<dyn StyleResolver> {
  match config {
    Some(cfg) if !cfg.styles.is_empty() => Box::new(ConfigurableResolver::new(cfg.styles.clone())),
    _ => Box::new(BuiltinResolver),
  }
}

/// Materializes the header block for `raw` in the given comment style.
///
/// The block is the opener on its own line, every line of `raw` behind the
/// style's line prefix, trailing line breaks trimmed, and the closer on its
/// own line. There is no trailing newline after the closer.
///
/// With [`CommentStyle::Empty`] no opener or closer is emitted and the block
/// is the raw text itself, minus trailing line breaks.
pub fn render_header(raw: &str, style: CommentStyle) -> String {
  let mut block = String::with_capacity(raw.len() + 64);

  if !style.opener().is_empty() {
    block.push_str(style.opener());
    block.push('\n');
  }

  for (index, line) in raw.split('\n').enumerate() {
    if index > 0 {
      block.push('\n');
    }
    block.push_str(style.line_prefix());
    block.push_str(line);
  }

  let trimmed_len = block.trim_end_matches(['\r', '\n']).len();
  block.truncate(trimmed_len);

  if !style.closer().is_empty() {
    block.push('\n');
    block.push_str(style.closer());
  }

  block
}

/// Raw header text plus the blocks rendered from it during one run.
///
/// Rendered blocks are memoized per extension. The cache lives exactly as
/// long as the template, so nothing leaks from one run into the next.
#[derive(Debug, Clone, Default)]
pub struct HeaderTemplate {
  raw: String,
  rendered: HashMap<String, String>,
}

impl HeaderTemplate {
  pub fn new(raw: impl Into<String>) -> Self {
    Self {
      raw: raw.into(),
      rendered: HashMap::new(),
    }
  }

  /// Loads the raw header text from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8.
  pub fn load(path: &Path) -> Result<Self> {
    verbose_log!("Loading header from: {}", path.display());

    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read header file: {}", path.display()))?;

    Ok(Self::new(raw))
  }

  pub fn raw(&self) -> &str {
    &self.raw
  }

  /// Returns the block for `extension`, rendering it with `style` on first
  /// use and reusing the cached block afterwards.
  pub fn block_for(&mut self, extension: &str, style: CommentStyle) -> &str {
    let raw = &self.raw;
    self
      .rendered
      .entry(extension.to_string())
      .or_insert_with(|| render_header(raw, style))
  }

  /// Number of extensions rendered so far.
  pub fn cached_len(&self) -> usize {
    self.rendered.len()
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;

  #[test]
  fn test_builtin_table() {
    assert_eq!(CommentStyle::for_extension("java"), CommentStyle::Block);
    assert_eq!(CommentStyle::for_extension("cpp"), CommentStyle::Block);
    assert_eq!(CommentStyle::for_extension("js"), CommentStyle::Block);
    assert_eq!(CommentStyle::for_extension("py"), CommentStyle::TripleQuote);
    assert_eq!(CommentStyle::for_extension("sh"), CommentStyle::Shell);
    assert_eq!(CommentStyle::for_extension("rb"), CommentStyle::Document);
  }

  #[test]
  fn test_unknown_extension_is_empty() {
    let style = CommentStyle::for_extension("xyz");
    assert_eq!(style, CommentStyle::Empty);
    assert!(style.is_empty());
    assert_eq!(style.opener(), "");
    assert_eq!(style.line_prefix(), "");
    assert_eq!(style.closer(), "");
  }

  #[test]
  fn test_extension_lookup_is_case_sensitive() {
    assert_eq!(CommentStyle::for_extension("JAVA"), CommentStyle::Empty);
    assert_eq!(CommentStyle::for_extension("Py"), CommentStyle::Empty);
  }

  #[test]
  fn test_no_extension_shared_between_styles() {
    for (i, a) in CommentStyle::WRAPPING.iter().enumerate() {
      for b in CommentStyle::WRAPPING.iter().skip(i + 1) {
        for ext in a.extensions() {
          assert!(!b.extensions().contains(ext), "{ext} owned by {a:?} and {b:?}");
        }
      }
    }
  }

  #[test]
  fn test_extension_of() {
    assert_eq!(extension_of(Path::new("src/A.java")), "java");
    assert_eq!(extension_of(Path::new("archive.tar.gz")), "gz");
    assert_eq!(extension_of(Path::new("Makefile")), "");
    assert_eq!(extension_of(Path::new(".bashrc")), "");
  }

  #[test]
  fn test_builtin_resolver() {
    let resolver = BuiltinResolver;
    assert_eq!(resolver.resolve(Path::new("dir/main.c")), CommentStyle::Block);
    assert_eq!(resolver.resolve(Path::new("script.py")), CommentStyle::TripleQuote);
    assert_eq!(resolver.resolve(Path::new("notes.txt")), CommentStyle::Empty);
  }

  #[test]
  fn test_configurable_resolver_override_and_fallback() {
    let mut overrides = HashMap::new();
    overrides.insert("ts".to_string(), CommentStyle::Block);
    overrides.insert("js".to_string(), CommentStyle::Empty);

    let resolver = ConfigurableResolver::new(overrides);
    assert_eq!(resolver.resolve(Path::new("app.ts")), CommentStyle::Block);
    assert_eq!(resolver.resolve(Path::new("app.js")), CommentStyle::Empty);
    assert_eq!(resolver.resolve(Path::new("app.py")), CommentStyle::TripleQuote);
  }

  #[test]
  fn test_create_resolver_without_overrides_uses_builtin() {
    let resolver = create_resolver(None);
    assert_eq!(resolver.resolve_extension("rb"), CommentStyle::Document);

    let config = Config::default();
    let resolver = create_resolver(Some(&config));
    assert_eq!(resolver.resolve_extension("ts"), CommentStyle::Empty);
  }

  #[test]
  fn test_render_block_style() {
    let block = render_header("Copyright 2024\nAll rights reserved", CommentStyle::Block);
    assert_eq!(block, "/*\n * Copyright 2024\n * All rights reserved\n */");
  }

  #[test]
  fn test_render_triple_quote_style() {
    let block = render_header("Copyright 2024\n", CommentStyle::TripleQuote);
    assert_eq!(block, "\"\"\"\nCopyright 2024\n\"\"\"");
  }

  #[test]
  fn test_render_shell_and_document_styles() {
    assert_eq!(render_header("MIT", CommentStyle::Shell), ": '\nMIT\n'");
    assert_eq!(render_header("MIT", CommentStyle::Document), "=begin\nMIT\n=end");
  }

  #[test]
  fn test_render_empty_style_is_raw_text() {
    let block = render_header("Copyright 2024\nAll rights reserved\n\n", CommentStyle::Empty);
    assert_eq!(block, "Copyright 2024\nAll rights reserved");
  }

  #[test]
  fn test_render_trims_carriage_returns_before_closer() {
    let block = render_header("Line one\r\n", CommentStyle::Document);
    assert_eq!(block, "=begin\nLine one\n=end");
  }

  #[test]
  fn test_render_keeps_prefix_of_trailing_empty_line() {
    // Only line breaks are trimmed, so the prefix of a trailing empty line
    // survives in front of the closer.
    let block = render_header("A\n", CommentStyle::Block);
    assert_eq!(block, "/*\n * A\n * \n */");
  }

  #[test]
  fn test_header_template_memoizes_per_extension() {
    let mut template = HeaderTemplate::new("Header");

    let first = template.block_for("java", CommentStyle::Block).to_string();
    assert_eq!(template.cached_len(), 1);

    // A cached block is reused even if asked with another style.
    let second = template.block_for("java", CommentStyle::Empty).to_string();
    assert_eq!(first, second);
    assert_eq!(template.cached_len(), 1);

    let python = template.block_for("py", CommentStyle::TripleQuote).to_string();
    assert_eq!(python, "\"\"\"\nHeader\n\"\"\"");
    assert_eq!(template.cached_len(), 2);
  }

  #[test]
  fn test_header_template_load() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("HEADER.txt");
    fs::write(&path, "Copyright 2024").expect("write header");

    let template = HeaderTemplate::load(&path).expect("load header");
    assert_eq!(template.raw(), "Copyright 2024");

    assert!(HeaderTemplate::load(&temp_dir.path().join("missing.txt")).is_err());
  }
}
