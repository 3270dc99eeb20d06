//! # Configuration Module
//!
//! This module provides optional configuration for headerman, allowing users
//! to map additional file extensions onto the builtin comment styles and to
//! change the default removal mode.
//!
//! Configuration can be specified in a `.headerman.toml` file in the scanned
//! directory or via the `HEADERMAN_CONFIG` environment variable.
//!
//! ```toml
//! strict = false
//!
//! [styles]
//! ts = "block"
//! pyi = "triple-quote"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::templates::CommentStyle;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerman.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERMAN_CONFIG";

/// Main configuration struct for headerman.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Only remove headers that match the currently rendered header exactly.
  #[serde(default)]
  pub strict: bool,

  /// Extra extension to comment style mappings. Keys are extensions without
  /// the leading dot and are matched case-sensitively. Unknown style names
  /// are rejected when the file is parsed.
  #[serde(default)]
  pub styles: HashMap<String, CommentStyle>,

  /// File this configuration was read from, if any.
  #[serde(skip)]
  pub source: Option<PathBuf>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML or an unknown style name.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A style mapping is invalid.
  #[error("Invalid style mapping for '{extension}': {message}")]
  InvalidExtension { extension: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;
    config.source = Some(path.to_path_buf());

    verbose_log!("Loaded {} style overrides", config.styles.len());

    Ok(config)
  }

  /// Checks that extension keys are bare extensions.
  fn validate(&self) -> Result<(), ConfigError> {
    for extension in self.styles.keys() {
      if extension.is_empty() {
        return Err(ConfigError::InvalidExtension {
          extension: extension.clone(),
          message: "extension cannot be empty".to_string(),
        });
      }

      if extension.starts_with('.') {
        return Err(ConfigError::InvalidExtension {
          extension: extension.clone(),
          message: "extension should not include leading dot".to_string(),
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERMAN_CONFIG` environment variable
/// 3. `.headerman.toml` in the scanned root directory
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `Ok(None)` when `no_config` is set or no file is found.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>, ConfigError> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => Config::load(&path).map(Some),
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_valid_config() {
    let config_content = concat!(
      "strict = true\n",
      "\n",
      "[styles]\n",
      "ts = \"block\"\n",
      "pyi = \"triple-quote\"\n",
      "bash = \"shell\"\n",
      "erb = \"document\"\n",
      "js = \"none\"\n",
    );

    let config: Config = toml::from_str(config_content).expect("valid config should parse");

    assert!(config.strict);
    assert_eq!(config.styles.len(), 5);
    assert_eq!(config.styles.get("ts"), Some(&CommentStyle::Block));
    assert_eq!(config.styles.get("pyi"), Some(&CommentStyle::TripleQuote));
    assert_eq!(config.styles.get("bash"), Some(&CommentStyle::Shell));
    assert_eq!(config.styles.get("erb"), Some(&CommentStyle::Document));
    assert_eq!(config.styles.get("js"), Some(&CommentStyle::Empty));
  }

  #[test]
  fn test_parse_empty_config() {
    let config: Config = toml::from_str("").expect("empty config should parse");

    assert!(!config.strict);
    assert!(config.styles.is_empty());
  }

  #[test]
  fn test_unknown_style_name_is_rejected() {
    let result: Result<Config, _> = toml::from_str("[styles]\nts = \"blok\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_unknown_top_level_key_is_rejected() {
    let result: Result<Config, _> = toml::from_str("stritc = true\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_leading_dot() {
    let mut styles = HashMap::new();
    styles.insert(".ts".to_string(), CommentStyle::Block);
    let config = Config {
      styles,
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidExtension { .. }));
  }

  #[test]
  fn test_load_config_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "[styles]\nkt = \"block\"\n").expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.styles.get("kt"), Some(&CommentStyle::Block));
    assert_eq!(config.source.as_deref(), Some(config_path.as_path()));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.headerman.toml"));
    assert!(matches!(result.expect_err("should fail"), ConfigError::ReadError { .. }));
  }

  #[test]
  fn test_load_config_parse_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "[styles\n").expect("write config");

    let result = Config::load(&config_path);
    assert!(matches!(result.expect_err("should fail"), ConfigError::ParseError { .. }));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_missing_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "").expect("write config");

    // An explicit path that does not exist does not fall back to the root file.
    let result = discover_config_path(Some(&temp_dir.path().join("nope.toml")), temp_dir.path());
    assert!(result.is_none());
  }

  #[test]
  fn test_discover_config_in_root() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_load_config_disabled() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "strict = true\n").expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("load should succeed");
    assert!(config.is_none());
  }
}
