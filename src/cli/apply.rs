//! # Apply Command
//!
//! This module implements the add/remove run: argument validation,
//! configuration, discovery, the confirmation gate, processing and the final
//! summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use headerman::config::load_config;
use headerman::confirm::{AssumeYes, Confirm, PromptConfirm};
use headerman::error::HeaderError;
use headerman::info_log;
use headerman::logging::{ColorMode, init_tracing, set_normal, set_quiet, set_verbose};
use headerman::output::{TerminalProgress, print_start_message, print_summary};
use headerman::processor::{FileCollector, Operation, Processor, ProcessorConfig};
use headerman::report::{ProcessingSummary, ReportGenerator};
use headerman::templates::{HeaderTemplate, create_resolver};
use tracing::debug;

/// Arguments for adding or removing headers
#[derive(Args, Debug, Default)]
pub struct ApplyArgs {
  /// Remove headers instead of adding them (also accepted as -rm)
  #[arg(long)]
  pub remove: bool,

  /// File to read the header text from (required when adding)
  #[arg(long, short = 'i', value_name = "FILE")]
  pub input_file: Option<PathBuf>,

  /// Directory to search for files in
  #[arg(long, short = 'o', value_name = "DIR")]
  pub output_dir: Option<PathBuf>,

  /// Search the directory recursively
  #[arg(long, short = 'r')]
  pub recursive: bool,

  /// Only process files with this extension, without the dot (repeatable)
  #[arg(long, short = 'e', value_name = "EXT")]
  pub extensions: Vec<String>,

  /// Only remove headers identical to the one rendered from --input-file
  #[arg(long)]
  pub strict: bool,

  /// Do not ask for confirmation before modifying files
  #[arg(long, short = 'y')]
  pub yes: bool,

  /// Path to config file (default: .headerman.toml in the output directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Write a JSON report of every processed file to this path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v per-file status, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl ApplyArgs {
  /// Validate the arguments and return the directory to scan.
  fn validate(&self) -> Result<PathBuf, HeaderError> {
    let Some(output_dir) = self.output_dir.clone() else {
      return Err(HeaderError::Usage("provide a directory".to_string()));
    };

    if !self.remove && self.input_file.is_none() {
      return Err(HeaderError::Usage("provide an input header".to_string()));
    }

    if self.remove && self.strict && self.input_file.is_none() {
      return Err(HeaderError::Usage(
        "provide an input header to compare against in --strict mode".to_string(),
      ));
    }

    Ok(output_dir)
  }

  const fn operation(&self) -> Operation {
    if self.remove { Operation::Remove } else { Operation::Add }
  }
}

/// Run the add/remove command with the given arguments
pub fn run_apply(args: ApplyArgs) -> Result<()> {
  let output_dir = args.validate()?;

  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  } else {
    set_normal();
  }
  args.colors.apply();

  let config = load_config(args.config.as_deref(), &output_dir, args.no_config).map_err(HeaderError::from)?;
  let strict = args.strict || config.as_ref().is_some_and(|c| c.strict);
  if strict && args.remove {
    debug!("Strict removal enabled");
  }

  let resolver = create_resolver(config.as_ref());

  let operation = args.operation();
  // The header is only read when something will use it.
  let header = match (&args.input_file, operation) {
    (Some(path), Operation::Add) => Some(load_header(path)?),
    (Some(path), Operation::Remove) if strict => Some(load_header(path)?),
    _ => None,
  };

  let mut processor = Processor::new(ProcessorConfig {
    operation,
    header,
    resolver,
    strict,
  })?;

  // Never stamp a header onto our own config file or a previous report.
  let own_files = config
    .as_ref()
    .and_then(|c| c.source.clone())
    .into_iter()
    .chain(args.report_json.clone());
  let files = FileCollector::new(&output_dir, &args.extensions, args.recursive)
    .excluding(own_files)
    .collect();
  print_start_message(files.len(), args.remove);

  if files.is_empty() {
    info_log!("No matching files found in {}", output_dir.display());
    print_summary(&ProcessingSummary::default());
    return Ok(());
  }

  let mut confirm: Box<dyn Confirm> = if args.yes {
    Box::new(AssumeYes)
  } else {
    Box::new(PromptConfirm::terminal())
  };

  let outcome = processor.run(&files, confirm.as_mut(), &mut TerminalProgress)?;

  if let Some(ref output_path) = args.report_json {
    let report_generator = ReportGenerator::new(output_path);
    if let Err(e) = report_generator.generate(&outcome.reports, &outcome.summary) {
      eprintln!("Error generating JSON report: {e:#}");
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  Ok(())
}

fn load_header(path: &std::path::Path) -> Result<HeaderTemplate> {
  HeaderTemplate::load(path).with_context(|| format!("Failed to load header from {}", path.display()))
}
