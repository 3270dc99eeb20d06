//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod apply;

use std::ffi::OsString;
use std::process::ExitCode;

pub use apply::{ApplyArgs, run_apply};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{CommandFactory, Parser};
use headerman::error::HeaderError;
use headerman::output::print_aborted;
use tracing::debug;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add the header in HEADER.txt to every Java and Python file under src/
  headerman -i HEADER.txt -o src -r -e java -e py

  # Remove previously added headers from the top-level C files
  headerman --remove -o src -e c

  # Only remove headers identical to the current one, without prompting
  headerman --remove --strict -i HEADER.txt -o src -r --yes
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub apply_args: ApplyArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse_from(normalize_args(std::env::args_os()))
  }
}

/// Rewrites the legacy single-dash `-rm` spelling to `--remove`.
///
/// Clap would otherwise read `-rm` as the short flags `-r` and `-m`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
  I: IntoIterator<Item = OsString>,
{
  args
    .into_iter()
    .map(|arg| if arg == "-rm" { OsString::from("--remove") } else { arg })
    .collect()
}

/// Parses the command line, runs it and maps the outcome to an exit code.
pub fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run_apply(cli.apply_args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => match e.downcast_ref::<HeaderError>() {
      Some(HeaderError::Aborted) => {
        print_aborted();
        ExitCode::SUCCESS
      }
      Some(HeaderError::Usage(message)) => {
        eprintln!("ERROR: {message}");
        if let Err(e) = Cli::command().print_help() {
          debug!("Failed to print help: {}", e);
        }
        ExitCode::from(2)
      }
      Some(other) => {
        eprintln!("ERROR: {e:#}");
        exit_code(other.exit_code())
      }
      None => {
        eprintln!("ERROR: {e:#}");
        ExitCode::FAILURE
      }
    },
  }
}

fn exit_code(code: i32) -> ExitCode {
  ExitCode::from(u8::try_from(code).unwrap_or(1))
}
