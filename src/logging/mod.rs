//! # Logging Module
//!
//! Two layers of output live here. User-facing chatter goes through
//! [`verbose_log!`] (stderr, only with `-v`) and [`info_log!`] (stdout, muted
//! by `-q`), both gated by a process-wide output mode. Diagnostics go through
//! `tracing`, set up once by [`init_tracing`].
//!
//! stdout is shared with the confirmation prompt, the progress line and the
//! final `N files modified.` line, so verbose chatter never goes there.
//!
//! ```rust
//! use headerman::logging::{ColorMode, set_verbose};
//! use headerman::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Resolved style for {}", "Example.java");
//! info_log!("No matching files found in {}", "src");
//! ```

mod modes;

use std::fmt;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_normal, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Prints to stderr when verbose mode is on.
#[macro_export]
macro_rules! verbose_log {
  ($($arg:tt)*) => {
    if $crate::logging::is_verbose() {
      $crate::logging::print_verbose_log(format_args!($($arg)*));
    }
  };
}

/// Prints to stdout unless quiet mode is on.
#[macro_export]
macro_rules! info_log {
  ($($arg:tt)*) => {
    if !$crate::logging::is_quiet() {
      $crate::logging::print_info_log(format_args!($($arg)*));
    }
  };
}

#[doc(hidden)]
pub fn print_verbose_log(message: fmt::Arguments<'_>) {
  eprintln!("{}", message.if_supports_color(Stream::Stderr, |m| m.dimmed()));
}

#[doc(hidden)]
pub fn print_info_log(message: fmt::Arguments<'_>) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
