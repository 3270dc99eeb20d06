//! # headerman
//!
//! Adds or removes license header blocks across source files.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
  cli::main()
}
