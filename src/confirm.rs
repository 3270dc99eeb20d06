//! # Confirm Module
//!
//! The confirmation gate run before any file is touched. It is a trait so the
//! processor can be driven without a terminal.

use std::io::{self, BufRead, Write};

/// Asks whether a batch of `file_count` files may be modified.
pub trait Confirm {
  /// Returns `true` to proceed, `false` to abort the whole batch.
  fn confirm(&mut self, file_count: usize) -> io::Result<bool>;
}

/// Always proceeds. Used for `--yes` and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
  fn confirm(&mut self, _file_count: usize) -> io::Result<bool> {
    Ok(true)
  }
}

/// Prompts on a writer and reads answers line by line.
///
/// Only `y` proceeds and only `n` aborts; any other answer repeats the
/// prompt. End of input counts as `n`.
pub struct PromptConfirm<R, W> {
  input: R,
  output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
  pub const fn new(input: R, output: W) -> Self {
    Self { input, output }
  }
}

impl PromptConfirm<io::StdinLock<'static>, io::Stdout> {
  /// Prompt on the process terminal.
  pub fn terminal() -> Self {
    Self::new(io::stdin().lock(), io::stdout())
  }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
  fn confirm(&mut self, file_count: usize) -> io::Result<bool> {
    loop {
      write!(
        self.output,
        "This operation could potentially modify {file_count} files. Continue? [y/n]: "
      )?;
      self.output.flush()?;

      let mut answer = String::new();
      if self.input.read_line(&mut answer)? == 0 {
        writeln!(self.output)?;
        return Ok(false);
      }

      match answer.trim_end_matches(['\r', '\n']) {
        "y" => return Ok(true),
        "n" => return Ok(false),
        _ => continue,
      }
    }
  }
}
