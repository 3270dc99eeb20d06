//! # headerman
//!
//! A tool that adds or removes a license header block at the top of every
//! source file in a directory, wrapping it in the multi-line comment syntax of
//! each file's language.
//!
//! Adding is idempotent: a file that already starts with the exact header
//! block is left alone. Removing strips a leading comment block framed by the
//! file's comment delimiters.
//!
//! ## Supported comment styles
//!
//! | Style | Delimiters | Extensions |
//! |-------|------------|------------|
//! | block | `/*`, ` * `, ` */` | java c cc h hh hpp cpp php js m cs |
//! | triple-quote | `"""` … `"""` | py |
//! | shell | `: '` … `'` | sh |
//! | document | `=begin` … `=end` | rb |
//!
//! Any other extension gets the raw header text with no comment wrapping.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerman::processor::{insert_header, remove_header};
//! use headerman::templates::{CommentStyle, HeaderTemplate};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut header = HeaderTemplate::new("Copyright 2024\nAll rights reserved");
//!     let block = header.block_for("java", CommentStyle::Block);
//!
//!     let path = Path::new("src/A.java");
//!     let added = insert_header(path, block)?;
//!     let removed = remove_header(path, CommentStyle::Block)?;
//!     assert_eq!(added, removed);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Discovery and the add/remove operations
//! * [`templates`] - Comment styles and header rendering
//! * [`confirm`] - The confirmation gate
//! * [`output`] - Progress and summary output
//! * [`logging`] - Logging utilities for verbose output

pub mod config;
pub mod confirm;
pub mod error;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
