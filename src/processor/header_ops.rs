//! # Header Operations Module
//!
//! Pure text transforms behind header insertion and removal. Nothing here
//! touches the filesystem; each function takes the current file content and
//! returns the new content, or `None` when the file should be left alone.

use crate::templates::CommentStyle;

/// Trailing line break characters trimmed from a block before it is joined
/// to the file content.
const LINE_BREAKS: [char; 2] = ['\r', '\n'];

/// Prepends `block` to `content`.
///
/// Returns `None` if `content` already starts with `block` byte for byte, so
/// applying the same header twice is a no-op.
pub fn prepend_header(content: &str, block: &str) -> Option<String> {
  if content.starts_with(block) {
    return None;
  }

  let block = block.trim_end_matches(LINE_BREAKS);
  let mut updated = String::with_capacity(block.len() + 1 + content.len());
  updated.push_str(block);
  updated.push('\n');
  updated.push_str(content);
  Some(updated)
}

/// Strips a leading comment block framed by the opener and closer of `style`.
///
/// This is a textual heuristic: any block at the very start of the file that
/// begins with the opener and runs to the first closer after it is removed,
/// whether or not it is a header headerman wrote. Leading whitespace after the
/// closer is dropped as well.
///
/// Returns `None` if the style has no opener, the content does not start
/// with it, or no closer follows.
pub fn strip_header(content: &str, style: CommentStyle) -> Option<String> {
  let opener = style.opener();
  let closer = style.closer();

  if opener.is_empty() || !content.starts_with(opener) {
    return None;
  }

  // Always search after the opener, even when the delimiters differ: the
  // shell closer `'` sits inside `: '`, and matching it there would break the
  // insert-then-remove round trip.
  let search_from = opener.len();
  let end = content[search_from..].find(closer)? + search_from;

  Some(content[end + closer.len()..].trim_start().to_string())
}

/// Strips `block` from the start of `content` only if it matches exactly.
///
/// Used by strict removal, which refuses to touch comment blocks that differ
/// from the header that would be written today.
pub fn strip_exact_header(content: &str, block: &str) -> Option<String> {
  if block.is_empty() {
    return None;
  }

  content
    .strip_prefix(block)
    .map(|remainder| remainder.trim_start().to_string())
}
