//! Source-level rewrites applied before rendering.
use std::sync::LazyLock;

use regex::Regex;

use crate::{lists::parse_marker, utils::compile_regex};

const FENCE: &str = "```";

/// Put a blank line between a prose line and a top-level list that starts
/// directly under it, so the list is not folded into the paragraph.
/// Fenced blocks are left alone.
#[must_use]
pub fn separate_lists(markdown: &str) -> String {
  let mut out = String::with_capacity(markdown.len() + 64);
  let mut in_fence = false;
  let mut in_list = false;
  let mut prev_is_prose = false;

  for line in markdown.lines() {
    if line.trim_start().starts_with(FENCE) {
      in_fence = !in_fence;
      in_list = false;
      prev_is_prose = false;
      out.push_str(line);
      out.push('\n');
      continue;
    }

    if !in_fence {
      let marker = parse_marker(line);
      let is_top_marker = marker.as_ref().is_some_and(|item| item.depth == 0);
      if is_top_marker && prev_is_prose {
        out.push('\n');
      }
      if marker.is_some() {
        in_list = true;
      } else if line.trim().is_empty() {
        in_list = false;
      }
      // Lazy continuation lines of an item are not prose.
      prev_is_prose = !in_list
        && !line.trim().is_empty()
        && !line.starts_with(char::is_whitespace)
        && !line.starts_with('#')
        && !line.starts_with('<')
        && !line.starts_with('|');
    }

    out.push_str(line);
    out.push('\n');
  }

  if !markdown.ends_with('\n') {
    out.pop();
  }
  out
}

/// The first fenced block tagged `language`, fences included.
#[must_use]
pub fn first_fenced_block<'a>(markdown: &'a str, language: &str) -> Option<&'a str> {
  let pattern = format!(r"(?s){FENCE}{}\b.*?{FENCE}", regex::escape(language));
  compile_regex(&pattern).find(markdown).map(|m| m.as_str())
}

/// Body of the first fenced block tagged `language`, without the fences.
#[must_use]
pub fn first_fenced_body<'a>(markdown: &'a str, language: &str) -> Option<&'a str> {
  let block = first_fenced_block(markdown, language)?;
  let inner = block
    .strip_prefix(FENCE)?
    .strip_suffix(FENCE)?
    .strip_prefix(language)?;
  Some(inner.strip_prefix('\n').unwrap_or(inner))
}

/// Insert `block` after the first line containing `marker`.
///
/// Returns `None` when no line carries the marker.
#[must_use]
pub fn insert_after_marker(markdown: &str, marker: &str, block: &str) -> Option<String> {
  let start = markdown.find(marker)?;
  let line_end = markdown[start..]
    .find('\n')
    .map_or(markdown.len(), |i| start + i + 1);

  let mut out = String::with_capacity(markdown.len() + block.len() + 4);
  out.push_str(&markdown[..line_end]);
  if !out.ends_with('\n') {
    out.push('\n');
  }
  out.push('\n');
  out.push_str(block);
  out.push('\n');
  out.push_str(&markdown[line_end..]);
  Some(out)
}

static CRLF_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"\r\n?"));

/// Normalize line endings to `\n`.
#[must_use]
pub fn normalize_newlines(markdown: &str) -> String {
  CRLF_RE.replace_all(markdown, "\n").into_owned()
}
