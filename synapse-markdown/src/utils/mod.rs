use std::{path::Path, sync::LazyLock};

use regex::{Captures, Regex};

/// Error type for utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
  #[error("Regex compilation failed: {0}")]
  RegexError(#[from] regex::Error),
}

/// Result type for utility operations.
pub type UtilResult<T> = Result<T, UtilError>;

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}

/// Compile a regex, logging and falling back to [`never_matching_regex`]
/// when the pattern is invalid. Used for the `LazyLock` statics of the
/// transforms so that a bad pattern degrades to "no rewrite" instead of
/// panicking.
#[must_use]
pub fn compile_regex(pattern: &str) -> Regex {
  try_compile_regex(pattern).unwrap_or_else(|e| {
    log::error!(
      "Failed to compile regex {pattern:?}: {e}\n Falling back to never \
       matching regex."
    );
    never_matching_regex()
  })
}

/// Compile a regex, surfacing the compile error.
///
/// # Errors
///
/// Returns [`UtilError::RegexError`] if the pattern is invalid.
pub fn try_compile_regex(pattern: &str) -> UtilResult<Regex> {
  Ok(Regex::new(pattern)?)
}

/// Generate the anchor id of a heading.
///
/// Tags are stripped first (entities stay as written, so `&amp;` adds
/// `amp`), then the text is lowercased, everything that is not a word character, whitespace or `-`
/// is dropped, runs of whitespace and underscores become a single `-`, and
/// leading/trailing dashes are trimmed. Other pages link to these ids by
/// predicting them from the heading text, so the function must stay
/// deterministic.
#[must_use]
pub fn slugify(text: &str) -> String {
  static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"[^\w\s-]"));
  static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"[\s_]+"));

  let plain = strip_tags(text).to_lowercase();
  let kept = STRIP_RE.replace_all(&plain, "");
  SEPARATOR_RE
    .replace_all(&kept, "-")
    .trim_matches('-')
    .to_string()
}

/// Remove every `<...>` tag from an HTML fragment, keeping the text.
#[must_use]
pub fn strip_tags(html: &str) -> String {
  static TAG_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"<[^>]+>"));
  TAG_RE.replace_all(html, "").into_owned()
}

/// Calculate the relative path prefix needed to reach the output root from
/// a file path relative to that root.
///
/// `"index.html"` returns `""`, `"PDS/file.html"` returns `"../"` and
/// `"PDS/sub/file.html"` returns `"../../"`.
#[must_use]
pub fn root_relative_prefix(file_rel_path: &Path) -> String {
  let depth = file_rel_path.components().count();
  if depth <= 1 {
    String::new()
  } else {
    "../".repeat(depth - 1)
  }
}

/// Replace every match of `regex` for which `accept` agrees, leaving the
/// others verbatim.
///
/// `accept` receives the character right before the match and the one right
/// after it (within `text`), which stands in for the look-around guards the
/// `regex` crate does not support.
pub fn replace_guarded<A, R>(
  text: &str,
  regex: &Regex,
  accept: A,
  render: R,
) -> String
where
  A: Fn(Option<char>, Option<char>) -> bool,
  R: Fn(&Captures) -> String,
{
  let mut out = String::with_capacity(text.len());
  let mut last = 0;

  for caps in regex.captures_iter(text) {
    let Some(whole) = caps.get(0) else {
      continue;
    };
    let before = text[..whole.start()].chars().next_back();
    let after = text[whole.end()..].chars().next();
    if !accept(before, after) {
      continue;
    }
    out.push_str(&text[last..whole.start()]);
    out.push_str(&render(&caps));
    last = whole.end();
  }

  out.push_str(&text[last..]);
  out
}

/// Whether a character would make an adjacent name part of a longer
/// identifier or path.
#[must_use]
pub fn is_identifier_adjacent(c: char) -> bool {
  c.is_alphanumeric() || matches!(c, '_' | '/' | '"' | '\'')
}
