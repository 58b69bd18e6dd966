//! Inline transform: code spans, emphasis and bare URLs within a text span.
//!
//! Every function here is best-effort: anything that does not match is left
//! exactly as it was.
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
  markup::{Granularity, rewrite_text},
  utils::{compile_regex, replace_guarded},
};

/// Separator between the lead and trail of a shortened URL label.
pub const ELLIPSIS: &str = " ... ";

/// Display limits for bare URLs turned into links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlDisplay {
  /// URLs longer than this many characters get a shortened label.
  pub max_len: usize,
  /// Characters kept from each end of a shortened URL.
  pub keep:    usize,
}

impl Default for UrlDisplay {
  fn default() -> Self {
    Self {
      max_len: 30,
      keep:    15,
    }
  }
}

impl UrlDisplay {
  /// Length above which a label is shortened. Never lower than the length
  /// of a shortened label, so shortening always makes the label shorter.
  #[must_use]
  pub fn threshold(&self) -> usize {
    self
      .max_len
      .max(self.keep * 2 + ELLIPSIS.chars().count())
  }

  /// Visible text for a link to `url`.
  #[must_use]
  pub fn label(&self, url: &str) -> String {
    let len = url.chars().count();
    if len <= self.threshold() {
      return url.to_string();
    }
    let lead: String = url.chars().take(self.keep).collect();
    let trail: String = url.chars().skip(len - self.keep).collect();
    format!("{lead}{ELLIPSIS}{trail}")
  }
}

static CODE_SPAN_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"`([^`]+)`"));
static BOLD_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"\*\*(.+?)\*\*"));
static ITALIC_STAR_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"\*([^*\s](?:[^*]*[^*\s])?)\*"));
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"_([^_\s](?:[^_]*[^_\s])?)_"));
static URL_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r#"https?://[^\s<>"')]+"#));

/// Apply the full inline transform to a Markdown text span.
///
/// Code spans are cut out first and their content escaped, so emphasis and
/// URL rules never see it. The remaining text goes through bold, italic and
/// URL rewriting in that order, skipping any tags already present.
#[must_use]
pub fn transform(span: &str, urls: &UrlDisplay) -> String {
  let mut out = String::with_capacity(span.len());
  let mut last = 0;

  for caps in CODE_SPAN_RE.captures_iter(span) {
    let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    out.push_str(&transform_text(&span[last..whole.start()], urls));
    out.push_str("<code>");
    out.push_str(&html_escape::encode_text(code.as_str()));
    out.push_str("</code>");
    last = whole.end();
  }
  out.push_str(&transform_text(&span[last..], urls));
  out
}

fn transform_text(text: &str, urls: &UrlDisplay) -> String {
  if text.is_empty() {
    return String::new();
  }
  rewrite_text(text, Granularity::Prose, |t| {
    link_urls(&italic(&bold(t)), urls)
  })
}

/// `**text**` to `<strong>`. Runs before [`italic`] so the single-star rule
/// cannot consume half of a bold span.
#[must_use]
pub fn bold(text: &str) -> String {
  BOLD_RE
    .replace_all(text, "<strong>$1</strong>")
    .into_owned()
}

/// `*text*` and `_text_` to `<em>`. Underscore emphasis needs a non-word
/// character (or the span edge) on both sides, so `snake_case_names` stay
/// intact.
#[must_use]
pub fn italic(text: &str) -> String {
  let starred = ITALIC_STAR_RE.replace_all(text, "<em>$1</em>");
  replace_guarded(
    &starred,
    &ITALIC_UNDERSCORE_RE,
    |before, after| {
      before.is_none_or(|c| !c.is_alphanumeric() && c != '_')
        && after.is_none_or(|c| !c.is_alphanumeric() && c != '_')
    },
    |caps| format!("<em>{}</em>", &caps[1]),
  )
}

/// Turn bare `http(s)://` URLs into links.
///
/// A URL directly preceded by a quote or `>` is assumed to be linked
/// already and is left alone.
#[must_use]
pub fn link_urls(text: &str, urls: &UrlDisplay) -> String {
  replace_guarded(
    text,
    &URL_RE,
    |before, _| before.is_none_or(|c| !matches!(c, '"' | '\'' | '>')),
    |caps| {
      let url = &caps[0];
      format!(
        r#"<a href="{url}" target="_blank">{}</a>"#,
        urls.label(url)
      )
    },
  )
}

/// [`link_urls`] over rendered HTML, touching text nodes outside anchors
/// and code only.
#[must_use]
pub fn link_urls_html(html: &str, urls: &UrlDisplay) -> String {
  rewrite_text(html, Granularity::Prose, |t| link_urls(t, urls))
}
