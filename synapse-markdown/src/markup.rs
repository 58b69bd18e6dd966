//! Splitting rendered HTML into opaque and rewritable segments.
//!
//! Post-render passes (URL linking, document links, command links) must not
//! touch markup that is already final: existing anchors, preformatted code,
//! diagram sources and, for most passes, the tags themselves. Instead of
//! swapping those regions for placeholder strings and restoring them later,
//! the HTML is tokenized into an ordered list of segments, the rewrite runs
//! over the text segments only, and the segments are concatenated back in
//! their original order.
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_regex;

/// How finely [`segments`] cuts the HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
  /// Only whole protected elements (anchors, `<pre>`, diagram placeholders,
  /// comments) are opaque. Other tags stay inside text segments, so a
  /// rewrite can still match across `<code>...</code>`.
  Elements,
  /// Protected elements and every other tag are opaque: text segments hold
  /// nothing but character data.
  Tags,
  /// Like [`Granularity::Tags`], with whole inline `<code>` elements opaque
  /// as well. Used by rewrites that must never reach into code.
  Prose,
}

/// A slice of an HTML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
  /// Markup that must be emitted verbatim.
  Opaque(&'a str),
  /// Text that rewrites may change.
  Text(&'a str),
}

impl<'a> Segment<'a> {
  #[must_use]
  pub const fn as_str(&self) -> &'a str {
    match self {
      Self::Opaque(s) | Self::Text(s) => s,
    }
  }
}

const PROTECTED: &str = r#"(?s)<a\b[^>]*>.*?</a>|<pre\b[^>]*>.*?</pre>|<div class="mermaid"[^>]*>.*?</div>|<!--.*?-->"#;

static ELEMENTS_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(PROTECTED));
static TAGS_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(&format!("{PROTECTED}|<[^>]+>")));
static PROSE_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(&format!(r"{PROTECTED}|<code\b[^>]*>.*?</code>|<[^>]+>"))
});

/// Tokenize `html` into segments. Concatenating the segments always yields
/// `html` again.
#[must_use]
pub fn segments(html: &str, granularity: Granularity) -> Vec<Segment<'_>> {
  let regex = match granularity {
    Granularity::Elements => &*ELEMENTS_RE,
    Granularity::Tags => &*TAGS_RE,
    Granularity::Prose => &*PROSE_RE,
  };

  let mut out = Vec::new();
  let mut last = 0;
  for m in regex.find_iter(html) {
    if m.start() > last {
      out.push(Segment::Text(&html[last..m.start()]));
    }
    out.push(Segment::Opaque(m.as_str()));
    last = m.end();
  }
  if last < html.len() {
    out.push(Segment::Text(&html[last..]));
  }
  out
}

/// Apply `rewrite` to every text segment of `html` and splice the result
/// back together with the untouched opaque segments.
pub fn rewrite_text<F>(html: &str, granularity: Granularity, rewrite: F) -> String
where
  F: Fn(&str) -> String,
{
  segments(html, granularity)
    .into_iter()
    .map(|segment| {
      match segment {
        Segment::Opaque(s) => s.to_string(),
        Segment::Text(s) => rewrite(s),
      }
    })
    .collect()
}
