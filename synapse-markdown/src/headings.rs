//! Heading anchors, header collection and title excision on rendered HTML.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
  types::Header,
  utils::{compile_regex, slugify, strip_tags},
};

static H2_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"<h2>(.+?)</h2>"));
static H3_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"<h3>(.+?)</h3>"));
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(r#"(?s)<h([1-4])(?:\s+id="([^"]*)")?>(.*?)</h[1-4]>"#)
});
static H1_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"(?s)<h1(?:\s[^>]*)?>.*?</h1>"));

/// Give every bare `<h2>` and `<h3>` an `id` generated from its text.
#[must_use]
pub fn add_heading_ids(html: &str) -> String {
  let with_h2 = H2_RE.replace_all(html, |caps: &regex::Captures| {
    format!(r#"<h2 id="{}">{}</h2>"#, slugify(&caps[1]), &caps[1])
  });
  H3_RE
    .replace_all(&with_h2, |caps: &regex::Captures| {
      format!(r#"<h3 id="{}">{}</h3>"#, slugify(&caps[1]), &caps[1])
    })
    .into_owned()
}

/// Collect the `<h1>`-`<h4>` headers of rendered HTML in document order.
#[must_use]
pub fn collect_headers(html: &str) -> Vec<Header> {
  HEADER_RE
    .captures_iter(html)
    .filter_map(|caps| {
      let level = caps[1].parse::<u8>().ok()?;
      let text = html_escape::decode_html_entities(&strip_tags(&caps[3]))
        .trim()
        .to_string();
      let id = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
      Some(Header { text, level, id })
    })
    .collect()
}

/// Cut the first level-1 heading out of the body.
///
/// Returns the remaining body and the heading's markup.
#[must_use]
pub fn excise_title(html: &str) -> (String, Option<String>) {
  match H1_RE.find(html) {
    Some(m) => {
      let mut body = String::with_capacity(html.len());
      body.push_str(&html[..m.start()]);
      body.push_str(html[m.end()..].trim_start_matches('\n'));
      (body, Some(m.as_str().to_string()))
    },
    None => (html.to_string(), None),
  }
}
