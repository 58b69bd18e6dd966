//! Diagram placeholders and their extraction into standalone pages.
use std::sync::LazyLock;

use regex::Regex;

use crate::{types::Diagram, utils::compile_regex};

/// Fence language that marks a diagram block.
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(&format!(
    r#"(?s)<pre><code class="language-{DIAGRAM_LANGUAGE}">(.*?)</code></pre>"#
  ))
});

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(&format!(r#"(?s)<div class="{DIAGRAM_LANGUAGE}">(.*?)</div>"#))
});

/// Wrap raw diagram source in a placeholder element. The source is not
/// escaped: the client-side renderer reads it as text.
#[must_use]
pub fn placeholder(source: &str) -> String {
  format!(r#"<div class="{DIAGRAM_LANGUAGE}">{source}</div>"#)
}

/// Turn rendered diagram code blocks into placeholders, decoding the
/// entities the renderer escaped.
#[must_use]
pub fn code_blocks_to_placeholders(html: &str) -> String {
  CODE_BLOCK_RE
    .replace_all(html, |caps: &regex::Captures| {
      placeholder(&html_escape::decode_html_entities(&caps[1]))
    })
    .into_owned()
}

/// File name of the standalone page for diagram `index` of document `stem`.
#[must_use]
pub fn file_name(stem: &str, index: usize) -> String {
  format!("{stem}_diagram_{index}.html")
}

/// Number every placeholder in document order and point it at its
/// standalone page.
///
/// Returns the rewritten HTML and the diagrams. Indices start at 0 and are
/// contiguous; the same input always yields the same names.
#[must_use]
pub fn extract(html: &str, stem: &str) -> (String, Vec<Diagram>) {
  let mut out = String::with_capacity(html.len());
  let mut diagrams = Vec::new();
  let mut last = 0;

  for (index, caps) in PLACEHOLDER_RE.captures_iter(html).enumerate() {
    let (Some(whole), Some(source)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    let diagram = Diagram {
      index,
      file_name: file_name(stem, index),
      source: source.as_str().to_string(),
    };

    out.push_str(&html[last..whole.start()]);
    out.push_str(&format!(
      r#"<div class="{DIAGRAM_LANGUAGE}" data-diagram-url="{}">{}</div>"#,
      diagram.file_name, diagram.source
    ));
    last = whole.end();
    diagrams.push(diagram);
  }

  out.push_str(&html[last..]);
  (out, diagrams)
}
