//! Line-scanning block transform used by the `simple` engine.
//!
//! Handles headings, fenced blocks, lists, line breaks and paragraphs with a
//! single top-to-bottom pass. Anything it does not recognise becomes
//! paragraph text.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
  diagram::{DIAGRAM_LANGUAGE, placeholder},
  inline::{UrlDisplay, transform},
  lists::{ListItem, ListKind, parse_marker, render_items},
  utils::compile_regex,
};

const FENCE: &str = "```";

static HEADING_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"^(#{1,4}) (.+)$"));

/// Block state of the scan: the open list (if any) and the pending
/// paragraph lines.
struct Blocks<'a> {
  urls:      &'a UrlDisplay,
  out:       Vec<String>,
  open_list: Option<ListKind>,
  items:     Vec<ListItem>,
  paragraph: Vec<String>,
}

impl<'a> Blocks<'a> {
  const fn new(urls: &'a UrlDisplay) -> Self {
    Self {
      urls,
      out: Vec::new(),
      open_list: None,
      items: Vec::new(),
      paragraph: Vec::new(),
    }
  }

  fn close_list(&mut self) {
    if self.open_list.take().is_some() {
      self.out.push(render_items(&self.items));
      self.items.clear();
    }
  }

  fn close_paragraph(&mut self) {
    if !self.paragraph.is_empty() {
      self.out.push(format!("<p>{}</p>", self.paragraph.join("\n")));
      self.paragraph.clear();
    }
  }

  fn close_all(&mut self) {
    self.close_paragraph();
    self.close_list();
  }

  fn list_item(&mut self, mut item: ListItem) {
    self.close_paragraph();
    match self.open_list {
      // A top-level marker of the other kind ends the open list.
      Some(kind) if kind != item.kind && item.depth == 0 => {
        self.close_list();
        self.open_list = Some(item.kind);
      },
      Some(_) => {},
      None => self.open_list = Some(item.kind),
    }
    item.text = transform(&item.text, self.urls);
    self.items.push(item);
  }

  fn push_raw(&mut self, html: String) {
    self.close_all();
    self.out.push(html);
  }

  fn finish(mut self) -> String {
    self.close_all();
    self.out.join("\n")
  }
}

/// Convert a Markdown body to block-level HTML.
#[must_use]
pub fn render(markdown: &str, urls: &UrlDisplay) -> String {
  let lines: Vec<&str> = markdown.lines().collect();
  let mut blocks = Blocks::new(urls);
  let mut idx = 0;

  while let Some(&line) = lines.get(idx) {
    idx += 1;

    if let Some(info) = line.trim_start().strip_prefix(FENCE)
      && let Some(len) = fence_length(&lines[idx..])
    {
      let body = lines[idx..idx + len].join("\n");
      blocks.push_raw(code_block(info.trim(), &body));
      idx += len + 1;
      continue;
    }

    if line.trim().is_empty() {
      blocks.close_all();
      continue;
    }

    if let Some(caps) = HEADING_RE.captures(line) {
      let level = caps[1].len();
      let text = transform(caps[2].trim_end(), urls);
      blocks.push_raw(format!("<h{level}>{text}</h{level}>"));
      continue;
    }

    if let Some(item) = parse_marker(line) {
      blocks.list_item(item);
      continue;
    }

    // Any other line ends the open list.
    blocks.close_list();

    if line.trim_start().starts_with('<') {
      blocks.push_raw(line.to_string());
      continue;
    }

    let mut text = transform(line.trim(), urls);
    if line.ends_with("  ") {
      text.push_str("<br>");
    }
    blocks.paragraph.push(text);
  }

  blocks.finish()
}

/// Number of body lines before the closing fence, if there is one.
fn fence_length(rest: &[&str]) -> Option<usize> {
  rest
    .iter()
    .position(|l| l.trim_start().starts_with(FENCE))
}

fn code_block(info: &str, body: &str) -> String {
  let lang = info.split_whitespace().next().unwrap_or_default();
  if lang == DIAGRAM_LANGUAGE {
    return placeholder(&format!("{body}\n"));
  }
  let code = html_escape::encode_text(body);
  if lang.is_empty() {
    format!("<pre><code>{code}\n</code></pre>")
  } else {
    format!("<pre><code class=\"language-{lang}\">{code}\n</code></pre>")
  }
}
