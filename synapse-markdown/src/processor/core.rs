//! Core implementation of the Markdown processor.
//!
//! This module contains the main implementation of `MarkdownProcessor` and its
//! methods, focused on the rendering pipeline: source preprocessing, block
//! rendering with the configured engine, the HTML passes, diagram extraction
//! and title excision.
use comrak::{
  Arena,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use log::{debug, trace};

use super::{
  passes::PIPELINE,
  process::process_safe,
  types::{Engine, MarkdownOptions, MarkdownProcessor, PassContext},
};
use crate::{
  block, diagram, headings, preprocess,
  types::{DocumentContext, MarkdownResult},
  utils::root_relative_prefix,
  xref::CrossReferences,
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    let references = CrossReferences::new(&options.documents);
    Self {
      options,
      references,
    }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render Markdown to a page body, extracting headers, title and diagrams.
  #[must_use]
  pub fn render(&self, markdown: &str, document: &DocumentContext) -> MarkdownResult {
    let source = preprocess::separate_lists(&preprocess::normalize_newlines(markdown));
    let title = self.extract_title(&source);

    let mut html = self.convert_to_html(&source);

    let prefix = root_relative_prefix(&document.output_path);
    let ctx = PassContext {
      options:    &self.options,
      references: &self.references,
      document,
      prefix:     &prefix,
    };
    for pass in PIPELINE {
      trace!("Running pass {}", pass.name());
      html = process_safe(&html, |h| pass.apply(h, &ctx), "");
    }

    let (html, diagrams) = diagram::extract(&html, &document.stem());
    if !diagrams.is_empty() {
      debug!(
        "Extracted {} diagram(s) from {}",
        diagrams.len(),
        document.output_path.display()
      );
    }

    let headers = headings::collect_headers(&html);
    let (html, page_title) = headings::excise_title(&html);

    MarkdownResult {
      html,
      headers,
      title,
      page_title,
      diagrams,
    }
  }

  /// Render block markup with the configured engine. Diagram blocks come
  /// out as placeholders either way.
  fn convert_to_html(&self, content: &str) -> String {
    match self.options.engine {
      Engine::Comrak => {
        let options = self.comrak_options();
        let html = comrak::markdown_to_html(content, &options);
        diagram::code_blocks_to_placeholders(&html)
      },
      Engine::Simple => block::render(content, &self.options.url_display),
    }
  }

  /// Text of the first level-1 heading.
  #[must_use]
  pub fn extract_title(&self, content: &str) -> Option<String> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    root.descendants().find_map(|node| {
      match &node.data.borrow().value {
        NodeValue::Heading(NodeHeading { level: 1, .. }) => {
          let text = extract_inline_text(node).trim().to_string();
          (!text.is_empty()).then_some(text)
        },
        _ => None,
      }
    })
  }

  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    // Bare URLs get their own pass with shortened labels.
    options.extension.autolink = false;
    options.extension.header_ids = None;
    options.render.r#unsafe = true;
    options
  }
}

/// Collect the plain text of an inline container.
pub fn extract_inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::Link(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough => text.push_str(&extract_inline_text(child)),
      NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
      _ => {},
    }
  }
  text
}
