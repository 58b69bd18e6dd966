//! The HTML passes run after block rendering, in pipeline order.
use log::trace;

use super::types::{HtmlPass, PassContext};
use crate::{headings, icons, inline, lists, xref};

/// Rebuild lists folded into paragraphs.
pub struct ListRecovery;

impl HtmlPass for ListRecovery {
  fn name(&self) -> &'static str {
    "list-recovery"
  }

  fn apply(&self, html: &str, _ctx: &PassContext<'_>) -> String {
    lists::recover_lists(html)
  }
}

/// Anchor ids on second and third level headings.
pub struct HeadingAnchors;

impl HtmlPass for HeadingAnchors {
  fn name(&self) -> &'static str {
    "heading-anchors"
  }

  fn apply(&self, html: &str, _ctx: &PassContext<'_>) -> String {
    headings::add_heading_ids(html)
  }
}

/// Bare `http(s)` URLs to links.
pub struct BareUrls;

impl HtmlPass for BareUrls {
  fn name(&self) -> &'static str {
    "bare-urls"
  }

  fn apply(&self, html: &str, ctx: &PassContext<'_>) -> String {
    inline::link_urls_html(html, &ctx.options.url_display)
  }
}

/// Mentions of known documents to links.
pub struct DocumentLinks;

impl HtmlPass for DocumentLinks {
  fn name(&self) -> &'static str {
    "document-links"
  }

  fn apply(&self, html: &str, ctx: &PassContext<'_>) -> String {
    xref::link_documents(html, ctx.references, ctx.prefix)
  }
}

/// Command tokens to links into the command reference.
pub struct CommandTokens;

impl HtmlPass for CommandTokens {
  fn name(&self) -> &'static str {
    "command-links"
  }

  fn apply(&self, html: &str, ctx: &PassContext<'_>) -> String {
    let Some(commands) = ctx.options.commands.as_ref() else {
      return html.to_string();
    };
    if ctx.document.is(&commands.document) {
      trace!("Skipping command links inside {}", commands.document);
      return html.to_string();
    }
    xref::link_commands(html, commands, ctx.prefix)
  }
}

/// Preview images for icon listings.
pub struct IconLines;

impl HtmlPass for IconLines {
  fn name(&self) -> &'static str {
    "icon-lines"
  }

  fn apply(&self, html: &str, ctx: &PassContext<'_>) -> String {
    match ctx.document.icon_dir.as_deref() {
      Some(dir) => icons::link_icon_lines(html, dir),
      None => html.to_string(),
    }
  }
}

/// All passes, in the order they run.
pub static PIPELINE: [&(dyn HtmlPass + Sync); 6] = [
  &ListRecovery,
  &HeadingAnchors,
  &BareUrls,
  &DocumentLinks,
  &CommandTokens,
  &IconLines,
];
