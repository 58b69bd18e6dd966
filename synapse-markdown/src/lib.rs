//! # synapse-markdown
//!
//! Markdown to HTML conversion for the Synapse documentation set: block
//! rendering, inline markup, nested list recovery, heading anchors,
//! cross-reference links between documents and diagram extraction.
//!
//! The crate does no file I/O. It turns one document's Markdown into a page
//! body plus the diagrams that need their own pages.
//!
//! ## Quick Start
//!
//! ```rust
//! use synapse_markdown::{DocumentContext, MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render(
//!   "# Hello\n\nThis is **bold** text.",
//!   &DocumentContext::new("PRD/Hello.html"),
//! );
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains("<strong>bold</strong>"));
//! ```
//!
//! ## Pipeline
//!
//! 1. Source preprocessing (line endings, lists directly under prose)
//! 2. Block rendering with the `comrak` or `simple` engine
//! 3. HTML passes: list recovery, heading anchors, bare URLs, document
//!    links, command links, icon previews
//! 4. Diagram extraction and title excision
pub mod block;
pub mod diagram;
pub mod headings;
pub mod icons;
pub mod inline;
pub mod lists;
pub mod markup;
pub mod preprocess;
pub mod processor;
mod types;
pub mod utils;
pub mod xref;

pub use crate::{
  inline::UrlDisplay,
  processor::{
    Engine,
    MarkdownOptions,
    MarkdownProcessor,
    render_with_recovery,
  },
  types::{Diagram, DocumentContext, Header, MarkdownResult},
  xref::{CommandFamily, CommandLinks, CrossReferences},
};
