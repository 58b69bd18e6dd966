//! Type definitions for the Markdown processor.
//!
//! Contains the core types used by the processor, including:
//! - Configuration options (`MarkdownOptions`)
//! - The main processor struct (`MarkdownProcessor`)
//! - The HTML pass trait and the context passes run with
//!
//! # Examples
//!
//! ```
//! use synapse_markdown::{Engine, MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   engine: Engine::Simple,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```
use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  inline::UrlDisplay,
  xref::{CommandLinks, CrossReferences},
};

/// Block renderer used for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
  /// General-purpose `CommonMark` renderer with GFM tables.
  #[default]
  Comrak,
  /// Line-scanning converter without external parsing.
  Simple,
}

/// Error returned when an engine name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine {0:?}, expected \"comrak\" or \"simple\"")]
pub struct ParseEngineError(pub String);

impl FromStr for Engine {
  type Err = ParseEngineError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "comrak" => Ok(Self::Comrak),
      "simple" => Ok(Self::Simple),
      _ => Err(ParseEngineError(s.to_string())),
    }
  }
}

impl fmt::Display for Engine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Comrak => f.write_str("comrak"),
      Self::Simple => f.write_str("simple"),
    }
  }
}

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Block renderer.
  pub engine: Engine,

  /// Label limits for bare URLs.
  pub url_display: UrlDisplay,

  /// Known document names and their output paths, relative to the output
  /// root. Bare mentions of these names become links.
  pub documents: BTreeMap<String, String>,

  /// Command token linking. `None` disables it.
  pub commands: Option<CommandLinks>,
}

/// Main Markdown processor.
#[derive(Debug, Clone)]
pub struct MarkdownProcessor {
  pub(crate) options:    MarkdownOptions,
  pub(crate) references: CrossReferences,
}

/// Per-document data the HTML passes run with.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
  pub options:    &'a MarkdownOptions,
  pub references: &'a CrossReferences,
  pub document:   &'a crate::types::DocumentContext,
  /// `../` once per directory level between the document and the output
  /// root.
  pub prefix:     &'a str,
}

/// A rewrite over rendered HTML.
///
/// Passes run in a fixed order, each receiving the output of the previous
/// one. A pass must leave HTML it has nothing to do with unchanged.
pub trait HtmlPass {
  fn name(&self) -> &'static str;
  fn apply(&self, html: &str, ctx: &PassContext<'_>) -> String;
}
