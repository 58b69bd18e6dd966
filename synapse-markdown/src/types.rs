//! Types for the synapse-markdown public API.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Represents a header in a rendered document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Header text with tags stripped and entities decoded.
  pub text:  String,
  /// Header level (1-4).
  pub level: u8,
  /// Anchor ID of the header, empty for levels that get none.
  pub id:    String,
}

/// A diagram block lifted out of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagram {
  /// Position of the diagram within its document, starting at 0.
  pub index:     usize,
  /// File name of the standalone diagram page, `<stem>_diagram_<index>.html`.
  pub file_name: String,
  /// Raw diagram source.
  pub source:    String,
}

/// Result of Markdown processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered body HTML, without the level-1 heading.
  pub html: String,

  /// Extracted headers (for `ToC`, navigation, etc).
  pub headers: Vec<Header>,

  /// Plain text of the first level-1 heading, if any.
  pub title: Option<String>,

  /// Markup of the level-1 heading that was cut out of the body.
  pub page_title: Option<String>,

  /// Diagrams found in the document, in document order.
  pub diagrams: Vec<Diagram>,
}

/// Where a document lands in the output tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContext {
  /// Output path relative to the output root, e.g. `PDS/SynapsePDS_FW.html`.
  pub output_path: PathBuf,
  /// Link prefix of the icon folder for icon documents, relative to the
  /// output document.
  pub icon_dir:    Option<String>,
}

impl DocumentContext {
  #[must_use]
  pub fn new(output_path: impl Into<PathBuf>) -> Self {
    Self {
      output_path: output_path.into(),
      icon_dir:    None,
    }
  }

  #[must_use]
  pub fn with_icon_dir(mut self, icon_dir: impl Into<String>) -> Self {
    self.icon_dir = Some(icon_dir.into());
    self
  }

  /// File stem of the output document.
  #[must_use]
  pub fn stem(&self) -> String {
    self
      .output_path
      .file_stem()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_default()
  }

  /// Whether this document is the one at `path` (relative to the output
  /// root).
  #[must_use]
  pub fn is(&self, path: &str) -> bool {
    self.output_path == Path::new(path)
  }
}
