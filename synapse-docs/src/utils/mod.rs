pub mod documents;
pub mod markdown;
pub mod output;

use std::fmt;

pub use crate::utils::markdown::{
  convert_document,
  create_processor_from_config,
  process_markdown_files,
};

/// Totals of one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
  pub converted: usize,
  pub failed:    usize,
  /// Diagram pages written across all documents.
  pub diagrams:  usize,
}

impl fmt::Display for BatchReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} converted, {} failed, {} diagram pages",
      self.converted, self.failed, self.diagrams
    )
  }
}
