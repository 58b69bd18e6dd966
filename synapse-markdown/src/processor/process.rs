//! Processing functions with error recovery.
use log::error;

use super::types::MarkdownProcessor;
use crate::types::{DocumentContext, MarkdownResult};

/// Render a document, recovering from a panic anywhere in the pipeline.
///
/// On failure the body is replaced by an error notice so the page can still
/// be written.
#[must_use]
pub fn render_with_recovery(
  processor: &MarkdownProcessor,
  content: &str,
  document: &DocumentContext,
) -> MarkdownResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor.render(content, document)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      error!(
        "Panic while rendering {}: {panic_err:?}",
        document.output_path.display()
      );
      MarkdownResult {
        html:       "<div class=\"error\">Critical error processing markdown \
                     content</div>"
          .to_string(),
        headers:    Vec::new(),
        title:      None,
        page_title: None,
        diagrams:   Vec::new(),
      }
    },
  }
}

/// Safely apply a processing step with error recovery.
///
/// Returns the processed content, or `fallback` (the original content when
/// `fallback` is empty) if the step panics.
pub fn process_safe<F>(content: &str, processor_fn: F, fallback: &str) -> String
where
  F: FnOnce(&str) -> String,
{
  if content.is_empty() {
    return String::new();
  }

  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor_fn(content)
  }));

  match result {
    Ok(processed_text) => processed_text,
    Err(e) => {
      if let Some(error_msg) = e.downcast_ref::<String>() {
        error!("Error processing markup: {error_msg}");
      } else if let Some(error_msg) = e.downcast_ref::<&str>() {
        error!("Error processing markup: {error_msg}");
      } else {
        error!("Unknown error occurred while processing markup");
      }

      if fallback.is_empty() {
        content.to_string()
      } else {
        fallback.to_string()
      }
    },
  }
}
