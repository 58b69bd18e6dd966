//! Markdown processing module.
//!
//! - [`core`]: Main processor implementation and rendering pipeline
//! - [`passes`]: The HTML passes run after block rendering, in order
//! - [`process`]: Processing functions with error recovery
//! - [`types`]: Core type definitions and configuration structures
pub mod core;
pub mod passes;
pub mod process;
pub mod types;

pub use self::core::extract_inline_text;

pub use passes::PIPELINE;
pub use process::{process_safe, render_with_recovery};
pub use types::{
  Engine,
  HtmlPass,
  MarkdownOptions,
  MarkdownProcessor,
  ParseEngineError,
  PassContext,
};
