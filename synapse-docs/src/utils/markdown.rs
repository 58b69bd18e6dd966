use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use log::{debug, error, info, warn};
use synapse_markdown::{
  DocumentContext,
  MarkdownProcessor,
  preprocess::{first_fenced_block, insert_after_marker},
  render_with_recovery,
};

use super::{
  BatchReport,
  documents::{collect_group_documents, output_rel_path},
  output::{write_diagram_pages, write_file},
};
use crate::{
  config::{Config, SchemaEmbed},
  html::{
    template::{PageInput, Templates},
    utils::relative_link,
  },
};

/// Creates a Markdown processor from the configuration.
#[must_use]
pub fn create_processor_from_config(config: &Config) -> MarkdownProcessor {
  MarkdownProcessor::new(config.markdown_options())
}

/// Insert the first diagram of the embed's companion document after the
/// marker line.
///
/// A missing companion, diagram or marker leaves the document unchanged.
#[must_use]
pub fn embed_schema(config: &Config, embed: &SchemaEmbed, markdown: &str) -> String {
  let source = config.root.join(&embed.source);
  let companion = match fs::read_to_string(&source) {
    Ok(content) => content,
    Err(e) => {
      warn!("Schema source {} not readable: {e}", source.display());
      return markdown.to_string();
    },
  };

  let Some(block) = first_fenced_block(&companion, "mermaid") else {
    debug!("No diagram in schema source {}", source.display());
    return markdown.to_string();
  };

  insert_after_marker(markdown, &embed.marker, block).unwrap_or_else(|| {
    debug!(
      "Marker {:?} not found in {}",
      embed.marker,
      embed.document.display()
    );
    markdown.to_string()
  })
}

/// Output placement of a document, with its icon folder when it lists
/// icons.
#[must_use]
pub fn document_context(config: &Config, source_rel: &Path) -> DocumentContext {
  let rel_path = output_rel_path(source_rel);
  let context = DocumentContext::new(&rel_path);

  match config.icon_set_for(source_rel) {
    Some(icons) => {
      let page_dir = config
        .output_dir()
        .join(rel_path.parent().unwrap_or_else(|| Path::new("")));
      context.with_icon_dir(relative_link(&page_dir, &config.root.join(&icons.dir)))
    },
    None => context,
  }
}

/// Convert one document and write its page and diagram pages.
///
/// Returns the number of diagram pages written.
pub fn convert_document(
  config: &Config,
  processor: &MarkdownProcessor,
  templates: &Templates,
  source_rel: &Path,
) -> Result<usize> {
  let source_path = config.root.join(source_rel);
  let mut content = fs::read_to_string(&source_path).wrap_err_with(|| {
    format!("Failed to read markdown file: {}", source_path.display())
  })?;

  if let Some(embed) = config.schema_embed_for(source_rel) {
    content = embed_schema(config, embed, &content);
  }

  let context = document_context(config, source_rel);
  let result = render_with_recovery(processor, &content, &context);

  let title = result.title.clone().unwrap_or_else(|| context.stem());
  let rel_path = context.output_path.as_path();

  write_diagram_pages(config, templates, rel_path, &title, &result.diagrams)?;

  let html = templates.render_page(config, &PageInput {
    rel_path,
    source_rel,
    title: &title,
    result: &result,
  })?;

  let output_path = config.output_dir().join(rel_path);
  write_file(&output_path, &html)?;
  info!("  > Created: {}", output_path.display());

  Ok(result.diagrams.len())
}

/// Convert every document of every configured group.
///
/// A document that fails is logged and counted; the batch carries on.
pub fn process_markdown_files(config: &Config) -> Result<BatchReport> {
  let templates = Templates::load(config).wrap_err("Failed to load templates")?;
  let processor = create_processor_from_config(config);

  let mut documents: Vec<PathBuf> = Vec::new();
  for group in &config.groups {
    documents.extend(collect_group_documents(&config.root, group)?);
  }
  info!("Found {} markdown files", documents.len());

  let mut report = BatchReport::default();
  for source_rel in &documents {
    info!("Converting {}", source_rel.display());
    match convert_document(config, &processor, &templates, source_rel) {
      Ok(diagrams) => {
        report.converted += 1;
        report.diagrams += diagrams;
      },
      Err(e) => {
        error!("  X Error converting {}: {e:?}", source_rel.display());
        report.failed += 1;
      },
    }
  }

  Ok(report)
}
