use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::info;
use synapse_markdown::Diagram;

use crate::{config::Config, html::template::Templates};

/// Write a generated file, creating its folder first.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create output directory: {}", parent.display())
    })?;
  }
  fs::write(path, content)
    .wrap_err_with(|| format!("Failed to write {}", path.display()))
}

/// Write one standalone page per diagram next to the page at `rel_path`.
pub fn write_diagram_pages(
  config: &Config,
  templates: &Templates,
  rel_path: &Path,
  title: &str,
  diagrams: &[Diagram],
) -> Result<()> {
  let output_dir = config.output_dir();
  let page_dir = rel_path.parent().unwrap_or_else(|| Path::new(""));

  for diagram in diagrams {
    let html = templates.render_diagram(config, rel_path, title, diagram)?;
    let path = output_dir.join(page_dir).join(&diagram.file_name);
    write_file(&path, &html)?;
    info!("  > Created diagram: {}", path.display());
  }

  Ok(())
}
