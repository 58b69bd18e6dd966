use std::{fs, path::Path};

use synapse_markdown::{Diagram, MarkdownResult, utils::root_relative_prefix};
use synapse_templates::{DIAGRAM_TEMPLATE, PAGE_TEMPLATE};
use tera::Tera;
use thiserror::Error;

use crate::{config::Config, html::utils};

const PAGE: &str = "page";
const DIAGRAM: &str = "diagram";

#[derive(Debug, Error)]
pub enum TemplateError {
  #[error("Failed to read custom template {}: {source}", .path.display())]
  Read {
    path:   std::path::PathBuf,
    source: std::io::Error,
  },

  #[error("Failed to parse template {name}: {message}")]
  Parse { name: String, message: String },

  #[error("Failed to render template {name}: {message}")]
  Render { name: String, message: String },
}

/// Flatten a Tera error and its sources into one line.
fn describe(e: &tera::Error) -> String {
  let mut message = e.to_string();
  let mut source = std::error::Error::source(e);
  while let Some(inner) = source {
    message.push_str(": ");
    message.push_str(&inner.to_string());
    source = inner.source();
  }
  message
}

/// Page and diagram shells, loaded once per run.
pub struct Templates {
  tera: Tera,
}

/// Everything a page shell needs besides the configuration.
pub struct PageInput<'a> {
  /// Output path relative to the output directory.
  pub rel_path:   &'a Path,
  /// Source path relative to the source root.
  pub source_rel: &'a Path,
  /// Plain-text page title.
  pub title:      &'a str,
  pub result:     &'a MarkdownResult,
}

impl Templates {
  /// Load the shells, preferring files from `template_dir`.
  pub fn load(config: &Config) -> Result<Self, TemplateError> {
    let mut tera = Tera::default();
    for (name, file, fallback) in [
      (PAGE, "page.html", PAGE_TEMPLATE),
      (DIAGRAM, "diagram.html", DIAGRAM_TEMPLATE),
    ] {
      let content = template_content(config, file, fallback)?;
      // Names without an .html suffix keep Tera from escaping the
      // pre-rendered fragments.
      tera.add_raw_template(name, &content).map_err(|e| {
        TemplateError::Parse {
          name:    file.to_string(),
          message: describe(&e),
        }
      })?;
    }
    Ok(Self { tera })
  }

  /// Render a documentation page.
  pub fn render_page(
    &self,
    config: &Config,
    page: &PageInput<'_>,
  ) -> Result<String, TemplateError> {
    let prefix = root_relative_prefix(page.rel_path);

    let mut context = Self::site_context(config);
    context.insert("title", &html_escape::encode_text(page.title));
    context.insert("css_path", &prefix);
    context.insert("js_path", &prefix);
    context.insert("root_path", &prefix);
    context.insert("breadcrumbs", &utils::breadcrumbs(config, page.rel_path));
    context.insert(
      "source_url",
      &html_escape::encode_double_quoted_attribute(&utils::source_url(
        config,
        page.source_rel,
      )),
    );
    context.insert(
      "page_title",
      page.result.page_title.as_deref().unwrap_or_default(),
    );
    context.insert("toc", &utils::generate_toc(&page.result.headers));
    context.insert("content", &page.result.html);

    self.render(PAGE, &context)
  }

  /// Render the standalone page of one diagram of the page at `rel_path`.
  pub fn render_diagram(
    &self,
    config: &Config,
    rel_path: &Path,
    title: &str,
    diagram: &Diagram,
  ) -> Result<String, TemplateError> {
    let back_url = rel_path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();
    let diagram_title = format!(
      "{title} - {} {}",
      config.site.diagram_label,
      diagram.index + 1
    );

    let mut context = Self::site_context(config);
    context.insert("title", &html_escape::encode_text(&diagram_title));
    context.insert("js_path", &root_relative_prefix(rel_path));
    context.insert(
      "back_url",
      &html_escape::encode_double_quoted_attribute(&back_url),
    );
    context.insert("diagram_code", &diagram.source);

    self.render(DIAGRAM, &context)
  }

  fn site_context(config: &Config) -> tera::Context {
    let site = &config.site;
    let mut context = tera::Context::new();
    context.insert("lang", &site.lang);
    context.insert("site_name", &html_escape::encode_text(&site.name));
    context.insert("source_label", &html_escape::encode_text(&site.source_label));
    context.insert("toc_label", &html_escape::encode_text(&site.toc_label));
    context.insert("back_label", &html_escape::encode_text(&site.back_label));
    context
  }

  fn render(
    &self,
    name: &str,
    context: &tera::Context,
  ) -> Result<String, TemplateError> {
    self.tera.render(name, context).map_err(|e| {
      TemplateError::Render {
        name:    name.to_string(),
        message: describe(&e),
      }
    })
  }
}

fn template_content(
  config: &Config,
  file: &str,
  fallback: &str,
) -> Result<String, TemplateError> {
  if let Some(template_dir) = &config.template_dir {
    let path = template_dir.join(file);
    if path.is_file() {
      log::debug!("Using custom template: {}", path.display());
      return fs::read_to_string(&path)
        .map_err(|source| TemplateError::Read { path, source });
    }
  }
  Ok(fallback.to_string())
}
