mod defaults;

use std::{
  collections::BTreeMap,
  fs,
  io,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use synapse_markdown::{CommandLinks, Engine, MarkdownOptions, UrlDisplay};
use thiserror::Error;

pub use self::defaults::SCHEMA_MARKER;
use crate::{
  cli::{Cli, Commands},
  error::Result,
};

/// Names looked up in the working directory when no `--config-file` is
/// given.
const CONFIG_FILENAMES: [&str; 3] =
  ["synapse-docs.toml", "synapse-docs.json", ".synapse-docs.toml"];

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read config file {}: {source}", .path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("Failed to parse TOML config from {}: {source}", .path.display())]
  Toml {
    path:   PathBuf,
    source: toml::de::Error,
  },

  #[error("Failed to parse JSON config from {}: {source}", .path.display())]
  Json {
    path:   PathBuf,
    source: serde_json::Error,
  },

  #[error("Unsupported config file format: {}", .0.display())]
  UnsupportedFormat(PathBuf),

  #[error("Unsupported config format: {0}")]
  UnknownFormatName(String),

  #[error("Source root does not exist: {}", .0.display())]
  MissingRoot(PathBuf),

  #[error("Template directory does not exist: {}", .0.display())]
  MissingTemplateDir(PathBuf),
}

/// Texts and names used on every generated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
  pub name:          String,
  pub lang:          String,
  pub home_label:    String,
  /// Sidebar heading above the table of contents.
  pub toc_label:     String,
  pub source_label:  String,
  /// Suffix of diagram page titles, followed by the diagram number.
  pub diagram_label: String,
  pub back_label:    String,
}

impl Default for Site {
  fn default() -> Self {
    Self {
      name:          "Synapse".to_string(),
      lang:          "ru".to_string(),
      home_label:    "Главная".to_string(),
      toc_label:     "Содержание".to_string(),
      source_label:  "GitHub →".to_string(),
      diagram_label: "Диаграмма".to_string(),
      back_label:    "Назад к документу".to_string(),
    }
  }
}

/// A top-level folder of Markdown documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
  /// Folder name under the source root, also used for the output folder.
  pub name:  String,
  /// Breadcrumb label.
  pub label: String,
}

/// Diagram of a companion document inserted into another document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEmbed {
  /// Receiving document, relative to the source root.
  pub document: PathBuf,
  /// Companion document holding the diagram, relative to the source root.
  pub source:   PathBuf,
  /// The diagram goes after the first line containing this text.
  #[serde(default = "default_marker")]
  pub marker:   String,
}

fn default_marker() -> String {
  SCHEMA_MARKER.to_string()
}

/// A document listing icon files, previewed from `dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSet {
  pub document: PathBuf,
  /// Icon folder relative to the source root.
  pub dir:      PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
  pub from: String,
  pub to:   String,
}

/// A line appended to a landing diagram unless `marker` already occurs in
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsureLine {
  pub marker: String,
  pub line:   String,
}

/// A diagram container of the landing page filled from a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingDiagram {
  /// `id` attribute of the `<div class="mermaid">` container.
  pub id:       String,
  /// Source document, relative to the source root.
  pub source:   PathBuf,
  #[serde(default)]
  pub rewrites: Vec<Rewrite>,
  #[serde(default)]
  pub ensure:   Vec<EnsureLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipLog {
  /// Log document, relative to the source root.
  pub source:  PathBuf,
  /// Heading of the log block on the landing page.
  pub heading: String,
}

impl Default for ShipLog {
  fn default() -> Self {
    Self {
      source:  PathBuf::from("Project/log.md"),
      heading: "Судовой журнал".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Landing {
  /// Landing page file, relative to the output directory.
  pub page:     PathBuf,
  pub diagrams: Vec<LandingDiagram>,
  pub ship_log: ShipLog,
}

impl Default for Landing {
  fn default() -> Self {
    Self {
      page:     PathBuf::from("index.html"),
      diagrams: defaults::landing_diagrams(),
      ship_log: ShipLog::default(),
    }
  }
}

/// Configuration options for synapse-docs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Repository root holding the document groups
  pub root: PathBuf,

  /// Output directory for generated pages, `<root>/INDEX` when unset
  #[serde(skip_serializing_if = "Option::is_none")]
  pub output_dir: Option<PathBuf>,

  /// Block renderer
  pub engine: Engine,

  /// Directory with templates overriding the embedded ones
  #[serde(skip_serializing_if = "Option::is_none")]
  pub template_dir: Option<PathBuf>,

  /// Base URL of the Markdown sources, joined with `<group>/<name>.md`
  pub source_url: String,

  pub site: Site,

  /// Document groups, processed in this order
  pub groups: Vec<Group>,

  /// Document names linked wherever they are mentioned, mapped to their
  /// output path relative to the output directory
  pub documents: BTreeMap<String, String>,

  /// Command token linking. No families disables it.
  pub commands: CommandLinks,

  pub url_display: UrlDisplay,

  pub schema_embeds: Vec<SchemaEmbed>,

  pub icon_sets: Vec<IconSet>,

  pub landing: Landing,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      root:          PathBuf::from("."),
      output_dir:    None,
      engine:        Engine::default(),
      template_dir:  None,
      source_url:    "https://github.com/KhudyakovAlex/Synapse/blob/master"
        .to_string(),
      site:          Site::default(),
      groups:        defaults::groups(),
      documents:     defaults::documents(),
      commands:      CommandLinks::default(),
      url_display:   UrlDisplay::default(),
      schema_embeds: defaults::schema_embeds(),
      icon_sets:     defaults::icon_sets(),
      landing:       Landing::default(),
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| {
      ConfigError::Read {
        path: path.to_path_buf(),
        source,
      }
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|source| {
          ConfigError::Json {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|source| {
          ConfigError::Toml {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
  }

  /// Load config from file and CLI arguments
  pub fn load(cli: &Cli) -> std::result::Result<Self, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
      Self::from_file(config_path)?
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);
    config.validate_paths()?;

    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    match &cli.command {
      Some(Commands::Html {
        root,
        output_dir,
        engine,
        template_dir,
      }) => {
        if let Some(root) = root {
          self.root.clone_from(root);
        }
        if let Some(output_dir) = output_dir {
          self.output_dir = Some(output_dir.clone());
        }
        if let Some(engine) = engine {
          self.engine = *engine;
        }
        if let Some(template_dir) = template_dir {
          self.template_dir = Some(template_dir.clone());
        }
      },
      Some(Commands::Index { root, output_dir }) => {
        if let Some(root) = root {
          self.root.clone_from(root);
        }
        if let Some(output_dir) = output_dir {
          self.output_dir = Some(output_dir.clone());
        }
      },
      _ => {},
    }
  }

  /// Validate the paths that must exist before anything is generated
  pub fn validate_paths(&self) -> std::result::Result<(), ConfigError> {
    if !self.root.is_dir() {
      return Err(ConfigError::MissingRoot(self.root.clone()));
    }

    if let Some(ref template_dir) = self.template_dir {
      if !template_dir.is_dir() {
        return Err(ConfigError::MissingTemplateDir(template_dir.clone()));
      }
    }

    Ok(())
  }

  /// Search for a config file in the working directory
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    CONFIG_FILENAMES
      .iter()
      .map(|name| current_dir.join(name))
      .find(|path| path.is_file())
  }

  /// Output directory, `<root>/INDEX` unless set explicitly.
  #[must_use]
  pub fn output_dir(&self) -> PathBuf {
    self
      .output_dir
      .clone()
      .unwrap_or_else(|| self.root.join("INDEX"))
  }

  #[must_use]
  pub fn group(&self, name: &str) -> Option<&Group> {
    self.groups.iter().find(|g| g.name == name)
  }

  /// Schema embed configured for a document, given relative to the root.
  #[must_use]
  pub fn schema_embed_for(&self, document: &Path) -> Option<&SchemaEmbed> {
    self.schema_embeds.iter().find(|e| e.document == document)
  }

  /// Icon set configured for a document, given relative to the root.
  #[must_use]
  pub fn icon_set_for(&self, document: &Path) -> Option<&IconSet> {
    self.icon_sets.iter().find(|s| s.document == document)
  }

  /// Options for the Markdown processor derived from this config.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      engine:      self.engine,
      url_display: self.url_display.clone(),
      documents:   self.documents.clone(),
      commands:    (!self.commands.families.is_empty())
        .then(|| self.commands.clone()),
    }
  }

  /// Write the default configuration to `path` in the given format.
  pub fn generate_default_config(format: &str, path: &Path) -> Result<()> {
    let defaults = Self::default();
    let content = match format.to_lowercase().as_str() {
      "toml" => {
        format!(
          "# synapse-docs configuration\n\n{}",
          toml::to_string_pretty(&defaults)?
        )
      },
      "json" => {
        let mut json = serde_json::to_string_pretty(&defaults)?;
        json.push('\n');
        json
      },
      other => {
        return Err(ConfigError::UnknownFormatName(other.to_string()).into());
      },
    };

    fs::write(path, content)?;
    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Export embedded templates to a directory for customization
  pub fn export_templates(output_dir: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut templates: Vec<_> =
      synapse_templates::all_templates().into_iter().collect();
    templates.sort_unstable();

    for (filename, content) in templates {
      let file_path = output_dir.join(filename);

      if file_path.exists() && !force {
        log::warn!(
          "Skipping existing file: {} (use --force to overwrite)",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content)?;
      log::info!("Exported template: {}", file_path.display());
    }

    log::info!("Templates exported to: {}", output_dir.display());
    log::info!(
      "Use --template-dir {} to customize the generated pages",
      output_dir.display()
    );
    Ok(())
  }
}
