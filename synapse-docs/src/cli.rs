use std::path::PathBuf;

use clap::{Parser, Subcommand};
use synapse_markdown::Engine;

/// Command line interface for synapse-docs
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Builds the Synapse HTML documentation from its Markdown sources"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`]). Without one, `html` runs
  /// followed by `index`.
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to the configuration file (TOML or JSON). Defaults to
  /// `synapse-docs.toml` in the working directory when present.
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the synapse-docs CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Write a configuration file holding the default settings
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "synapse-docs.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export the built-in templates to a directory for customization.
  Export {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },

  /// Convert the Markdown documents to HTML pages.
  Html {
    /// Repository root holding the document groups.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Output directory for generated pages.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Block renderer: `comrak` or `simple`.
    #[arg(short, long)]
    engine: Option<Engine>,

    /// Directory with `page.html`/`diagram.html` overriding the built-in
    /// templates.
    #[arg(long = "template-dir")]
    template_dir: Option<PathBuf>,
  },

  /// Refresh the diagrams and ship log of the landing page.
  Index {
    /// Repository root holding the landing page sources.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Output directory holding the landing page.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
