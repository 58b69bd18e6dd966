use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info, warn};
use synapse_docs::{
  cli::{Cli, Commands},
  config::Config,
  landing,
  utils,
};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Some(Commands::Init {
      output,
      format,
      force,
    }) => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
          fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
          info!("Created directory: {}", parent.display());
        }
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!(
          "Failed to generate configuration file: {}",
          output.display()
        )
      })?;
      info!("Configuration file created. Edit it to adjust the generated pages.");
      Ok(())
    },

    Some(Commands::Export { output_dir, force }) => {
      Config::export_templates(output_dir, *force).wrap_err_with(|| {
        format!("Failed to export templates to {}", output_dir.display())
      })
    },

    Some(Commands::Html { .. }) => {
      let config = Config::load(&cli)?;
      generate_documentation(&config)
    },

    Some(Commands::Index { .. }) => {
      let config = Config::load(&cli)?;
      refresh_landing(&config)
    },

    None => {
      let config = Config::load(&cli)?;
      generate_documentation(&config)?;
      refresh_landing(&config)
    },
  }
}

/// Convert every document, then report the totals.
fn generate_documentation(config: &Config) -> Result<()> {
  info!("{}", "=".repeat(60));
  info!("{} Documentation Converter", config.site.name);
  info!("{}", "=".repeat(60));

  let output_dir = config.output_dir();
  fs::create_dir_all(&output_dir).wrap_err_with(|| {
    format!("Failed to create output directory: {}", output_dir.display())
  })?;
  info!("Output directory: {}", output_dir.display());

  let report = utils::process_markdown_files(config)?;

  if report.failed > 0 {
    warn!("Conversion finished with failures: {report}");
  } else {
    info!("Conversion complete: {report}");
  }
  Ok(())
}

fn refresh_landing(config: &Config) -> Result<()> {
  info!("Updating landing page {}...", config.landing.page.display());
  landing::update_landing(config)
}
