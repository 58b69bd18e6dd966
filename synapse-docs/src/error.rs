use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type for synapse-docs.
#[derive(Debug, Error)]
pub enum DocsError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML serialization error: {0}")]
  TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, DocsError>;
