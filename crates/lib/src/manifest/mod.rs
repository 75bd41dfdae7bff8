//! Modpack manifest model and loading.
//!
//! Manifests are JSON documents read once at orchestrator construction.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use types::*;

/// Errors raised while reading or parsing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("the modpack file '{path}' can not be accessed: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("the modpack file '{0}' is empty")]
  Empty(PathBuf),

  #[error("the modpack file '{path}' is malformed: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("the modpack file is invalid: {0}")]
  Invalid(String),
}

impl Modpack {
  /// Read and parse a manifest file.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    if content.trim().is_empty() {
      return Err(ManifestError::Empty(path.to_path_buf()));
    }

    let modpack = Self::parse(&content, path)?;
    debug!(path = %path.display(), mods = modpack.mods.len(), "manifest loaded");
    Ok(modpack)
  }

  /// Parse JSON content read from `path` and check its structural invariants.
  fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
    let modpack: Modpack = serde_json::from_str(content).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    modpack.validate()?;
    Ok(modpack)
  }

  fn validate(&self) -> Result<(), ManifestError> {
    if self.name.trim().is_empty() {
      return Err(ManifestError::Invalid("modpack name must not be empty".to_string()));
    }
    if self.version.trim().is_empty() {
      return Err(ManifestError::Invalid("modpack version must not be empty".to_string()));
    }
    Ok(())
  }

  /// Returns the selected installation rule set, if the manifest declares it.
  pub fn installation_rules(&self, profile: InstallProfile) -> Option<&[InstallationResource]> {
    match profile {
      InstallProfile::Default => self.installation.as_deref(),
      InstallProfile::Development => self.dev_installation.as_deref(),
    }
  }
}

/// Which installation rule set to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallProfile {
  #[default]
  Default,
  Development,
}

impl std::fmt::Display for InstallProfile {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      InstallProfile::Default => write!(f, "installation"),
      InstallProfile::Development => write!(f, "development installation"),
    }
  }
}
