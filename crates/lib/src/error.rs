//! Crate-wide error type.

use thiserror::Error;

use crate::manifest::ManifestError;
use crate::orchestrator::{BuildError, ConfigurationError, InstallError};

/// Every failure the orchestrator can surface.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Configuration(#[from] ConfigurationError),

  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error(transparent)]
  Build(#[from] BuildError),

  #[error(transparent)]
  Install(#[from] InstallError),
}

pub type Result<T> = std::result::Result<T, Error>;
