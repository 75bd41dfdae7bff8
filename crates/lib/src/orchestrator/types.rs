//! Options, errors and reports for builds and installs.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::build_lock::LockError;
use crate::consts::{ARCHIVE_EXTENSION, MODS_DIR};
use crate::fetch::FetchError;
use crate::manifest::InstallProfile;
use crate::target::{BuildTarget, UnknownTarget};
use crate::util::hash::ChecksumError;

/// Options controlling a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
  /// Build target name, parsed case-insensitively into a [`BuildTarget`].
  pub target: String,
  /// Tolerate availability failures: an existing build directory is replaced,
  /// unreachable resources and missing config sources are skipped.
  pub force_build: bool,
  pub skip_checksum: bool,
  pub pack_to_zip: bool,
  /// Directory holding build directories, archives and lock files.
  pub output_dir: PathBuf,
}

impl BuildOptions {
  pub fn new(target: impl Into<String>) -> Self {
    Self {
      target: target.into(),
      force_build: false,
      skip_checksum: false,
      pack_to_zip: false,
      output_dir: PathBuf::from("."),
    }
  }

  pub fn force_build(mut self, force: bool) -> Self {
    self.force_build = force;
    self
  }

  pub fn skip_checksum(mut self, skip: bool) -> Self {
    self.skip_checksum = skip;
    self
  }

  pub fn pack_to_zip(mut self, zip: bool) -> Self {
    self.pack_to_zip = zip;
    self
  }

  pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.output_dir = dir.into();
    self
  }
}

/// Invalid orchestrator construction inputs.
#[derive(Debug, Error)]
pub enum ConfigurationError {
  #[error("Invalid modpack file path provided.")]
  EmptyManifestPath,

  #[error("Invalid build target provided: {0}")]
  UnknownTarget(#[from] UnknownTarget),

  #[error("Invalid output directory provided.")]
  EmptyOutputDir,

  #[error("Failed to initialize resource fetcher: {0}")]
  Fetcher(#[source] FetchError),
}

/// How a build failure relates to `force_build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
  /// Something expected is absent or unreachable.
  Availability,
  /// Fetched content does not match what the manifest declares.
  Integrity,
  /// The build tree or archive could not be written.
  Destination,
}

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("{0}")]
  Locked(#[from] LockError),

  #[error("The build directory {0} already exists. The previous build may be corrupted.")]
  DirectoryExists(PathBuf),

  #[error("Failed to remove the existing build directory {path}: {source}")]
  RemoveDirectory {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to create directory {path}: {source}")]
  CreateDirectory {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("The resource {name} returned status {status} ({url}).")]
  ResourceUnavailable { name: String, url: String, status: u16 },

  #[error("The resource {name} could not be fetched: {source}")]
  Fetch {
    name: String,
    #[source]
    source: FetchError,
  },

  #[error("The resource {name} failed verification: {source}")]
  Checksum {
    name: String,
    #[source]
    source: ChecksumError,
  },

  #[error("Failed to write {path}: {source}")]
  WriteArtifact {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("The config file {path} of {name} does not exist.")]
  ConfigSourceMissing { name: String, path: PathBuf },

  #[error("Failed to copy config file {src} to {dst}: {source}")]
  CopyConfig {
    src: PathBuf,
    dst: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("The config destination {0} escapes the build directory.")]
  ConfigDestinationOutsideBuild(PathBuf),

  #[error("Failed to archive the build into {path}: {source}")]
  Archive {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl BuildError {
  pub fn class(&self) -> FailureClass {
    match self {
      BuildError::DirectoryExists(_)
      | BuildError::ResourceUnavailable { .. }
      | BuildError::Fetch { .. }
      | BuildError::ConfigSourceMissing { .. } => FailureClass::Availability,
      BuildError::Checksum { .. } => FailureClass::Integrity,
      BuildError::Locked(_)
      | BuildError::RemoveDirectory { .. }
      | BuildError::CreateDirectory { .. }
      | BuildError::WriteArtifact { .. }
      | BuildError::CopyConfig { .. }
      | BuildError::ConfigDestinationOutsideBuild(_)
      | BuildError::Archive { .. } => FailureClass::Destination,
    }
  }
}

#[derive(Debug, Error)]
pub enum InstallError {
  #[error("The {0} rules are not specified.")]
  RulesMissing(InstallProfile),

  #[error("The installation source {0} does not exist.")]
  SourceMissing(PathBuf),

  #[error("Cannot determine source type of {0}.")]
  UnknownSourceType(PathBuf),

  #[error("Failed to copy file {src} to {dst}: {source}")]
  CopyFile {
    src: PathBuf,
    dst: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to copy directory {src} to {dst}: {source}")]
  CopyTree {
    src: PathBuf,
    dst: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Why a mod did not make it into the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
  ExcludedFromTarget(BuildTarget),
  /// Tolerated availability failure under `force_build`.
  Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMod {
  pub name: String,
  pub reason: SkipReason,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
  pub build_dir: PathBuf,
  /// Modding API artifact, absent when it was skipped under `force_build`.
  pub api_artifact: Option<PathBuf>,
  /// Mod artifacts written into `mods/`, in manifest order.
  pub mod_artifacts: Vec<PathBuf>,
  pub skipped_mods: Vec<SkippedMod>,
  /// Config overlays written into the build.
  pub config_files: Vec<PathBuf>,
  /// Config sources that were missing and skipped under `force_build`.
  pub skipped_config_files: Vec<PathBuf>,
  pub bytes_written: u64,
  pub archive: Option<PathBuf>,
}

impl BuildReport {
  pub fn artifact_count(&self) -> usize {
    self.mod_artifacts.len() + usize::from(self.api_artifact.is_some())
  }

  pub fn contains_mod_artifact(&self, file_name: &str) -> bool {
    self
      .mod_artifacts
      .iter()
      .any(|p| p.file_name().is_some_and(|n| n == file_name))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstalledKind {
  File,
  Tree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledResource {
  pub source: PathBuf,
  pub destination: PathBuf,
  pub kind: InstalledKind,
}

/// Outcome of a successful install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
  pub installed: Vec<InstalledResource>,
}

/// Per-run state of a build, kept apart from the immutable manifest.
#[derive(Debug)]
pub(crate) struct RunContext {
  pub target: BuildTarget,
  pub build_dir: PathBuf,
  pub mods_dir: PathBuf,
  pub archive_path: PathBuf,
  pub report: BuildReport,
}

impl RunContext {
  pub fn new(target: BuildTarget, output_dir: &Path, build_dir_name: &str) -> Self {
    let build_dir = output_dir.join(build_dir_name);
    Self {
      target,
      mods_dir: build_dir.join(MODS_DIR),
      archive_path: output_dir.join(format!("{}.{}", build_dir_name, ARCHIVE_EXTENSION)),
      report: BuildReport {
        build_dir: build_dir.clone(),
        ..BuildReport::default()
      },
      build_dir,
    }
  }
}
