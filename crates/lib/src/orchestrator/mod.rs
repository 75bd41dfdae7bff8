//! Build and install orchestration.
//!
//! An [`Orchestrator`] owns one parsed manifest and drives two operations over it:
//! - [`Orchestrator::build`]: fetch, verify and lay out every artifact of the
//!   active target into `{name}-{version}-{target}-build/`, optionally zipped
//! - [`Orchestrator::install`]: copy a finished build into place following the
//!   manifest's installation rules
//!
//! Everything runs sequentially, in manifest order. Failures abort the running
//! operation unless the [`ForcePolicy`] tolerates their [`FailureClass`].

mod build;
mod install;
pub mod policy;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::consts::BUILD_DIR_SUFFIX;
use crate::error::Error;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::fs::{FileSystem, LocalFileSystem};
use crate::manifest::Modpack;
use crate::report::Reporter;
use crate::target::BuildTarget;

pub use policy::{Disposition, ForcePolicy};
pub use types::{
  BuildError, BuildOptions, BuildReport, ConfigurationError, FailureClass, InstallError, InstallReport,
  InstalledKind, InstalledResource, SkipReason, SkippedMod,
};

pub struct Orchestrator {
  modpack: Modpack,
  manifest_dir: PathBuf,
  target: BuildTarget,
  options: BuildOptions,
  policy: ForcePolicy,
  reporter: Arc<dyn Reporter>,
  fetcher: Arc<dyn Fetcher>,
  fs: Arc<dyn FileSystem>,
}

impl Orchestrator {
  /// Validate the options and load the manifest at `manifest_path`.
  ///
  /// Only the manifest file is read; no network access happens and nothing is written.
  pub fn new(manifest_path: &Path, options: BuildOptions, reporter: Arc<dyn Reporter>) -> Result<Self, Error> {
    if manifest_path.as_os_str().is_empty() {
      reporter.verbose("Invalid modpack file path provided.");
      return Err(ConfigurationError::EmptyManifestPath.into());
    }

    if options.output_dir.as_os_str().is_empty() {
      reporter.verbose("Invalid output directory provided.");
      return Err(ConfigurationError::EmptyOutputDir.into());
    }

    let target: BuildTarget = options.target.parse().map_err(|e| {
      reporter.verbose("The provided build target is not supported.");
      ConfigurationError::UnknownTarget(e)
    })?;
    reporter.verbose(&format!("Build target resolved: {}", target));

    reporter.info("Parsing the modpack file.");
    let modpack = Modpack::load(manifest_path).inspect_err(|e| reporter.verbose(&e.to_string()))?;

    let manifest_dir = manifest_directory(manifest_path);
    debug!(manifest_dir = ?manifest_dir, "resolved manifest directory");

    let fetcher = HttpFetcher::new().map_err(ConfigurationError::Fetcher)?;

    info!(name = %modpack.name, version = %modpack.version, target = %target, "modpack loaded");
    reporter.success("Parsing of the modpack file succeeded.");

    Ok(Self {
      modpack,
      manifest_dir,
      target,
      policy: ForcePolicy::new(options.force_build),
      options,
      reporter,
      fetcher: Arc::new(fetcher),
      fs: Arc::new(LocalFileSystem),
    })
  }

  /// Replace the resource fetcher.
  pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
    self.fetcher = fetcher;
    self
  }

  /// Replace the filesystem collaborator.
  pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
    self.fs = fs;
    self
  }

  pub fn target(&self) -> BuildTarget {
    self.target
  }

  pub fn manifest_dir(&self) -> &Path {
    &self.manifest_dir
  }

  /// Name of the build directory: `{name}-{version}-{target}-build`.
  pub fn build_dir_name(&self) -> String {
    format!(
      "{}-{}-{}-{}",
      self.modpack.name, self.modpack.version, self.target, BUILD_DIR_SUFFIX
    )
  }

  /// Full path of the build directory inside the output directory.
  pub fn build_dir(&self) -> PathBuf {
    self.options.output_dir.join(self.build_dir_name())
  }
}

fn manifest_directory(manifest_path: &Path) -> PathBuf {
  let parent = match manifest_path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
    _ => PathBuf::from("."),
  };
  dunce::canonicalize(&parent).unwrap_or(parent)
}
