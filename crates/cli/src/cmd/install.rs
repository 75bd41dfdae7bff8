//! Implementation of the `packsmith install` command.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use packsmith_lib::orchestrator::InstalledKind;
use packsmith_lib::{BuildOptions, InstallProfile, Orchestrator};

use crate::output::ConsoleReporter;

/// Execute the install command.
///
/// Copies the finished build into place using either the default or the
/// development installation rules of the manifest.
pub fn cmd_install(
  modpack: &Path,
  options: BuildOptions,
  profile: InstallProfile,
  reporter: Arc<ConsoleReporter>,
) -> Result<()> {
  let orchestrator = Orchestrator::new(modpack, options, reporter.clone())?;
  let report = orchestrator.install(profile)?;

  for resource in &report.installed {
    let kind = match resource.kind {
      InstalledKind::File => "file",
      InstalledKind::Tree => "directory",
    };
    reporter.stat(kind, &resource.destination.display().to_string());
  }

  Ok(())
}
