//! Copying a finished build into place.

use std::path::{Path, PathBuf};

use tracing::info;

use super::Orchestrator;
use super::types::{InstallError, InstallReport, InstalledKind, InstalledResource};
use crate::fs::EntryKind;
use crate::manifest::InstallProfile;

impl Orchestrator {
  /// Execute the selected installation rule set in manifest order.
  ///
  /// Relative rule paths resolve against the output directory. The first
  /// failing rule aborts the remaining ones.
  pub fn install(&self, profile: InstallProfile) -> Result<InstallReport, InstallError> {
    let result = self.run_install(profile);
    if let Err(err) = &result {
      self.reporter.verbose(&err.to_string());
    }
    let report = result?;

    self.reporter.success(&format!(
      "Modpack {} finished: {} resource(s) copied.",
      profile,
      report.installed.len()
    ));
    Ok(report)
  }

  fn run_install(&self, profile: InstallProfile) -> Result<InstallReport, InstallError> {
    let rules = self
      .modpack
      .installation_rules(profile)
      .ok_or(InstallError::RulesMissing(profile))?;

    info!(profile = %profile, rules = rules.len(), "starting install");
    let mut report = InstallReport::default();

    for rule in rules {
      let src = self.resolve_install_path(&rule.source_path);
      let dst = self.resolve_install_path(&rule.destination_path);
      self.reporter.info(&format!("Installing {}", rule.source_path));

      let kind = match self.fs.entry_kind(&src) {
        EntryKind::Missing => return Err(InstallError::SourceMissing(src)),
        EntryKind::File => {
          self.fs.copy_file(&src, &dst).map_err(|source| InstallError::CopyFile {
            src: src.clone(),
            dst: dst.clone(),
            source,
          })?;
          InstalledKind::File
        }
        EntryKind::Directory => {
          self.fs.copy_tree(&src, &dst).map_err(|source| InstallError::CopyTree {
            src: src.clone(),
            dst: dst.clone(),
            source,
          })?;
          InstalledKind::Tree
        }
        EntryKind::Other => return Err(InstallError::UnknownSourceType(src)),
      };

      self.reporter.verbose(&format!("Copied {} to {}.", src.display(), dst.display()));
      report.installed.push(InstalledResource {
        source: src,
        destination: dst,
        kind,
      });
    }

    Ok(report)
  }

  fn resolve_install_path(&self, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.options.output_dir.join(path)
    }
  }
}
