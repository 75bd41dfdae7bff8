//! The build state machine.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use super::Orchestrator;
use super::types::{BuildError, BuildReport, RunContext, SkipReason, SkippedMod};
use crate::build_lock::BuildLock;
use crate::fetch::FetchResponse;
use crate::manifest::Mod;
use crate::util::hash::{validate_checksum, verify_checksum};
use crate::util::naming::resource_file_name;

impl Orchestrator {
  /// Build the modpack for the active target.
  ///
  /// Steps, in order:
  /// 1. Lock the build directory and make sure it is fresh
  /// 2. Fetch, verify and write the modding API artifact
  /// 3. Create `mods/`
  /// 4. For each mod of the target: fetch, verify, write, overlay config files
  /// 5. Optionally zip the build directory
  ///
  /// A failed build leaves whatever was written in place.
  pub fn build(&self) -> Result<BuildReport, BuildError> {
    let mut ctx = RunContext::new(self.target, &self.options.output_dir, &self.build_dir_name());
    info!(build_dir = ?ctx.build_dir, target = %ctx.target, "starting build");

    let result = self.run_build(&mut ctx);
    if let Err(err) = &result {
      debug!(error = %err, class = ?err.class(), "build aborted");
      self.reporter.verbose(&err.to_string());
    }
    result?;

    self.reporter.success(&format!(
      "Modpack build process finished: {}",
      ctx.build_dir.display()
    ));
    Ok(ctx.report)
  }

  fn run_build(&self, ctx: &mut RunContext) -> Result<(), BuildError> {
    self
      .fs
      .create_directory_all(&self.options.output_dir)
      .map_err(|source| BuildError::CreateDirectory {
        path: self.options.output_dir.clone(),
        source,
      })?;

    // Held until the build returns, whatever the outcome.
    let lock = BuildLock::acquire(&ctx.build_dir, "build")?;
    debug!(lock = ?lock.lock_path(), "holding build lock");

    self.prepare_build_dir(ctx)?;
    self.process_api(ctx)?;

    self.reporter.verbose("Creating the mods directory.");
    self.create_dir(&ctx.mods_dir)?;

    for m in &self.modpack.mods {
      self.process_mod(ctx, m)?;
    }

    if self.options.pack_to_zip {
      self.reporter.info("Packing the build into an archive.");
      self
        .fs
        .archive_directory(&ctx.build_dir, &ctx.archive_path)
        .map_err(|source| BuildError::Archive {
          path: ctx.archive_path.clone(),
          source,
        })?;
      info!(archive = ?ctx.archive_path, "build archived");
      ctx.report.archive = Some(ctx.archive_path.clone());
    }

    Ok(())
  }

  fn prepare_build_dir(&self, ctx: &RunContext) -> Result<(), BuildError> {
    self.reporter.info("Preparing the build directory.");

    if self.fs.exists(&ctx.build_dir) {
      self.tolerate(BuildError::DirectoryExists(ctx.build_dir.clone()))?;
      self.reporter.verbose("Removing the previous build directory.");
      self
        .fs
        .remove_tree(&ctx.build_dir)
        .map_err(|source| BuildError::RemoveDirectory {
          path: ctx.build_dir.clone(),
          source,
        })?;
    }

    self.create_dir(&ctx.build_dir)?;
    self.reporter.verbose("Build directory created.");
    Ok(())
  }

  fn process_api(&self, ctx: &mut RunContext) -> Result<(), BuildError> {
    let api = &self.modpack.api;
    self.reporter.info(&format!("Preparing modding API resource: {}", api.name));

    let Some(bytes) = self.fetch_verified(&api.name, &api.resource_url, &api.checksum)? else {
      self.reporter.info(&format!("Modding API resource {} skipped.", api.name));
      return Ok(());
    };

    let file_name = resource_file_name(&api.name, &self.modpack.version, &api.resource_url);
    let path = ctx.build_dir.join(file_name);
    self.write_artifact(ctx, &path, &bytes)?;
    ctx.report.api_artifact = Some(path);
    Ok(())
  }

  fn process_mod(&self, ctx: &mut RunContext, m: &Mod) -> Result<(), BuildError> {
    if !ctx.target.includes(m) {
      self.reporter.verbose(&format!(
        "Mod {} skipped: not included in {} builds.",
        m.name, ctx.target
      ));
      ctx.report.skipped_mods.push(SkippedMod {
        name: m.name.clone(),
        reason: SkipReason::ExcludedFromTarget(ctx.target),
      });
      return Ok(());
    }

    self.reporter.info(&format!("Preparing resource: {}", m.name));

    let Some(bytes) = self.fetch_verified(&m.name, &m.resource_url, &m.checksum)? else {
      ctx.report.skipped_mods.push(SkippedMod {
        name: m.name.clone(),
        reason: SkipReason::Unavailable(m.resource_url.clone()),
      });
      return Ok(());
    };

    let file_name = resource_file_name(&m.name, &self.modpack.version, &m.resource_url);
    let path = ctx.mods_dir.join(file_name);
    self.write_artifact(ctx, &path, &bytes)?;
    ctx.report.mod_artifacts.push(path);

    for config in &m.config_files {
      let src = self.manifest_dir.join(&config.source_path);
      if !self.fs.exists(&src) {
        self.tolerate(BuildError::ConfigSourceMissing {
          name: m.name.clone(),
          path: src.clone(),
        })?;
        ctx.report.skipped_config_files.push(src);
        continue;
      }

      let dst = build_relative(&ctx.build_dir, &config.destination_path)?;
      if let Some(parent) = dst.parent() {
        self.fs.create_directory_all(parent).map_err(|source| BuildError::CreateDirectory {
          path: parent.to_path_buf(),
          source,
        })?;
      }

      self.reporter.verbose(&format!("Copying config file {}.", config.source_path));
      self.fs.copy_file(&src, &dst).map_err(|source| BuildError::CopyConfig {
        src: src.clone(),
        dst: dst.clone(),
        source,
      })?;
      ctx.report.config_files.push(dst);
    }

    Ok(())
  }

  /// Fetch a resource and verify it against its declared checksum.
  ///
  /// Returns `Ok(None)` when the resource is unavailable and the policy
  /// tolerates it.
  fn fetch_verified(&self, name: &str, url: &str, checksum: &str) -> Result<Option<Vec<u8>>, BuildError> {
    if !self.options.skip_checksum {
      validate_checksum(checksum).map_err(|source| BuildError::Checksum {
        name: name.to_string(),
        source,
      })?;
    }

    self.reporter.verbose("Starting to download remote resource.");
    let response = match self.fetch(name, url) {
      Ok(response) => response,
      Err(err) => {
        self.tolerate(err)?;
        return Ok(None);
      }
    };
    self.reporter.verbose("Remote resource downloaded successfully.");

    if !self.options.skip_checksum {
      verify_checksum(&response.body, checksum).map_err(|source| BuildError::Checksum {
        name: name.to_string(),
        source,
      })?;
      self.reporter.verbose("Checksum verified.");
    }

    Ok(Some(response.body))
  }

  fn fetch(&self, name: &str, url: &str) -> Result<FetchResponse, BuildError> {
    let response = self.fetcher.fetch(url).map_err(|source| BuildError::Fetch {
      name: name.to_string(),
      source,
    })?;

    if !response.is_success() {
      return Err(BuildError::ResourceUnavailable {
        name: name.to_string(),
        url: url.to_string(),
        status: response.status,
      });
    }

    Ok(response)
  }

  fn write_artifact(&self, ctx: &mut RunContext, path: &Path, bytes: &[u8]) -> Result<(), BuildError> {
    self.reporter.verbose(&format!("Creating local file {}.", path.display()));
    self.fs.write_file(path, bytes).map_err(|source| BuildError::WriteArtifact {
      path: path.to_path_buf(),
      source,
    })?;
    ctx.report.bytes_written += bytes.len() as u64;
    debug!(path = ?path, size = bytes.len(), "artifact written");
    Ok(())
  }

  fn create_dir(&self, path: &Path) -> Result<(), BuildError> {
    self.fs.create_directory(path).map_err(|source| BuildError::CreateDirectory {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Apply the force policy to a failure: tolerated failures are logged and
  /// swallowed, everything else is returned.
  fn tolerate(&self, err: BuildError) -> Result<(), BuildError> {
    if !self.policy.tolerates(err.class()) {
      return Err(err);
    }
    warn!(error = %err, "tolerating failure under force build");
    self.reporter.info(&format!("{} Continuing because of force build.", err));
    Ok(())
  }
}

/// Resolve a config destination inside the build directory.
///
/// Absolute paths and parent-directory components are rejected so overlays
/// can't write outside the build tree.
fn build_relative(build_dir: &Path, destination: &str) -> Result<PathBuf, BuildError> {
  let relative = Path::new(destination);
  let escapes = relative
    .components()
    .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
  if escapes || relative.as_os_str().is_empty() {
    return Err(BuildError::ConfigDestinationOutsideBuild(relative.to_path_buf()));
  }
  Ok(build_dir.join(relative))
}
