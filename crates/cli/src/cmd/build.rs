//! Implementation of the `packsmith build` command.
//!
//! Loads the manifest, builds the modpack for the requested target and prints
//! a summary of what ended up in the build directory.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use packsmith_lib::{BuildOptions, Orchestrator};

use crate::output::{ConsoleReporter, format_bytes, format_duration};

pub struct BuildArgs<'a> {
  pub modpack: &'a Path,
  pub options: BuildOptions,
}

/// Execute the build command.
pub fn cmd_build(args: BuildArgs<'_>, reporter: Arc<ConsoleReporter>) -> Result<()> {
  let start = Instant::now();

  let orchestrator = Orchestrator::new(args.modpack, args.options, reporter.clone())?;
  let report = orchestrator.build()?;

  reporter.stat("Build directory", &report.build_dir.display().to_string());
  reporter.stat("Artifacts", &report.artifact_count().to_string());
  reporter.stat("Mods skipped", &report.skipped_mods.len().to_string());
  reporter.stat("Config files", &report.config_files.len().to_string());
  reporter.stat("Size", &format_bytes(report.bytes_written));
  if let Some(archive) = &report.archive {
    reporter.stat("Archive", &archive.display().to_string());
  }
  reporter.stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
