mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use packsmith_lib::{BuildOptions, InstallProfile, Reporter};

use cmd::{BuildArgs, cmd_build, cmd_install};
use output::ConsoleReporter;

/// packsmith - Build and install modpacks from a JSON manifest
#[derive(Parser)]
#[command(name = "packsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Report every step, not only milestones
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Write messages to this file instead of stdout
  #[arg(long, global = true, value_name = "FILE")]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

/// Arguments shared by every command.
#[derive(Args)]
struct ModpackArgs {
  /// Path to the modpack manifest
  #[arg(short, long, value_name = "FILE")]
  modpack: PathBuf,

  /// Build target: client or server
  #[arg(short, long)]
  target: String,

  /// Directory holding build directories and archives
  #[arg(short, long, env = "PACKSMITH_OUTPUT_DIR", default_value = ".")]
  output_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
  /// Fetch, verify and lay out every artifact of the modpack
  Build {
    #[command(flatten)]
    args: ModpackArgs,

    /// Replace an existing build and skip unavailable resources
    #[arg(short, long)]
    force: bool,

    /// Do not verify artifact checksums
    #[arg(long)]
    skip_checksum: bool,

    /// Pack the build directory into a zip archive
    #[arg(short, long)]
    zip: bool,
  },

  /// Copy a finished build into place
  Install {
    #[command(flatten)]
    args: ModpackArgs,

    /// Use the development installation rules
    #[arg(long)]
    dev: bool,
  },
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let cli = Cli::parse();

  let reporter = match &cli.log_file {
    Some(path) => match ConsoleReporter::file(path, cli.verbose) {
      Ok(reporter) => reporter,
      Err(err) => {
        eprintln!("Cannot open log file {}: {}", path.display(), err);
        return ExitCode::from(2);
      }
    },
    None => ConsoleReporter::stdout(cli.verbose),
  };
  let reporter = Arc::new(reporter);

  let result = match cli.command {
    Commands::Build {
      args,
      force,
      skip_checksum,
      zip,
    } => {
      let options = BuildOptions::new(args.target)
        .force_build(force)
        .skip_checksum(skip_checksum)
        .pack_to_zip(zip)
        .output_dir(args.output_dir);
      cmd_build(
        BuildArgs {
          modpack: &args.modpack,
          options,
        },
        reporter.clone(),
      )
    }
    Commands::Install { args, dev } => {
      let profile = if dev {
        InstallProfile::Development
      } else {
        InstallProfile::Default
      };
      let options = BuildOptions::new(args.target).output_dir(args.output_dir);
      cmd_install(&args.modpack, options, profile, reporter.clone())
    }
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      tracing::debug!(error = ?err, "command failed");
      reporter.error(&*err);
      ExitCode::from(1)
    }
  }
}
