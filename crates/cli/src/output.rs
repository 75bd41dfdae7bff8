//! CLI output formatting utilities.
//!
//! Provides the terminal message sink plus human-readable byte and duration
//! formatting for build summaries.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use owo_colors::{OwoColorize, Stream};
use packsmith_lib::Reporter;

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
}

/// Human-readable size, using binary units up to megabytes.
pub fn format_bytes(bytes: u64) -> String {
  const UNITS: [&str; 2] = ["KB", "MB"];

  if bytes < 1024 {
    return format!("{} B", bytes);
  }
  let mut value = bytes as f64 / 1024.0;
  let mut unit = 0;
  while value >= 1024.0 && unit + 1 < UNITS.len() {
    value /= 1024.0;
    unit += 1;
  }
  format!("{:.1} {}", value, UNITS[unit])
}

/// Human-readable elapsed time of a build.
pub fn format_duration(duration: Duration) -> String {
  match duration.as_secs() {
    0 => format!("{}ms", duration.as_millis()),
    1..60 => format!("{:.2}s", duration.as_secs_f64()),
    secs => format!("{}m {}s", secs / 60, secs % 60),
  }
}

#[derive(Debug, Clone, Copy)]
enum Level {
  Success,
  Failure,
  Info,
}

/// Message sink writing one line per message to stdout or a log file.
///
/// Colors are only used on stdout, and only when the terminal supports them.
pub struct ConsoleReporter {
  writer: Mutex<Box<dyn Write + Send>>,
  color: bool,
  verbose: bool,
}

impl ConsoleReporter {
  pub fn stdout(verbose: bool) -> Self {
    Self {
      writer: Mutex::new(Box::new(io::stdout())),
      color: true,
      verbose,
    }
  }

  /// Write messages to `path`, truncating it.
  pub fn file(path: &Path, verbose: bool) -> io::Result<Self> {
    let file = File::create(path)?;
    Ok(Self {
      writer: Mutex::new(Box::new(BufWriter::new(file))),
      color: false,
      verbose,
    })
  }

  /// Print an indented `label: value` line.
  pub fn stat(&self, label: &str, value: &str) {
    let label = if self.color {
      label.if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string()
    } else {
      label.to_string()
    };
    self.write_line(&format!("  {}: {}", label, value));
  }

  fn emit(&self, level: Level, message: &str) {
    let symbol = match level {
      Level::Success => symbols::SUCCESS,
      Level::Failure => symbols::ERROR,
      Level::Info => symbols::INFO,
    };
    let symbol = if self.color {
      match level {
        Level::Success => symbol.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
        Level::Failure => symbol.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
        Level::Info => symbol.if_supports_color(Stream::Stdout, |s| s.blue()).to_string(),
      }
    } else {
      symbol.to_string()
    };
    self.write_line(&format!("{} {}", symbol, message.trim()));
  }

  fn write_line(&self, line: &str) {
    if let Ok(mut writer) = self.writer.lock() {
      let _ = writeln!(writer, "{}", line);
      let _ = writer.flush();
    }
  }
}

impl Reporter for ConsoleReporter {
  fn success(&self, message: &str) {
    self.emit(Level::Success, message);
  }

  fn failure(&self, message: &str) {
    self.emit(Level::Failure, message);
  }

  fn info(&self, message: &str) {
    self.emit(Level::Info, message);
  }

  fn verbose(&self, message: &str) {
    if self.verbose {
      self.emit(Level::Info, message);
    }
  }
}
