//! User-facing message sink.
//!
//! The orchestrator narrates its progress through a [`Reporter`]. This is
//! separate from `tracing` diagnostics: reporters carry the messages a user
//! expects to see on every run, while tracing carries structured detail for
//! debugging.

use std::error::Error;

use tracing::{debug, error, info};

/// Accepts leveled messages.
///
/// `verbose` messages are diagnostic detail; sinks decide whether to surface
/// them. All other levels are always surfaced.
pub trait Reporter: Send + Sync {
  fn success(&self, message: &str);
  fn failure(&self, message: &str);
  fn info(&self, message: &str);
  fn verbose(&self, message: &str);

  /// Report an error as a failure message, using its display form.
  fn error(&self, err: &dyn Error) {
    self.failure(&err.to_string());
  }
}

/// Forwards every message to a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
  fn success(&self, message: &str) {
    info!(status = "success", "{}", message.trim());
  }

  fn failure(&self, message: &str) {
    error!("{}", message.trim());
  }

  fn info(&self, message: &str) {
    info!("{}", message.trim());
  }

  fn verbose(&self, message: &str) {
    debug!("{}", message.trim());
  }
}
