//! Test doubles for the orchestrator's collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::fetch::{FetchError, FetchResponse, Fetcher};
use crate::report::Reporter;
use crate::util::hash::hash_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Success,
  Failure,
  Info,
  Verbose,
}

/// Reporter that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
  messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingReporter {
  pub fn messages(&self) -> Vec<(Level, String)> {
    self.messages.lock().unwrap().clone()
  }

  pub fn contains(&self, level: Level, needle: &str) -> bool {
    self
      .messages()
      .iter()
      .any(|(l, m)| *l == level && m.contains(needle))
  }

  fn push(&self, level: Level, message: &str) {
    self.messages.lock().unwrap().push((level, message.to_string()));
  }
}

impl Reporter for RecordingReporter {
  fn success(&self, message: &str) {
    self.push(Level::Success, message);
  }

  fn failure(&self, message: &str) {
    self.push(Level::Failure, message);
  }

  fn info(&self, message: &str) {
    self.push(Level::Info, message);
  }

  fn verbose(&self, message: &str) {
    self.push(Level::Verbose, message);
  }
}

/// Fetcher serving canned responses and recording every requested URL.
///
/// Unknown URLs answer with a 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
  responses: HashMap<String, FetchResponse>,
  calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn serve(mut self, url: &str, body: &[u8]) -> Self {
    self.responses.insert(
      url.to_string(),
      FetchResponse {
        status: 200,
        body: body.to_vec(),
      },
    );
    self
  }

  pub fn fail(mut self, url: &str, status: u16) -> Self {
    self.responses.insert(url.to_string(), FetchResponse { status, body: Vec::new() });
    self
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }
}

impl Fetcher for StaticFetcher {
  fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
    self.calls.lock().unwrap().push(url.to_string());
    Ok(self.responses.get(url).cloned().unwrap_or(FetchResponse {
      status: 404,
      body: Vec::new(),
    }))
  }
}

/// Hex SHA-256 of `data`, for writing manifests in tests.
pub fn sha256_hex(data: &[u8]) -> String {
  hash_bytes(data).0
}
