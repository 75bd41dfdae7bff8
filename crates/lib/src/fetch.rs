//! Remote resource fetching.
//!
//! A fetch is a single blocking HTTP GET with a fixed set of headers. Only a
//! `200` status counts as success; every other status is reported back to the
//! caller, which decides whether the failure is fatal.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::HTTP_HEADERS;

/// Raw result of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
  pub status: u16,
  pub body: Vec<u8>,
}

impl FetchResponse {
  pub fn is_success(&self) -> bool {
    self.status == 200
  }
}

#[derive(Debug, Error)]
pub enum FetchError {
  /// The request could not be sent or the body could not be read.
  #[error("request to {url} failed: {message}")]
  Transport { url: String, message: String },

  #[error("failed to initialize HTTP client: {0}")]
  Client(String),
}

/// Performs a blocking GET for a resource URL.
pub trait Fetcher: Send + Sync {
  fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// [`Fetcher`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
  client: Client,
}

impl HttpFetcher {
  pub fn new() -> Result<Self, FetchError> {
    Self::with_timeout(Duration::from_secs(300))
  }

  pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
    let client = Client::builder()
      .default_headers(default_headers())
      .timeout(timeout)
      .build()
      .map_err(|e| FetchError::Client(e.to_string()))?;
    Ok(Self { client })
  }
}

fn default_headers() -> HeaderMap {
  let mut headers = HeaderMap::new();
  for (name, value) in HTTP_HEADERS {
    headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
  }
  headers
}

impl Fetcher for HttpFetcher {
  fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
    info!(url = %url, "fetching resource");

    let response = self.client.get(url).send().map_err(|e| FetchError::Transport {
      url: url.to_string(),
      message: e.to_string(),
    })?;

    let status = response.status().as_u16();
    let body = response.bytes().map_err(|e| FetchError::Transport {
      url: url.to_string(),
      message: e.to_string(),
    })?;

    debug!(url = %url, status, size = body.len(), "fetch complete");

    Ok(FetchResponse {
      status,
      body: body.to_vec(),
    })
  }
}
