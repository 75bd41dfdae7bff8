use std::fmt;
use std::str::FromStr;

use crate::manifest::Mod;

/// The side a modpack is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTarget {
  Client,
  Server,
}

impl BuildTarget {
  /// Returns the lowercase identifier used in build directory names
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Client => "client",
      Self::Server => "server",
    }
  }

  /// Whether the given mod belongs to builds of this target
  pub fn includes(&self, m: &Mod) -> bool {
    match self {
      Self::Client => m.include_client,
      Self::Server => m.include_server,
    }
  }
}

impl fmt::Display for BuildTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown build target '{0}', expected 'client' or 'server'")]
pub struct UnknownTarget(pub String);

impl FromStr for BuildTarget {
  type Err = UnknownTarget;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "client" => Ok(Self::Client),
      "server" => Ok(Self::Server),
      _ => Err(UnknownTarget(s.to_string())),
    }
  }
}
