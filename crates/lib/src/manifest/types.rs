//! Manifest types for packsmith.
//!
//! The manifest is the declarative description of a modpack: which modding API
//! it is built on, which mods it contains, and how a finished build is copied
//! into an installation. It's deserialized once from JSON and never mutated.
//!
//! # Example
//!
//! ```json
//! {
//!   "name": "Skyfall",
//!   "version": "1.2.0",
//!   "api": {
//!     "name": "Fabric",
//!     "checksum": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
//!     "resourceUrl": "https://example.com/fabric-installer.jar",
//!     "sourceUrl": "https://fabricmc.net"
//!   },
//!   "mods": [],
//!   "installation": [{ "sourcePath": "Skyfall-1.2.0-client-build/mods", "destinationPath": "/games/mc/mods" }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// A configuration file overlaid into the build after its mod is fetched.
///
/// `source_path` is relative to the manifest's directory, `destination_path`
/// is relative to the build directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModConfigFile {
  pub source_path: String,
  pub destination_path: String,
}

/// A single mod and its build instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mod {
  pub name: String,
  /// Hex-encoded SHA-256 of the artifact.
  pub checksum: String,
  pub resource_url: String,
  pub source_url: String,
  pub include_client: bool,
  pub include_server: bool,
  #[serde(default)]
  pub config_files: Vec<ModConfigFile>,
}

/// The modding API artifact every build carries at its root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModdingApi {
  pub name: String,
  pub checksum: String,
  pub resource_url: String,
  pub source_url: String,
}

/// A post-build copy step. The source may be a file or a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationResource {
  pub source_path: String,
  pub destination_path: String,
}

/// The root of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modpack {
  pub name: String,
  pub version: String,
  pub api: ModdingApi,
  pub mods: Vec<Mod>,
  #[serde(default)]
  pub installation: Option<Vec<InstallationResource>>,
  #[serde(default)]
  pub dev_installation: Option<Vec<InstallationResource>>,
}
