//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use sha2::{Digest, Sha256};
use tempfile::TempDir;

pub const FABRIC_BYTES: &[u8] = b"fabric-loader";
pub const SODIUM_BYTES: &[u8] = b"sodium-mod";

pub fn sha256_hex(data: &[u8]) -> String {
  hex::encode(Sha256::digest(data))
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the manifest, config
/// sources and the output directory.
pub struct TestEnv {
  pub temp: TempDir,
  pub manifest_path: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("modpack.json");
    Self { temp, manifest_path }
  }

  /// Write a manifest with Fabric as the API and Sodium as the only mod,
  /// both served from `server_url`.
  pub fn with_pack(server_url: &str, sodium_checksum: &str, installation: &str) -> Self {
    let env = Self::new();
    let manifest = format!(
      r#"{{
        "name": "Skyfall",
        "version": "1.2.0",
        "api": {{
          "name": "Fabric",
          "checksum": "{fabric}",
          "resourceUrl": "{url}/fabric.jar",
          "sourceUrl": "https://fabricmc.net"
        }},
        "mods": [
          {{
            "name": "Sodium",
            "checksum": "{sodium}",
            "resourceUrl": "{url}/sodium.jar",
            "sourceUrl": "https://modrinth.com/mod/sodium",
            "includeClient": true,
            "includeServer": false,
            "configFiles": [
              {{ "sourcePath": "config/sodium-options.json", "destinationPath": "config/sodium-options.json" }}
            ]
          }}
        ]
        {installation}
      }}"#,
      fabric = sha256_hex(FABRIC_BYTES),
      sodium = sodium_checksum,
      url = server_url,
      installation = installation,
    );
    std::fs::write(&env.manifest_path, manifest).unwrap();
    env.write_file("config/sodium-options.json", r#"{ "quality": "fast" }"#);
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Output directory (isolated per test).
  pub fn output_path(&self) -> PathBuf {
    let p = self.temp.path().join("out");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  pub fn build_dir(&self, target: &str) -> PathBuf {
    self.output_path().join(format!("Skyfall-1.2.0-{}-build", target))
  }

  /// Get a pre-configured Command for the packsmith binary.
  pub fn packsmith_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("packsmith");
    cmd.current_dir(self.temp.path());
    cmd.env("PACKSMITH_OUTPUT_DIR", self.output_path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

/// File names directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = std::fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}
