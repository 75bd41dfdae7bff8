//! Build command integration tests.

use predicates::prelude::*;

use super::common::{FABRIC_BYTES, SODIUM_BYTES, TestEnv, file_names, sha256_hex};

fn serve(server: &mut mockito::ServerGuard, path: &str, body: &[u8]) -> mockito::Mock {
  server.mock("GET", path).with_status(200).with_body(body).create()
}

#[test]
fn client_build_writes_api_mod_and_config() {
  let mut server = mockito::Server::new();
  let fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let sodium = serve(&mut server, "/sodium.jar", SODIUM_BYTES);
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "client"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Modpack build process finished"))
    .stdout(predicate::str::contains("Artifacts: 2"));

  fabric.assert();
  sodium.assert();
  let build = env.build_dir("client");
  assert_eq!(file_names(&build.join("mods")), vec!["sodium.jar"]);
  assert_eq!(std::fs::read(build.join("mods/sodium.jar")).unwrap(), SODIUM_BYTES);
  assert_eq!(std::fs::read(build.join("fabric.jar")).unwrap(), FABRIC_BYTES);
  assert!(build.join("config/sodium-options.json").is_file());
}

#[test]
fn server_build_skips_client_only_mods() {
  let mut server = mockito::Server::new();
  let _fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let sodium = server.mock("GET", "/sodium.jar").expect(0).create();
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "server"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Mods skipped: 1"));

  sodium.assert();
  assert!(file_names(&env.build_dir("server").join("mods")).is_empty());
}

#[test]
fn checksum_mismatch_fails_and_leaves_partial_build() {
  let mut server = mockito::Server::new();
  let _fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let _sodium = serve(&mut server, "/sodium.jar", b"tampered");
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "client"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("failed verification"));

  let build = env.build_dir("client");
  assert!(build.is_dir());
  assert!(file_names(&build.join("mods")).is_empty());
}

#[test]
fn checksum_mismatch_is_fatal_even_with_force() {
  let mut server = mockito::Server::new();
  let _fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let _sodium = serve(&mut server, "/sodium.jar", b"tampered");
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "client", "--force"])
    .assert()
    .code(1);
}

#[test]
fn skip_checksum_accepts_mismatching_content() {
  let mut server = mockito::Server::new();
  let _fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let _sodium = serve(&mut server, "/sodium.jar", b"tampered");
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "client", "--skip-checksum"])
    .assert()
    .success();

  let jar = env.build_dir("client").join("mods/sodium.jar");
  assert_eq!(std::fs::read(jar).unwrap(), b"tampered");
}

#[test]
fn existing_build_dir_fails_before_fetching() {
  let mut server = mockito::Server::new();
  let fabric = server.mock("GET", "/fabric.jar").expect(0).create();
  let sodium = server.mock("GET", "/sodium.jar").expect(0).create();
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");
  std::fs::create_dir_all(env.build_dir("client")).unwrap();

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "client"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("already exists"));

  fabric.assert();
  sodium.assert();
}

#[test]
fn force_skips_unavailable_mod() {
  let mut server = mockito::Server::new();
  let _fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let _sodium = server.mock("GET", "/sodium.jar").with_status(404).create();
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "client", "-f"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Continuing because of force build."))
    .stdout(predicate::str::contains("Artifacts: 1"));

  assert!(file_names(&env.build_dir("client").join("mods")).is_empty());
}

#[test]
fn unavailable_mod_fails_without_force() {
  let mut server = mockito::Server::new();
  let _fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let _sodium = server.mock("GET", "/sodium.jar").with_status(503).create();
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "client"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("returned status 503"));
}

#[test]
fn zip_flag_writes_archive() {
  let mut server = mockito::Server::new();
  let _fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let _sodium = serve(&mut server, "/sodium.jar", SODIUM_BYTES);
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["build", "-m", "modpack.json", "-t", "client", "--zip"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Archive:"));

  assert!(env.output_path().join("Skyfall-1.2.0-client-build.zip").is_file());
}

#[test]
fn log_file_receives_messages() {
  let mut server = mockito::Server::new();
  let _fabric = serve(&mut server, "/fabric.jar", FABRIC_BYTES);
  let _sodium = serve(&mut server, "/sodium.jar", SODIUM_BYTES);
  let env = TestEnv::with_pack(&server.url(), &sha256_hex(SODIUM_BYTES), "");

  env
    .packsmith_cmd()
    .args(["--verbose", "--log-file", "build.log"])
    .args(["build", "-m", "modpack.json", "-t", "client"])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let log = std::fs::read_to_string(env.temp.path().join("build.log")).unwrap();
  assert!(log.contains("✓ Parsing of the modpack file succeeded."));
  assert!(log.contains("• Checksum verified."));
}
