//! Installing a finished build.

use packsmith_lib::orchestrator::InstallError;
use packsmith_lib::{BuildOptions, InstallProfile};

use super::common::{Pack, tree};

fn manifest(destination: &str) -> String {
  format!(
    r#"{{
      "name": "Ironworks",
      "version": "3.0",
      "api": {{ "name": "Forge", "checksum": "", "resourceUrl": "", "sourceUrl": "" }},
      "mods": [],
      "installation": [
        {{ "sourcePath": "Ironworks-3.0-server-build", "destinationPath": "{destination}" }}
      ]
    }}"#,
    destination = destination.replace('\\', "/"),
  )
}

#[test]
fn tree_is_copied_byte_for_byte() {
  let pack = Pack::new(&manifest("server"));
  let build = "out/Ironworks-3.0-server-build";
  pack.write(&format!("{}/forge-3-0.jar", build), &[0, 159, 146, 150]);
  pack.write(&format!("{}/mods/create.jar", build), b"create");
  pack.write(&format!("{}/config/deep/nested.toml", build), b"a = 1");

  let (orchestrator, _) = pack.orchestrator(BuildOptions::new("server"));
  let report = orchestrator.install(InstallProfile::Default).unwrap();

  let installed = pack.out.join("server");
  assert_eq!(report.installed.len(), 1);
  assert_eq!(tree(&installed), tree(&pack.out.join("Ironworks-3.0-server-build")));
  assert_eq!(
    std::fs::read(installed.join("forge-3-0.jar")).unwrap(),
    vec![0u8, 159, 146, 150]
  );
}

#[test]
fn absolute_destination_is_used_verbatim() {
  let elsewhere = tempfile::TempDir::new().unwrap();
  let destination = elsewhere.path().join("srv");
  let pack = Pack::new(&manifest(&destination.to_string_lossy()));
  pack.write("out/Ironworks-3.0-server-build/mods/create.jar", b"create");

  let (orchestrator, _) = pack.orchestrator(BuildOptions::new("server"));
  orchestrator.install(InstallProfile::Default).unwrap();

  assert_eq!(std::fs::read(destination.join("mods/create.jar")).unwrap(), b"create");
}

#[test]
fn development_rules_missing() {
  let pack = Pack::new(&manifest("server"));

  let (orchestrator, reporter) = pack.orchestrator(BuildOptions::new("server"));
  let err = orchestrator.install(InstallProfile::Development).unwrap_err();

  assert!(matches!(err, InstallError::RulesMissing(InstallProfile::Development)));
  assert!(reporter.any("development installation rules are not specified"));
}
