//! packsmith-lib: build and install modpacks from a declarative manifest.
//!
//! The crate is organized around the [`Orchestrator`]:
//! - `manifest`: the parsed, immutable modpack description
//! - `fetch`: blocking HTTP retrieval of artifacts
//! - `util::hash`: SHA-256 integrity checks
//! - `fs`: the filesystem primitives builds and installs are made of
//! - `orchestrator`: the build and install state machines

pub mod build_lock;
pub mod consts;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod manifest;
pub mod orchestrator;
pub mod report;
pub mod target;
pub mod util;

pub use error::{Error, Result};
pub use manifest::{InstallProfile, Modpack};
pub use orchestrator::{BuildOptions, BuildReport, InstallReport, Orchestrator};
pub use report::{Reporter, TracingReporter};
pub use target::BuildTarget;
