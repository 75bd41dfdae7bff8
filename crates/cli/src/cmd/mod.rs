mod build;
mod install;

pub use build::{BuildArgs, cmd_build};
pub use install::cmd_install;
