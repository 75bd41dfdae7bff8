//! Shared constants.

/// Extension every downloaded artifact is expected to carry.
pub const ARTIFACT_EXTENSION: &str = "jar";

/// Name of the directory inside a build that receives mod artifacts.
pub const MODS_DIR: &str = "mods";

/// Suffix appended to `{name}-{version}-{target}` to form the build directory name.
pub const BUILD_DIR_SUFFIX: &str = "build";

pub const ARCHIVE_EXTENSION: &str = "zip";

pub const LOCK_EXTENSION: &str = "lock";

/// Fixed request headers sent with every resource fetch. Names are lowercase.
pub const HTTP_HEADERS: [(&str, &str); 3] = [
  ("accept-encoding", "gzip, deflate, br"),
  ("connection", "keep-alive"),
  (
    "user-agent",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36",
  ),
];

/// Length of a hex-encoded SHA-256 digest.
pub const CHECKSUM_HEX_LEN: usize = 64;
