//! On-disk names for downloaded artifacts.

use reqwest::Url;

use crate::consts::ARTIFACT_EXTENSION;

/// Derive the file name an artifact is written under.
///
/// If the final path segment of `resource_url` already carries the artifact
/// extension (compared case-insensitively) it is used unchanged. Otherwise a
/// name is synthesized as `{name}-{version}.jar`, lowercased, with the dots
/// of the version replaced by hyphens.
pub fn resource_file_name(name: &str, version: &str, resource_url: &str) -> String {
  if let Some(segment) = last_path_segment(resource_url)
    && has_artifact_extension(&segment)
  {
    return segment;
  }

  let escaped_version = version.to_lowercase().replace('.', "-");
  format!("{}-{}.{}", name.to_lowercase(), escaped_version, ARTIFACT_EXTENSION)
}

fn last_path_segment(resource_url: &str) -> Option<String> {
  let url = Url::parse(resource_url).ok()?;
  let segment = url.path_segments()?.last()?;
  if segment.is_empty() {
    return None;
  }
  Some(segment.to_string())
}

fn has_artifact_extension(segment: &str) -> bool {
  match segment.rsplit_once('.') {
    Some((stem, ext)) => !stem.is_empty() && ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION),
    None => false,
  }
}
