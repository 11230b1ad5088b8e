//! Version-string handling: validation, major.minor projection, detection
//!
//! Full versions ("0.6.0", "0.6.0-rc.1") are used for `version = "..."`
//! assignments in package manifests. Dependency specs and compatibility
//! tables carry only the major.minor projection ("0.6"), derived here so every
//! patch rule sees the same projection.

use crate::core::error::{ReleaseError, ReleaseResult, VersionError};
use crate::core::registry::{self, CrateInfo};
use semver::Version;
use std::path::Path;

/// Validate a semantic version string, returning the parsed version
pub fn validate(input: &str) -> ReleaseResult<Version> {
  Version::parse(input).map_err(|_| {
    ReleaseError::Version(VersionError::InvalidFormat {
      input: input.to_string(),
    })
  })
}

/// Major.minor projection of a full version string ("0.6.0-rc.1" -> "0.6")
pub fn minor_projection(version: &Version) -> String {
  format!("{}.{}", version.major, version.minor)
}

/// Read the version of a single crate from its Cargo.toml.
///
/// Returns None when the manifest is missing, unparsable, or the version is a
/// workspace reference rather than a literal string.
pub fn crate_version(root: &Path, info: &CrateInfo) -> Option<String> {
  let manifest = info.manifest_path(root);
  let content = std::fs::read_to_string(&manifest).ok()?;
  let doc: toml_edit::DocumentMut = content.parse().ok()?;
  doc
    .get("package")?
    .get("version")?
    .as_str()
    .map(|s| s.to_string())
}

/// Auto-detect the current workspace version from the anchor crate
pub fn detect_current(root: &Path) -> ReleaseResult<String> {
  let anchor = registry::find(registry::ANCHOR_CRATE).expect("anchor crate is registered");

  crate_version(root, anchor).ok_or_else(|| {
    ReleaseError::Version(VersionError::DetectFailed {
      manifest: anchor.manifest_path(root),
    })
  })
}
