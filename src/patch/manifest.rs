//! Patch rules for Cargo.toml manifests
//!
//! Two syntactic contexts carry version numbers:
//!
//! 1. The package's own `version = "0.4.0"` assignment (full version).
//! 2. Inline-table dependency specs on sibling crates, which use the
//!    major.minor projection: `dear-imgui-sys = { path = "...", version = "0.4" }`.
//!
//! Independently versioned dependencies (build-support) are not named
//! `dear-*` with a workspace version, so the dependency rule cannot reach
//! them.

use super::PatchRule;
use crate::core::error::ReleaseResult;
use crate::core::version::minor_projection;
use semver::Version;

/// Build the manifest rule set for an old -> new version bump
pub fn rules(old: &Version, new: &Version) -> ReleaseResult<Vec<PatchRule>> {
  let old_full = old.to_string();
  let new_full = new.to_string();
  let old_minor = minor_projection(old);
  let new_minor = minor_projection(new);

  Ok(vec![
    // version = "0.4.0"
    PatchRule::new(
      &format!(r#"(?m)^(\s*version\s*=\s*["']){}(["'])"#, regex::escape(&old_full)),
      format!("${{1}}{}${{2}}", new_full),
      format!("Updated package version: {} -> {}", old_full, new_full),
    )?,
    // dear-imgui-sys = { path = "...", version = "0.4" }
    PatchRule::new(
      &format!(
        r#"(dear-[a-z0-9-]+\s*=\s*\{{[^}}]*version\s*=\s*["']){}(["'][^}}]*\}})"#,
        regex::escape(&old_minor)
      ),
      format!("${{1}}{}${{2}}", new_minor),
      format!("Updated {{n}} dependency version(s): {} -> {}", old_minor, new_minor),
    )?,
  ])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::version::validate;
  use crate::patch::apply;

  fn bump(input: &str, old: &str, new: &str) -> crate::patch::PatchOutcome {
    let rules = rules(&validate(old).unwrap(), &validate(new).unwrap()).unwrap();
    apply(input, &rules)
  }

  #[test]
  fn test_dependency_spec_projects_to_major_minor() {
    let input = "dear-imgui-sys = { path = \"dear-imgui-sys\", version = \"0.4\" }\n";
    let outcome = bump(input, "0.4.0", "0.6.0");

    assert!(outcome.changed);
    assert_eq!(
      outcome.content,
      "dear-imgui-sys = { path = \"dear-imgui-sys\", version = \"0.6\" }\n"
    );
  }

  #[test]
  fn test_dependency_spec_other_fields_untouched() {
    let input =
      "dear-implot-sys = { path = \"../dear-implot-sys\", version = \"0.4\", default-features = false }\n";
    let outcome = bump(input, "0.4.0", "0.6.0");

    assert!(outcome.changed);
    assert!(outcome.content.contains("version = \"0.6\""));
    assert!(outcome.content.contains("default-features = false"));
    assert!(outcome.content.contains("path = \"../dear-implot-sys\""));
  }

  #[test]
  fn test_non_workspace_dependencies_are_ignored() {
    let input = "serde = { version = \"1.0\", features = [\"derive\"] }\n";
    let outcome = bump(input, "1.0.0", "2.0.0");

    // Only dear-* inline tables are rewritten; the package version rule needs
    // a line-leading assignment.
    assert!(!outcome.changed);
  }

  #[test]
  fn test_full_and_minor_versions_bump_together() {
    let input = concat!(
      "[package]\n",
      "name = \"dear-implot\"\n",
      "version = \"0.4.0\"\n",
      "\n",
      "[dependencies]\n",
      "dear-imgui-rs = { path = \"../../dear-imgui\", version = \"0.4\" }\n",
      "dear-implot-sys = { path = \"../dear-implot-sys\", version = \"0.4\" }\n",
    );
    let outcome = bump(input, "0.4.0", "0.6.0");

    assert!(outcome.changed);
    assert!(outcome.content.contains("version = \"0.6.0\""));
    assert_eq!(outcome.content.matches("version = \"0.6\"").count(), 2);
    assert_eq!(outcome.descriptions.len(), 2);
    assert!(outcome.descriptions[1].contains("2 dependency version(s)"));
  }

  #[test]
  fn test_prerelease_versions_round_trip() {
    let input = "version = \"0.5.0-rc.1\"\n";
    let outcome = bump(input, "0.5.0-rc.1", "0.5.0");

    assert!(outcome.changed);
    assert_eq!(outcome.content, "version = \"0.5.0\"\n");
  }

  #[test]
  fn test_minor_boundary_not_confused_by_longer_numbers() {
    // old minor "0.4" must not match inside "10.4" or "0.40"
    let input = concat!(
      "dear-a = { path = \"a\", version = \"10.4\" }\n",
      "dear-b = { path = \"b\", version = \"0.40\" }\n",
    );
    let outcome = bump(input, "0.4.0", "0.6.0");

    assert!(!outcome.changed);
  }
}
