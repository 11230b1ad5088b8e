//! Patch rules for README files
//!
//! READMEs carry versions in three places, all using the major.minor
//! projection:
//!
//! 1. Compatibility table cells: `| dear-imgui-rs | 0.4.x |`
//! 2. Dependency examples in embedded manifest snippets: `dear-imgui-rs = "0.4"`
//! 3. `version = "0.4"` keys inside inline-table snippet examples
//!
//! The table rule also accepts the literal `Crate` header label, which some
//! READMEs use for the row naming the crate itself.

use super::PatchRule;
use crate::core::error::ReleaseResult;
use crate::core::version::minor_projection;
use semver::Version;

/// Build the README rule set for an old -> new version bump
pub fn rules(old: &Version, new: &Version) -> ReleaseResult<Vec<PatchRule>> {
  let old_minor = minor_projection(old);
  let new_minor = minor_projection(new);
  let old_escaped = regex::escape(&old_minor);

  Ok(vec![
    // | dear-imgui-rs | 0.4.x |
    PatchRule::new(
      &format!(r#"(?m)(\|\s*(?:Crate|dear-[a-z0-9-]+)\s*\|\s*){}(\.x\s*\|)"#, old_escaped),
      format!("${{1}}{}${{2}}", new_minor),
      format!(
        "Updated {{n}} compatibility table entry(ies): {}.x -> {}.x",
        old_minor, new_minor
      ),
    )?,
    // dear-imgui-rs = "0.4"
    PatchRule::new(
      &format!(r#"(dear-[a-z0-9-]+\s*=\s*["']){}(["'])"#, old_escaped),
      format!("${{1}}{}${{2}}", new_minor),
      format!("Updated {{n}} dependency example(s): {} -> {}", old_minor, new_minor),
    )?,
    // version = "0.4"
    PatchRule::new(
      &format!(r#"(version\s*=\s*["']){}(["'])"#, old_escaped),
      format!("${{1}}{}${{2}}", new_minor),
      format!("Updated {{n}} version specification(s): {} -> {}", old_minor, new_minor),
    )?,
  ])
}
