//! `dear-release prep` - All-in-one release preparation
//!
//! Chains the individual commands into the standard pre-release workflow:
//! bump versions, refresh the lock file, regenerate bindings, run the test
//! suite, then validate. Stops at the first failing step. Publishing stays a
//! separate, deliberate command.

use crate::cargo;
use crate::commands::{bindings, bump, check};
use crate::core::error::ReleaseResult;
use crate::ui::Reporter;
use crate::{Profile, SubmodulePolicy};
use std::path::Path;

/// Run the prep command
pub fn run_prep(
  root: &Path,
  reporter: &Reporter,
  new_version: String,
  old_version: Option<String>,
) -> ReleaseResult<()> {
  reporter.header("Release Preparation");
  reporter.info(&format!("Repository: {}", root.display()));
  reporter.info(&format!("Target version: {}", new_version));

  reporter.header("Step 1/5: Bumping versions");
  bump::run_bump(
    root,
    reporter,
    bump::BumpOptions {
      new_version: new_version.clone(),
      old_version,
      crates: None,
      dry_run: false,
      skip_readme: false,
      json: false,
    },
  )?;

  reporter.header("Step 2/5: Refreshing Cargo.lock");
  cargo::run_streamed(root, &["update", "--workspace"], &[])?;

  reporter.header("Step 3/5: Regenerating bindings");
  bindings::run_bindings(
    root,
    reporter,
    bindings::BindingsOptions {
      crates: "all".to_string(),
      profile: Profile::Release,
      // Bindings track whatever the submodules are pinned to; moving them is
      // a separate decision from cutting a release
      submodules: SubmodulePolicy::Skip,
      remote: "origin".to_string(),
      dry_run: false,
    },
  )?;

  reporter.header("Step 4/5: Running tests");
  cargo::test_workspace_lib(root)?;

  reporter.header("Step 5/5: Pre-publish validation");
  // The tree is intentionally dirty at this point and tests just ran
  check::run_check(
    root,
    reporter,
    check::CheckOptions {
      skip_git: true,
      skip_doc: false,
      skip_test: true,
      json: false,
    },
  )?;

  reporter.header("Release Preparation Complete");
  reporter.success(&format!("Workspace is ready for {}", new_version));
  reporter.plain("");
  reporter.plain("Next steps:");
  reporter.plain("  1. Review the changes: git diff");
  reporter.plain("  2. Update CHANGELOG.md");
  reporter.plain(&format!(
    "  3. Commit: git add -A && git commit -m 'chore: prepare release {}'",
    new_version
  ));
  reporter.plain("  4. Run: dear-release publish --dry-run");
  Ok(())
}
