//! `dear-release bump` - Bump version numbers across the workspace
//!
//! Updates every registered crate's Cargo.toml, maintaining the unified
//! release train model where all crates share the same version. The README
//! pass runs afterwards unless skipped, reusing the same old/new pair.

use crate::commands::{FileReport, print_file_report, readme};
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::registry::{self, CrateInfo};
use crate::core::version;
use crate::patch::{self, ApplyMode, manifest};
use crate::ui::Reporter;
use semver::Version;
use std::path::Path;

pub struct BumpOptions {
  pub new_version: String,
  pub old_version: Option<String>,
  pub crates: Option<String>,
  pub dry_run: bool,
  pub skip_readme: bool,
  pub json: bool,
}

/// Run the bump command
pub fn run_bump(root: &Path, reporter: &Reporter, opts: BumpOptions) -> ReleaseResult<()> {
  // Malformed version input aborts before any file is touched
  let new = version::validate(&opts.new_version)?;
  let old_str = match &opts.old_version {
    Some(v) => v.clone(),
    None => version::detect_current(root)?,
  };
  let old = version::validate(&old_str)?;

  let selection = registry::select(opts.crates.as_deref())?;
  let mode = if opts.dry_run { ApplyMode::Preview } else { ApplyMode::Apply };

  if !opts.json {
    reporter.info(&format!("Repository: {}", root.display()));
    reporter.info(&format!("Old version: {}", old));
    reporter.info(&format!("New version: {}", new));
    if opts.dry_run {
      reporter.warning("DRY RUN MODE - No files will be modified");
    }
    reporter.info(&format!("Updating {} crate(s)", selection.len()));
  }

  let mut reports = patch_manifests(root, reporter, &selection, &old, &new, mode, opts.json)?;
  let failed = reports.iter().filter(|r| r.failed()).count();

  if !opts.json {
    reporter.header("Summary");
    reporter.success(&format!("Successfully updated: {} crate(s)", reports.len() - failed));
    if failed > 0 {
      reporter.error(&format!("Failed to update: {} crate(s)", failed));
    }
  }

  if !opts.skip_readme {
    if !opts.json {
      reporter.header("Updating README files");
    }
    // README problems are reported but do not fail the bump
    match readme::patch_readmes(root, reporter, &old, &new, mode, opts.json) {
      Ok(mut readme_reports) => reports.append(&mut readme_reports),
      Err(e) => reporter.warning(&format!("README update had some issues, but continuing... ({})", e)),
    }
  }

  if opts.json {
    println!("{}", serde_json::to_string_pretty(&reports)?);
  } else if opts.dry_run {
    reporter.warning("DRY RUN: No files were actually modified");
    reporter.info("Run without --dry-run to apply changes");
  } else {
    reporter.info("Next steps:");
    reporter.plain("  1. Review the changes: git diff");
    reporter.plain("  2. Update CHANGELOG.md");
    reporter.plain("  3. Run: cargo update");
    reporter.plain("  4. Test: cargo test --workspace");
    reporter.plain(&format!(
      "  5. Commit: git add -A && git commit -m 'chore: bump version to {}'",
      new
    ));
  }

  if failed > 0 {
    return Err(ReleaseError::BatchFailed {
      failed,
      total: selection.len(),
    });
  }
  Ok(())
}

/// Apply manifest rules to each selected crate's Cargo.toml.
///
/// Per-file errors are folded into the report so the batch keeps going;
/// remaining files are still written.
pub fn patch_manifests(
  root: &Path,
  reporter: &Reporter,
  selection: &[&CrateInfo],
  old: &Version,
  new: &Version,
  mode: ApplyMode,
  quiet: bool,
) -> ReleaseResult<Vec<FileReport>> {
  let rules = manifest::rules(old, new)?;
  let mut reports = Vec::with_capacity(selection.len());

  for info in selection {
    let path = info.manifest_path(root);
    if !quiet {
      reporter.bold(&format!("Updating: {}", info.path));
    }

    let report = match patch::patch_file(&path, &rules, mode) {
      Ok(patched) => FileReport {
        path: patched.path,
        changed: patched.changed,
        descriptions: patched.descriptions,
        error: None,
      },
      Err(err) => FileReport {
        path,
        changed: false,
        descriptions: Vec::new(),
        error: Some(format!("{}", err)),
      },
    };

    if !quiet {
      print_file_report(reporter, &report);
    }
    reports.push(report);
  }

  Ok(reports)
}
