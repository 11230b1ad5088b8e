//! `dear-release readme` - Sync version numbers in README files
//!
//! Touches the workspace README plus every crate README tracked in the
//! registry: compatibility tables, dependency examples, and version keys in
//! embedded manifest snippets.

use crate::commands::{FileReport, print_file_report};
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::registry;
use crate::core::version;
use crate::patch::{self, ApplyMode, readme as readme_rules};
use crate::ui::Reporter;
use semver::Version;
use std::path::{Path, PathBuf};

pub struct ReadmeOptions {
  pub new_version: String,
  pub old_version: Option<String>,
  pub dry_run: bool,
  pub json: bool,
}

/// Run the readme command
pub fn run_readme(root: &Path, reporter: &Reporter, opts: ReadmeOptions) -> ReleaseResult<()> {
  let new = version::validate(&opts.new_version)?;
  let old_str = match &opts.old_version {
    Some(v) => v.clone(),
    None => version::detect_current(root)?,
  };
  let old = version::validate(&old_str)?;

  let mode = if opts.dry_run { ApplyMode::Preview } else { ApplyMode::Apply };

  if !opts.json {
    reporter.info(&format!("Repository: {}", root.display()));
    reporter.info(&format!("Old version: {}", old));
    reporter.info(&format!("New version: {}", new));
    if opts.dry_run {
      reporter.warning("DRY RUN MODE - No files will be modified");
    }
  }

  let reports = patch_readmes(root, reporter, &old, &new, mode, opts.json)?;

  let failed = reports.iter().filter(|r| r.failed()).count();
  let changed = reports.iter().filter(|r| r.changed).count();
  let unchanged = reports.len() - failed - changed;

  if opts.json {
    println!("{}", serde_json::to_string_pretty(&reports)?);
  } else {
    reporter.header("Summary");
    reporter.success(&format!("Successfully updated: {} file(s)", changed));
    if unchanged > 0 {
      reporter.warning(&format!("No changes needed: {} file(s)", unchanged));
    }
    if failed > 0 {
      reporter.error(&format!("Failed to update: {} file(s)", failed));
    }

    if opts.dry_run {
      reporter.warning("DRY RUN: No files were actually modified");
      reporter.info("Run without --dry-run to apply changes");
    } else {
      reporter.info("Next steps:");
      reporter.plain("  1. Review the changes: git diff");
      reporter.plain(&format!(
        "  2. Commit: git add -A && git commit -m 'docs: update README versions to {}'",
        new
      ));
    }
  }

  if failed > 0 {
    return Err(ReleaseError::BatchFailed {
      failed,
      total: reports.len(),
    });
  }
  Ok(())
}

/// README files tracked for version sync: the workspace README first, then
/// every registered crate README, in publish order.
pub fn readme_targets(root: &Path) -> Vec<PathBuf> {
  let mut targets = vec![root.join("README.md")];
  targets.extend(registry::readme_crates().iter().map(|c| c.readme_path(root)));
  targets
}

/// Apply README rules to every tracked README, continuing past per-file
/// errors.
pub fn patch_readmes(
  root: &Path,
  reporter: &Reporter,
  old: &Version,
  new: &Version,
  mode: ApplyMode,
  quiet: bool,
) -> ReleaseResult<Vec<FileReport>> {
  let rules = readme_rules::rules(old, new)?;
  let targets = readme_targets(root);
  let mut reports = Vec::with_capacity(targets.len());

  for path in targets {
    if !quiet {
      let display = path.strip_prefix(root).unwrap_or(&path);
      reporter.bold(&format!("Updating: {}", display.display()));
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
