//! `dear-release check` - Pre-publish validation
//!
//! Verifies the workspace is ready for publishing:
//! - All crates share the same version
//! - Pregenerated bindings exist (and are plausibly sized) for -sys crates
//! - Git working tree is clean
//! - Cargo.lock is up to date
//! - Documentation builds offline for -sys crates (DOCS_RS=1)
//! - Library tests pass
//!
//! Every check runs even when an earlier one fails; the summary and exit
//! status reflect the aggregate.

use crate::cargo;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::registry::{self, CRATES};
use crate::core::vcs::SystemGit;
use crate::core::version;
use crate::ui::Reporter;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Bindings below this size are assumed truncated or stubbed
const MIN_BINDINGS_SIZE: u64 = 1000;

pub struct CheckOptions {
  pub skip_git: bool,
  pub skip_doc: bool,
  pub skip_test: bool,
  pub json: bool,
}

/// One validation check's outcome
#[derive(Debug, Serialize)]
pub struct CheckResult {
  pub name: String,
  pub passed: bool,
  pub details: Vec<String>,
}

impl CheckResult {
  fn pass(name: &str) -> Self {
    Self {
      name: name.to_string(),
      passed: true,
      details: Vec::new(),
    }
  }

  fn fail(name: &str, details: Vec<String>) -> Self {
    Self {
      name: name.to_string(),
      passed: false,
      details,
    }
  }
}

/// Run the check command
pub fn run_check(root: &Path, reporter: &Reporter, opts: CheckOptions) -> ReleaseResult<()> {
  let quiet = opts.json;

  if !quiet {
    reporter.header("Pre-Publish Validation");
    reporter.plain(&format!("Repository: {}", root.display()));
  }

  let mut results = Vec::new();

  results.push(check_version_consistency(root, reporter, quiet));
  results.push(check_pregenerated_bindings(root, reporter, quiet));

  if !opts.skip_git {
    results.push(check_git_status(root, reporter, quiet));
  }

  results.push(check_cargo_lock(root, reporter, quiet));

  if !opts.skip_doc {
    results.push(check_docs_build(root, reporter, quiet));
  }

  if !opts.skip_test {
    results.push(check_tests(root, reporter, quiet));
  }

  let failed = results.iter().filter(|r| !r.passed).count();

  if quiet {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    reporter.header("Validation Summary");
    for result in &results {
      if result.passed {
        reporter.pass(&format!("{}: PASSED", result.name));
      } else {
        reporter.fail(&format!("{}: FAILED", result.name));
      }
    }
    reporter.plain("");
    reporter.plain(&format!("Total checks: {}", results.len()));
    reporter.success(&format!("Passed: {}", results.len() - failed));
    if failed > 0 {
      reporter.error(&format!("Failed: {}", failed));
    } else {
      reporter.plain("");
      reporter.success("All checks passed! Ready to publish.");
      reporter.plain("");
      reporter.plain("Next steps:");
      reporter.plain("  1. Review changes one more time");
      reporter.plain("  2. Run: dear-release publish --dry-run");
      reporter.plain("  3. Run: dear-release publish");
    }
  }

  if failed > 0 {
    return Err(ReleaseError::ChecksFailed { failed });
  }
  Ok(())
}

/// Every publishable crate must carry the same version
fn check_version_consistency(root: &Path, reporter: &Reporter, quiet: bool) -> CheckResult {
  const NAME: &str = "Version Consistency";
  if !quiet {
    reporter.check("Version consistency across crates");
  }

  let mut versions: BTreeMap<&str, String> = BTreeMap::new();
  let mut details = Vec::new();

  for info in CRATES {
    match version::crate_version(root, info) {
      Some(v) => {
        versions.insert(info.name, v);
      }
      None => details.push(format!("Could not read version for {}", info.name)),
    }
  }

  if !details.is_empty() {
    if !quiet {
      for d in &details {
        reporter.fail(d);
      }
    }
    return CheckResult::fail(NAME, details);
  }

  let unique: std::collections::BTreeSet<&String> = versions.values().collect();
  if unique.len() == 1 {
    if !quiet {
      reporter.pass(&format!("All crates use version {}", unique.iter().next().unwrap()));
    }
    CheckResult::pass(NAME)
  } else {
    details.push("Version mismatch detected:".to_string());
    for (name, v) in &versions {
      details.push(format!("  {}: {}", name, v));
    }
    if !quiet {
      for d in &details {
        reporter.fail(d);
      }
    }
    CheckResult::fail(NAME, details)
  }
}

/// Every managed -sys crate must ship pregenerated bindings
fn check_pregenerated_bindings(root: &Path, reporter: &Reporter, quiet: bool) -> CheckResult {
  const NAME: &str = "Pregenerated Bindings";
  if !quiet {
    reporter.check("Pregenerated bindings for -sys crates");
  }

  let mut details = Vec::new();

  for info in registry::bindings_crates() {
    let path = info.pregenerated_bindings_path(root);
    match std::fs::metadata(&path) {
      Err(_) => {
        details.push(format!("Missing pregenerated bindings: {}", info.name));
        if !quiet {
          reporter.fail(&format!("Missing: {}", path.display()));
        }
      }
      Ok(meta) if meta.len() < MIN_BINDINGS_SIZE => {
        details.push(format!(
          "Pregenerated bindings too small: {} ({} bytes)",
          info.name,
          meta.len()
        ));
        if !quiet {
          reporter.fail(&format!("Too small: {} ({} bytes)", path.display(), meta.len()));
        }
      }
      Ok(meta) => {
        if !quiet {
          reporter.pass(&format!("{}: {} bytes", info.name, meta.len()));
        }
      }
    }
  }

  if details.is_empty() {
    if !quiet {
      reporter.pass("All -sys crates have pregenerated bindings");
    }
    CheckResult::pass(NAME)
  } else {
    if !quiet {
      reporter.fail("Run: dear-release bindings --crates all --profile release");
    }
    CheckResult::fail(NAME, details)
  }
}

/// The working tree must have no uncommitted changes
fn check_git_status(root: &Path, reporter: &Reporter, quiet: bool) -> CheckResult {
  const NAME: &str = "Git Status";
  if !quiet {
    reporter.check("Git working tree status");
  }

  let status = SystemGit::open(root).and_then(|git| git.status_porcelain());
  match status {
    Err(e) => {
      if !quiet {
        reporter.fail(&format!("Git command failed: {}", e));
      }
      CheckResult::fail(NAME, vec![format!("Git command failed: {}", e)])
    }
    Ok(s) if s.trim().is_empty() => {
      if !quiet {
        reporter.pass("Working tree is clean");
      }
      CheckResult::pass(NAME)
    }
    Ok(s) => {
      if !quiet {
        reporter.fail("Working tree has uncommitted changes:");
        reporter.plain(&s);
      }
      CheckResult::fail(NAME, vec!["Uncommitted changes in working tree".to_string()])
    }
  }
}

/// Cargo.lock must not lag behind the manifests
fn check_cargo_lock(root: &Path, reporter: &Reporter, quiet: bool) -> CheckResult {
  const NAME: &str = "Cargo.lock";
  if !quiet {
    reporter.check("Cargo.lock is up-to-date");
  }

  match cargo::update_dry_run(root) {
    Err(e) => {
      if !quiet {
        reporter.fail(&format!("Cargo update check failed: {}", e));
      }
      CheckResult::fail(NAME, vec![format!("Cargo update check failed: {}", e)])
    }
    Ok(output) if !output.success() => {
      if !quiet {
        reporter.fail(&format!("Cargo update check failed: {}", output.stderr.trim()));
      }
      CheckResult::fail(NAME, vec!["Cargo update check failed".to_string()])
    }
    Ok(output) => {
      // cargo reports pending updates on stderr
      let combined = format!("{}{}", output.stdout, output.stderr);
      if combined.contains("Updating") || combined.contains("Adding") {
        if !quiet {
          reporter.fail("Cargo.lock may need updating:");
          reporter.plain(combined.trim());
          reporter.fail("Run: cargo update");
        }
        CheckResult::fail(NAME, vec!["Cargo.lock may be outdated".to_string()])
      } else {
        if !quiet {
          reporter.pass("Cargo.lock is up-to-date");
        }
        CheckResult::pass(NAME)
      }
    }
  }
}

/// -sys crates must build with DOCS_RS=1 (the docs.rs environment is offline
/// and relies on the pregenerated bindings)
fn check_docs_build(root: &Path, reporter: &Reporter, quiet: bool) -> CheckResult {
  const NAME: &str = "Documentation";
  if !quiet {
    reporter.check("Documentation builds (offline mode for -sys crates)");
  }

  let mut details = Vec::new();

  for info in registry::bindings_crates() {
    if !quiet {
      reporter.plain(&format!("  Checking {}...", info.name));
    }

    match cargo::check_package(root, info.name, &[("DOCS_RS", "1")]) {
      Ok(()) => {
        if !quiet {
          reporter.pass(info.name);
        }
      }
      Err(e) => {
        details.push(format!("Doc build failed for {}: {}", info.name, e));
        if !quiet {
          reporter.fail(&format!("Failed: {}", info.name));
        }
      }
    }
  }

  if details.is_empty() {
    if !quiet {
      reporter.pass("All -sys crates build in offline mode");
    }
    CheckResult::pass(NAME)
  } else {
    CheckResult::fail(NAME, details)
  }
}

/// Workspace library tests must pass
fn check_tests(root: &Path, reporter: &Reporter, quiet: bool) -> CheckResult {
  const NAME: &str = "Tests";
  if !quiet {
    reporter.check("Running tests");
  }

  match cargo::test_workspace_lib(root) {
    Ok(()) => {
      if !quiet {
        reporter.pass("All tests passed");
      }
      CheckResult::pass(NAME)
    }
    Err(e) => {
      if !quiet {
        reporter.fail("Tests failed");
      }
      CheckResult::fail(NAME, vec![format!("Tests failed: {}", e)])
    }
  }
}
