//! `dear-release bindings` - Submodule updates and pregenerated bindings
//!
//! For each managed -sys crate this pulls the vendored C submodule up to its
//! tracked branch, rebuilds the crate with the native compile skipped, and
//! copies the bindgen output into `src/bindings_pregenerated.rs` so docs.rs
//! and offline builds work without the submodule checked out.

use crate::cargo;
use crate::core::error::{GitError, ReleaseError, ReleaseResult};
use crate::core::registry::{self, CrateInfo};
use crate::core::vcs::SystemGit;
use crate::ui::Reporter;
use crate::{Profile, SubmodulePolicy};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const PREGENERATED_HEADER: &str = "// AUTOGENERATED: pregenerated bindings for docs.rs/offline builds\n// Note: inner attributes are intentionally omitted to avoid include-context errors.\n\n";

pub struct BindingsOptions {
  pub crates: String,
  pub profile: Profile,
  pub submodules: SubmodulePolicy,
  pub remote: String,
  pub dry_run: bool,
}

/// Run the bindings command
pub fn run_bindings(root: &Path, reporter: &Reporter, opts: BindingsOptions) -> ReleaseResult<()> {
  let selection = select_bindings_crates(&opts.crates)?;

  reporter.header("Bindings Update");
  reporter.info(&format!("Repository: {}", root.display()));
  reporter.info(&format!("Crates: {}", selection.iter().map(|c| c.name).collect::<Vec<_>>().join(", ")));
  reporter.info(&format!("Profile: {}", opts.profile.dir_name()));
  if opts.dry_run {
    reporter.warning("DRY RUN MODE - No commands will be executed");
  }

  let submodule_targets: Vec<&CrateInfo> = match opts.submodules {
    SubmodulePolicy::Skip => Vec::new(),
    SubmodulePolicy::Update => registry::bindings_crates(),
    SubmodulePolicy::Auto => selection.clone(),
  };

  if !submodule_targets.is_empty() {
    update_submodules(root, reporter, &submodule_targets, &opts.remote, opts.dry_run)?;
  }

  let mut failed: Vec<&str> = Vec::new();
  for info in &selection {
    if let Err(e) = regenerate_bindings(root, reporter, info, opts.profile, opts.dry_run) {
      reporter.error(&format!("Failed to regenerate bindings for {}: {}", info.name, e));
      failed.push(info.name);
    }
  }

  reporter.header("Bindings Complete");
  if failed.is_empty() {
    reporter.success(&format!("Updated bindings for {} crate(s)", selection.len()));
    if !opts.dry_run {
      reporter.info("Next steps:");
      reporter.plain("  1. Review the changes: git diff");
      reporter.plain("  2. Test: cargo test --workspace");
      reporter.plain("  3. Commit the updated submodules and bindings");
    }
    Ok(())
  } else {
    reporter.error(&format!("Failed: {}", failed.join(", ")));
    Err(ReleaseError::BatchFailed {
      failed: failed.len(),
      total: selection.len(),
    })
  }
}

/// Resolve the crate selection to -sys crates with managed bindings
fn select_bindings_crates(csv: &str) -> ReleaseResult<Vec<&'static CrateInfo>> {
  if csv.trim() == "all" {
    return Ok(registry::bindings_crates());
  }

  let selection = registry::select(Some(csv))?;
  let without: Vec<&str> = selection.iter().filter(|c| c.bindings.is_none()).map(|c| c.name).collect();
  if !without.is_empty() {
    let known: Vec<&str> = registry::bindings_crates().iter().map(|c| c.name).collect();
    return Err(ReleaseError::with_help(
      format!("No managed bindings for: {}", without.join(", ")),
      format!("Crates with managed bindings: {}", known.join(", ")),
    ));
  }
  Ok(selection)
}

/// Pull each crate's vendored submodule up to its tracked branch
fn update_submodules(
  root: &Path,
  reporter: &Reporter,
  targets: &[&CrateInfo],
  remote: &str,
  dry_run: bool,
) -> ReleaseResult<()> {
  reporter.header("Updating Submodules");

  let git = if dry_run { None } else { Some(SystemGit::open(root)?) };

  for info in targets {
    // select_bindings_crates guarantees bindings is set for every target
    let Some(bindings) = &info.bindings else { continue };
    let dir = root.join(info.path).join(bindings.submodule_dir);

    reporter.bold(&format!("Submodule: {} ({})", bindings.submodule_dir, info.name));

    if !dir.exists() {
      return Err(ReleaseError::Git(GitError::SubmoduleNotFound { path: dir }));
    }

    if dry_run {
      reporter.info(&format!("Would run: git -C {} fetch {} --tags", dir.display(), remote));
      reporter.info(&format!("Would run: git -C {} checkout {}", dir.display(), bindings.branch));
      reporter.info(&format!("Would run: git -C {} pull {} {}", dir.display(), remote, bindings.branch));
      continue;
    }

    let git = git.as_ref().ok_or_else(|| ReleaseError::message("git backend unavailable"))?;
    git.fetch_tags(&dir, remote)?;
    git.checkout(&dir, bindings.branch)?;
    git.pull(&dir, remote, bindings.branch)?;

    // Nested submodules (e.g. cimgui's imgui) are best-effort
    if let Err(e) = git.update_submodules_recursive(&dir) {
      reporter.warning(&format!("Nested submodule update failed (continuing): {}", e));
    }

    reporter.success(&format!("{} is on {}", bindings.submodule_dir, bindings.branch));
  }

  Ok(())
}

/// Rebuild one -sys crate and copy its bindgen output into the tree
fn regenerate_bindings(
  root: &Path,
  reporter: &Reporter,
  info: &CrateInfo,
  profile: Profile,
  dry_run: bool,
) -> ReleaseResult<()> {
  let Some(bindings) = &info.bindings else {
    return Err(ReleaseError::message(format!("No managed bindings for {}", info.name)));
  };

  reporter.header(&format!("Regenerating bindings for {}", info.name));

  let release = profile == Profile::Release;
  let mut command = format!("cargo build -p {}", info.name);
  if release {
    command.push_str(" --release");
  }
  reporter.info(&format!("Running: {} ({}=1)", command, bindings.skip_cc_env));

  if dry_run {
    reporter.warning("DRY RUN: Command not executed");
  } else {
    cargo::build_package(root, info.name, release, &[(bindings.skip_cc_env, "1")])?;
  }

  let dest = info.pregenerated_bindings_path(root);
  match find_bindings(root, info, profile) {
    Some(generated) => {
      if dry_run {
        reporter.info(&format!(
          "Would copy: {} -> {}",
          generated.display(),
          dest.display()
        ));
        return Ok(());
      }
      copy_bindings(&generated, &dest)?;
      reporter.success(&format!("Wrote {}", dest.display()));
      Ok(())
    }
    None if dry_run => {
      reporter.info(&format!("Would copy generated bindings.rs -> {}", dest.display()));
      Ok(())
    }
    None => Err(ReleaseError::message(format!(
      "No generated bindings.rs found for {} under the {} profile",
      info.name,
      profile.dir_name()
    ))),
  }
}

/// Locate the bindgen output under the build directory.
///
/// Build scripts write to `<target>/<profile>/build/<crate>-<hash>/out`; when
/// several hashed directories exist the newest one wins.
fn find_bindings(root: &Path, info: &CrateInfo, profile: Profile) -> Option<PathBuf> {
  let target_dir = std::env::var_os("CARGO_TARGET_DIR")
    .map(PathBuf::from)
    .unwrap_or_else(|| root.join("target"));
  let build_dir = target_dir.join(profile.dir_name()).join("build");

  let prefix = format!("{}-", info.name);
  let mut newest: Option<(SystemTime, PathBuf)> = None;

  for entry in std::fs::read_dir(&build_dir).ok()?.flatten() {
    let name = entry.file_name();
    if !name.to_string_lossy().starts_with(&prefix) {
      continue;
    }
    let candidate = entry.path().join("out").join("bindings.rs");
    let Ok(meta) = std::fs::metadata(&candidate) else { continue };
    let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    if newest.as_ref().map(|(t, _)| mtime > *t).unwrap_or(true) {
      newest = Some((mtime, candidate));
    }
  }

  newest.map(|(_, path)| path)
}

/// Write the pregenerated file: explanatory header, then the bindgen output
/// with inner attributes stripped (the file is included into a module, where
/// `#![...]` would not parse).
fn copy_bindings(src: &Path, dest: &Path) -> ReleaseResult<()> {
  let content = std::fs::read_to_string(src)
    .map_err(|e| ReleaseError::message(format!("Failed to read {}: {}", src.display(), e)))?;

  let mut out = String::with_capacity(PREGENERATED_HEADER.len() + content.len());
  out.push_str(PREGENERATED_HEADER);
  for line in content.lines() {
    if line.trim_start().starts_with("#![") {
      continue;
    }
    out.push_str(line);
    out.push('\n');
  }

  std::fs::write(dest, out)
    .map_err(|e| ReleaseError::message(format!("Failed to write {}: {}", dest.display(), e)))?;
  Ok(())
}
