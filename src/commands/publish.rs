//! `dear-release publish` - Publish crates in dependency order
//!
//! Walks the registry in declaration order so dependencies land on crates.io
//! before their dependents. Between publishes the command waits for the index
//! to pick up the new version. A failed publish prompts before continuing
//! with the remaining crates.

use crate::cargo;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::registry::{self, CrateInfo};
use crate::core::version;
use crate::ui::{Reporter, progress};
use std::path::Path;

/// Upstream backend sources vendored into dear-imgui-sdl3 before publishing,
/// so the published crate does not depend on the internal layout of
/// dear-imgui-sys.
const SDL3_VENDORED_FILES: &[&str] = &[
  "imgui_impl_sdl3.h",
  "imgui_impl_sdl3.cpp",
  "imgui_impl_opengl3.h",
  "imgui_impl_opengl3.cpp",
  "imgui_impl_opengl3_loader.h",
];

pub struct PublishOptions {
  pub crates: Option<String>,
  pub start_from: Option<String>,
  pub dry_run: bool,
  pub no_verify: bool,
  pub wait: u64,
  pub yes: bool,
}

/// Run the publish command
pub fn run_publish(root: &Path, reporter: &Reporter, opts: PublishOptions) -> ReleaseResult<()> {
  let mut selection = registry::select(opts.crates.as_deref())?;

  if let Some(start) = &opts.start_from {
    let idx = selection.iter().position(|c| c.name == *start).ok_or_else(|| {
      ReleaseError::with_help(
        format!("Start crate not found: {}", start),
        "Pass --start-from a crate name that is part of the selection.",
      )
    })?;
    selection.drain(..idx);
  }

  reporter.header("Publishing Summary");
  reporter.info(&format!("Repository: {}", root.display()));
  reporter.info(&format!("Crates to publish: {}", selection.len()));
  reporter.info(&format!("Dry run: {}", opts.dry_run));
  reporter.info(&format!("No verify: {}", opts.no_verify));
  reporter.info(&format!("Wait time: {}s", opts.wait));
  reporter.plain("");
  reporter.plain("Publishing order:");
  for (i, info) in selection.iter().enumerate() {
    reporter.plain(&format!("  {}. {} ({})", i + 1, info.name, info.path));
  }
  reporter.plain("");

  if !opts.dry_run && !reporter.confirm("Continue with publishing?", false, opts.yes)? {
    reporter.info("Publishing cancelled");
    return Ok(());
  }

  let mut failed: Vec<&str> = Vec::new();
  for info in &selection {
    if let Err(e) = publish_crate(root, reporter, info, &opts) {
      reporter.error(&format!("Failed to publish {}: {}", info.name, e));
      failed.push(info.name);

      if !reporter.confirm("Continue with remaining crates?", false, opts.yes)? {
        break;
      }
    }
  }

  reporter.header("Publishing Complete");

  if failed.is_empty() {
    reporter.success(&format!("Successfully published all {} crate(s)!", selection.len()));
    Ok(())
  } else {
    reporter.error(&format!("Failed to publish {} crate(s):", failed.len()));
    for name in &failed {
      reporter.plain(&format!("  - {}", name));
    }
    Err(ReleaseError::BatchFailed {
      failed: failed.len(),
      total: selection.len(),
    })
  }
}

/// Publish a single crate
fn publish_crate(root: &Path, reporter: &Reporter, info: &CrateInfo, opts: &PublishOptions) -> ReleaseResult<()> {
  reporter.header(&format!("Publishing {}", info.name));

  let full_path = root.join(info.path);
  if !full_path.exists() {
    return Err(ReleaseError::message(format!(
      "Crate path does not exist: {}",
      full_path.display()
    )));
  }

  let crate_version = version::crate_version(root, info)
    .ok_or_else(|| ReleaseError::message(format!("Could not determine version for {}", info.name)))?;

  reporter.info(&format!("Crate: {}", info.name));
  reporter.info(&format!("Version: {}", crate_version));
  reporter.info(&format!("Path: {}", info.path));

  // dear-imgui-sdl3 vendors upstream backend sources; keep them in sync
  // before publishing. Dry runs must not modify the working tree.
  if info.name == "dear-imgui-sdl3" {
    if opts.dry_run {
      reporter.info("DRY RUN: skipping dear-imgui-sdl3 backend sync");
    } else {
      sync_sdl3_backends(root, reporter)?;
    }
  }

  if !opts.dry_run && cargo::is_published(root, info.name, &crate_version)? {
    reporter.warning(&format!(
      "{} v{} is already published on crates.io",
      info.name, crate_version
    ));
    if reporter.confirm("Skip this crate?", true, opts.yes)? {
      reporter.info(&format!("Skipping {}", info.name));
      return Ok(());
    }
  }

  let mut command = format!("cargo publish -p {}", info.name);
  if opts.no_verify {
    command.push_str(" --no-verify");
  }
  reporter.info(&format!("Running: {}", command));

  if opts.dry_run {
    reporter.warning("DRY RUN: Command not executed");
    return Ok(());
  }

  cargo::publish(root, info.name, opts.no_verify)?;
  reporter.success(&format!("Successfully published {} v{}", info.name, crate_version));

  if opts.wait > 0 {
    reporter.info(&format!("Waiting {} seconds for crates.io to index...", opts.wait));
    progress::wait_with_bar(opts.wait, format!("indexing {}", info.name));
  }

  Ok(())
}

/// Copy the upstream SDL3/OpenGL3 backend sources from the cimgui submodule
/// into backends/dear-imgui-sdl3/backends
fn sync_sdl3_backends(root: &Path, reporter: &Reporter) -> ReleaseResult<()> {
  let src_dir = root
    .join("dear-imgui-sys")
    .join("third-party")
    .join("cimgui")
    .join("imgui")
    .join("backends");
  let dst_dir = root.join("backends").join("dear-imgui-sdl3").join("backends");

  if !src_dir.exists() {
    return Err(ReleaseError::message(format!(
      "dear-imgui-sdl3 sync: upstream imgui backends directory not found: {}",
      src_dir.display()
    )));
  }

  std::fs::create_dir_all(&dst_dir)?;

  reporter.info("Syncing dear-imgui-sdl3 vendored backends from dear-imgui-sys...");
  for name in SDL3_VENDORED_FILES {
    let src = src_dir.join(name);
    let dst = dst_dir.join(name);
    if !src.exists() {
      return Err(ReleaseError::message(format!(
        "Missing upstream backend file: {}",
        src.display()
      )));
    }
    std::fs::copy(&src, &dst)
      .map_err(|e| ReleaseError::message(format!("Failed to copy {} -> {}: {}", src.display(), dst.display(), e)))?;
  }

  reporter.success("dear-imgui-sdl3 backends synced successfully");
  Ok(())
}
