//! Integration tests for `dear-release bindings`

use crate::helpers::{TestWorkspace, run_release, run_release_unchecked};
use anyhow::Result;

#[test]
fn test_bindings_dry_run_prints_plan_without_executing() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release(
    &ws.path,
    &[
      "bindings",
      "--crates",
      "dear-imgui-sys",
      "--submodules",
      "skip",
      "--dry-run",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("DRY RUN"), "stdout: {}", stdout);
  assert!(
    stdout.contains("cargo build -p dear-imgui-sys"),
    "stdout: {}",
    stdout
  );
  assert!(stdout.contains("IMGUI_SYS_SKIP_CC"), "stdout: {}", stdout);
  assert!(
    !ws.path.join("dear-imgui-sys/src/bindings_pregenerated.rs").exists(),
    "dry run must not write bindings"
  );

  Ok(())
}

#[test]
fn test_bindings_dry_run_shows_submodule_commands() -> Result<()> {
  let ws = TestWorkspace::new()?;

  // The submodule directory must exist even for a dry run
  std::fs::create_dir_all(ws.path.join("dear-imgui-sys/third-party/cimgui"))?;

  let output = run_release(
    &ws.path,
    &["bindings", "--crates", "dear-imgui-sys", "--dry-run"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Would run: git"), "stdout: {}", stdout);
  assert!(stdout.contains("checkout docking_inter"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_bindings_missing_submodule_is_an_error() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_unchecked(
    &ws.path,
    &["bindings", "--crates", "dear-imgui-sys", "--dry-run"],
  )?;

  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Submodule path not found"), "stderr: {}", stderr);
  let combined = format!("{}{}", String::from_utf8_lossy(&output.stdout), stderr);
  assert!(combined.contains("git submodule update --init --recursive"), "help: {}", combined);

  Ok(())
}

#[test]
fn test_bindings_rejects_crates_without_managed_bindings() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_unchecked(
    &ws.path,
    &["bindings", "--crates", "dear-app", "--dry-run"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No managed bindings for: dear-app"), "stderr: {}", stderr);

  Ok(())
}
