//! Integration tests for `dear-release publish`

use crate::helpers::{TestWorkspace, run_release, run_release_unchecked};
use anyhow::Result;

#[test]
fn test_publish_dry_run_plans_in_dependency_order() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release(
    &ws.path,
    &[
      "publish",
      "--crates",
      "dear-imgui-rs,dear-imgui-sys,dear-imgui-wgpu",
      "--dry-run",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  // Selection order on the command line does not matter; the plan follows
  // the registry's dependency order.
  assert!(stdout.contains("1. dear-imgui-sys"), "stdout: {}", stdout);
  assert!(stdout.contains("2. dear-imgui-rs"), "stdout: {}", stdout);
  assert!(stdout.contains("3. dear-imgui-wgpu"), "stdout: {}", stdout);
  assert!(stdout.contains("DRY RUN: Command not executed"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_publish_start_from_resumes_mid_plan() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release(
    &ws.path,
    &[
      "publish",
      "--crates",
      "dear-imgui-sys,dear-imgui-rs,dear-imgui-wgpu",
      "--start-from",
      "dear-imgui-rs",
      "--dry-run",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("1. dear-imgui-rs"), "stdout: {}", stdout);
  assert!(!stdout.contains("dear-imgui-sys ("), "sys should be skipped: {}", stdout);

  Ok(())
}

#[test]
fn test_publish_rejects_unknown_start_crate() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_unchecked(
    &ws.path,
    &[
      "publish",
      "--crates",
      "dear-imgui-sys",
      "--start-from",
      "dear-imgui-wgpu",
      "--dry-run",
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Start crate not found"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_publish_dry_run_reports_missing_crate_paths() -> Result<()> {
  let ws = TestWorkspace::new()?;

  // dear-app is registered but not present in this workspace
  let output = run_release_unchecked(
    &ws.path,
    &["publish", "--crates", "dear-app", "--dry-run", "--yes"],
  )?;

  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Failed to publish"), "stderr: {}", stderr);

  Ok(())
}
