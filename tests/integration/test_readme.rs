//! Integration tests for `dear-release readme`

use crate::helpers::{TestWorkspace, run_release_unchecked};
use anyhow::Result;

#[test]
fn test_readme_updates_tables_and_examples_in_existing_files() -> Result<()> {
  let ws = TestWorkspace::new()?;

  // Only a few of the registered crate READMEs exist here, so the batch
  // exits nonzero while still rewriting every file it can reach.
  let output = run_release_unchecked(&ws.path, &["readme", "0.5.0", "--old-version", "0.4.0"])?;
  assert_eq!(output.status.code(), Some(2));

  let root_readme = ws.read_file("README.md")?;
  assert!(root_readme.contains("| dear-imgui-rs | 0.5.x |"), "table: {}", root_readme);
  assert!(root_readme.contains("| dear-imgui-wgpu | 0.5.x |"), "table: {}", root_readme);
  assert!(root_readme.contains(r#"dear-imgui-rs = "0.5""#), "example: {}", root_readme);
  assert!(!root_readme.contains("0.4"), "no stale versions: {}", root_readme);

  let wgpu_readme = ws.read_file("backends/dear-imgui-wgpu/README.md")?;
  assert!(wgpu_readme.contains(r#"dear-imgui-wgpu = "0.5""#), "example: {}", wgpu_readme);

  Ok(())
}

#[test]
fn test_readme_dry_run_leaves_files_untouched() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let before = ws.read_file("README.md")?;

  let output = run_release_unchecked(&ws.path, &["readme", "0.5.0", "--old-version", "0.4.0", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("DRY RUN"), "stdout: {}", stdout);
  assert_eq!(ws.read_file("README.md")?, before);

  Ok(())
}

#[test]
fn test_readme_is_idempotent() -> Result<()> {
  let ws = TestWorkspace::new()?;

  run_release_unchecked(&ws.path, &["readme", "0.5.0", "--old-version", "0.4.0"])?;
  let first = ws.read_file("README.md")?;

  // Running the same update again finds nothing left to change
  let output = run_release_unchecked(&ws.path, &["readme", "0.5.0", "--old-version", "0.4.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(ws.read_file("README.md")?, first);
  assert!(stdout.contains("No changes needed"), "stdout: {}", stdout);

  Ok(())
}
