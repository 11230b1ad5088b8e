//! Integration tests for `dear-release bump`

use crate::helpers::{TestWorkspace, run_release, run_release_unchecked};
use anyhow::Result;

#[test]
fn test_bump_updates_package_and_dependency_versions() -> Result<()> {
  let ws = TestWorkspace::new()?;

  run_release(
    &ws.path,
    &[
      "bump",
      "0.5.0",
      "--crates",
      "dear-imgui-sys,dear-imgui-rs",
      "--skip-readme",
    ],
  )?;

  let sys = ws.read_file("dear-imgui-sys/Cargo.toml")?;
  assert!(sys.contains("version = \"0.5.0\""), "sys package version: {}", sys);

  let core = ws.read_file("dear-imgui/Cargo.toml")?;
  assert!(core.contains("version = \"0.5.0\""), "core package version: {}", core);
  assert!(
    core.contains(r#"dear-imgui-sys = { path = "../dear-imgui-sys", version = "0.5" }"#),
    "dependency requirement should track major.minor: {}",
    core
  );

  Ok(())
}

#[test]
fn test_bump_auto_detects_old_version() -> Result<()> {
  let ws = TestWorkspace::new()?;

  // No --old-version: the current version comes from dear-imgui-sys
  let output = run_release(
    &ws.path,
    &["bump", "0.5.0", "--crates", "dear-imgui-sys", "--skip-readme"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Old version: 0.4.0"), "stdout: {}", stdout);
  assert!(ws.read_file("dear-imgui-sys/Cargo.toml")?.contains("0.5.0"));

  Ok(())
}

#[test]
fn test_bump_dry_run_leaves_files_untouched() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let before = ws.read_file("dear-imgui-sys/Cargo.toml")?;

  let output = run_release(
    &ws.path,
    &[
      "bump",
      "0.5.0",
      "--crates",
      "dear-imgui-sys",
      "--skip-readme",
      "--dry-run",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("DRY RUN"), "stdout: {}", stdout);
  assert_eq!(ws.read_file("dear-imgui-sys/Cargo.toml")?, before);

  Ok(())
}

#[test]
fn test_bump_continues_past_missing_crates() -> Result<()> {
  let ws = TestWorkspace::new()?;

  // dear-implot is registered but absent from this workspace. The batch
  // reports the failure and still patches the crates that do exist.
  let output = run_release_unchecked(
    &ws.path,
    &[
      "bump",
      "0.5.0",
      "--crates",
      "dear-implot,dear-imgui-sys",
      "--skip-readme",
    ],
  )?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2), "batch failure is a system error");
  assert!(
    ws.read_file("dear-imgui-sys/Cargo.toml")?.contains("0.5.0"),
    "existing crates are still patched"
  );

  Ok(())
}

#[test]
fn test_bump_rejects_invalid_version_before_touching_files() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let before = ws.read_file("dear-imgui-sys/Cargo.toml")?;

  let output = run_release_unchecked(&ws.path, &["bump", "not-a-version", "--skip-readme"])?;

  assert_eq!(output.status.code(), Some(1), "bad input is a user error");
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Invalid version format"), "stderr: {}", stderr);
  assert_eq!(ws.read_file("dear-imgui-sys/Cargo.toml")?, before);

  Ok(())
}

#[test]
fn test_bump_rejects_unknown_crate_selection() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_unchecked(
    &ws.path,
    &["bump", "0.5.0", "--crates", "not-a-crate", "--skip-readme"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Unknown crates: not-a-crate"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_bump_json_report() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release(
    &ws.path,
    &[
      "bump",
      "0.5.0",
      "--crates",
      "dear-imgui-sys",
      "--skip-readme",
      "--json",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  let reports = json.as_array().expect("report array");
  assert_eq!(reports.len(), 1);
  assert_eq!(reports[0]["changed"], serde_json::Value::Bool(true));

  Ok(())
}
