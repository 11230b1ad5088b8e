//! Integration tests for `dear-release check`

use crate::helpers::{TestWorkspace, run_release_unchecked};
use anyhow::Result;

#[test]
fn test_check_reports_missing_crates_as_validation_failure() -> Result<()> {
  let ws = TestWorkspace::new()?;

  // Most registered crates are absent here, so version consistency and the
  // bindings check both fail. Validation failures use their own exit code.
  let output = run_release_unchecked(
    &ws.path,
    &["check", "--skip-git", "--skip-doc", "--skip-test"],
  )?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Version Consistency: FAILED"), "stdout: {}", stdout);
  assert!(stdout.contains("Pregenerated Bindings: FAILED"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_check_json_output_is_machine_readable() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release_unchecked(
    &ws.path,
    &["check", "--skip-git", "--skip-doc", "--skip-test", "--json"],
  )?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = String::from_utf8_lossy(&output.stdout);
  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  let results = json.as_array().expect("check result array");
  assert!(!results.is_empty());
  assert!(results.iter().all(|r| r["name"].is_string() && r["passed"].is_boolean()));

  Ok(())
}

#[test]
fn test_check_git_detects_dirty_tree() -> Result<()> {
  let ws = TestWorkspace::new()?;
  std::fs::write(ws.path.join("scratch.txt"), "uncommitted\n")?;

  let output = run_release_unchecked(
    &ws.path,
    &["check", "--skip-doc", "--skip-test", "--json"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  let git_check = json
    .as_array()
    .expect("check result array")
    .iter()
    .find(|r| r["name"] == "Git Status")
    .expect("git check present")
    .clone();
  assert_eq!(git_check["passed"], serde_json::Value::Bool(false));

  Ok(())
}
