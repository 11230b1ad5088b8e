//! Cargo subprocess helpers
//!
//! Every cargo invocation runs to completion synchronously. Callers that show
//! output to the user stream it; callers that parse it capture it. Nonzero
//! exits surface as [`ToolError`] with the rendered command line.

use crate::core::error::{ReleaseError, ReleaseResult, ToolError};
use std::path::Path;
use std::process::Command;

/// Captured output of a finished cargo invocation
pub struct CommandOutput {
  pub code: i32,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == 0
  }
}

fn cargo_cmd(root: &Path, args: &[&str], envs: &[(&str, &str)]) -> Command {
  let mut cmd = Command::new("cargo");
  cmd.current_dir(root);
  cmd.args(args);
  for (key, value) in envs {
    cmd.env(key, value);
  }
  cmd
}

fn render(args: &[&str]) -> String {
  format!("cargo {}", args.join(" "))
}

/// Run cargo, streaming output to the console; nonzero exit is an error
pub fn run_streamed(root: &Path, args: &[&str], envs: &[(&str, &str)]) -> ReleaseResult<()> {
  let status = cargo_cmd(root, args, envs).status().map_err(|source| {
    ReleaseError::Tool(ToolError::Spawn {
      command: render(args),
      source,
    })
  })?;

  if !status.success() {
    return Err(ReleaseError::Tool(ToolError::Failed {
      command: render(args),
      code: status.code().unwrap_or(-1),
    }));
  }

  Ok(())
}

/// Run cargo, capturing output; the caller inspects the exit code
pub fn run_captured(root: &Path, args: &[&str], envs: &[(&str, &str)]) -> ReleaseResult<CommandOutput> {
  let output = cargo_cmd(root, args, envs).output().map_err(|source| {
    ReleaseError::Tool(ToolError::Spawn {
      command: render(args),
      source,
    })
  })?;

  Ok(CommandOutput {
    code: output.status.code().unwrap_or(-1),
    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
  })
}

/// `cargo publish -p <name> [--no-verify]`, streaming output
pub fn publish(root: &Path, name: &str, no_verify: bool) -> ReleaseResult<()> {
  let mut args = vec!["publish", "-p", name];
  if no_verify {
    args.push("--no-verify");
  }
  run_streamed(root, &args, &[])
}

/// `cargo check -p <name>` with extra environment (DOCS_RS, SKIP_CC vars)
pub fn check_package(root: &Path, name: &str, envs: &[(&str, &str)]) -> ReleaseResult<()> {
  run_streamed(root, &["check", "-p", name], envs)
}

/// `cargo build -p <name> [--release]` with extra environment
pub fn build_package(root: &Path, name: &str, release: bool, envs: &[(&str, &str)]) -> ReleaseResult<()> {
  let mut args = vec!["build", "-p", name];
  if release {
    args.push("--release");
  }
  run_streamed(root, &args, envs)
}

/// `cargo test --workspace --lib`, streaming output
pub fn test_workspace_lib(root: &Path) -> ReleaseResult<()> {
  run_streamed(root, &["test", "--workspace", "--lib"], &[])
}

/// `cargo update --workspace --dry-run`, captured for lock-file freshness
pub fn update_dry_run(root: &Path) -> ReleaseResult<CommandOutput> {
  run_captured(root, &["update", "--workspace", "--dry-run"], &[])
}

/// Whether `name@version` is already on crates.io, via `cargo search`.
///
/// Search output has the shape `name = "version"  # description`; anything
/// else (including search failures) counts as not published so the caller
/// falls through to a real publish attempt.
pub fn is_published(root: &Path, name: &str, version: &str) -> ReleaseResult<bool> {
  let output = run_captured(root, &["search", name, "--limit", "1"], &[])?;
  if !output.success() {
    return Ok(false);
  }
  Ok(output.stdout.contains(&format!("{} = \"{}\"", name, version)))
}
