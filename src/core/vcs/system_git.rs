//! System git backend - zero dependencies
//!
//! Uses git subprocess calls with an isolated environment so the user's
//! global configuration cannot change command behavior.

use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to verify the repository exists.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::message(format!(
        "Failed to open git repository: {}",
        stderr
      )));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Porcelain status output; empty means the working tree is clean
  pub fn status_porcelain(&self) -> ReleaseResult<String> {
    let output = self
      .git_cmd(&self.repo_path)
      .args(["status", "--porcelain"])
      .output()
      .context("Failed to get git status")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: "git status --porcelain".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }

  /// Whether the working tree has no uncommitted changes
  pub fn is_clean(&self) -> ReleaseResult<bool> {
    Ok(self.status_porcelain()?.trim().is_empty())
  }

  /// Fetch a remote (with tags) inside a submodule directory
  pub fn fetch_tags(&self, dir: &Path, remote: &str) -> ReleaseResult<()> {
    self.run_in(dir, &["fetch", remote, "--tags"])
  }

  /// Check out a branch inside a submodule directory
  pub fn checkout(&self, dir: &Path, branch: &str) -> ReleaseResult<()> {
    self.run_in(dir, &["checkout", branch])
  }

  /// Pull a branch inside a submodule directory
  pub fn pull(&self, dir: &Path, remote: &str, branch: &str) -> ReleaseResult<()> {
    self.run_in(dir, &["pull", remote, branch])
  }

  /// Recursively init/update nested submodules inside a directory
  pub fn update_submodules_recursive(&self, dir: &Path) -> ReleaseResult<()> {
    self.run_in(dir, &["submodule", "update", "--init", "--recursive"])
  }

  /// Run a git command in a directory, streaming output to the console
  fn run_in(&self, dir: &Path, args: &[&str]) -> ReleaseResult<()> {
    let status = self
      .git_cmd(dir)
      .args(args)
      .status()
      .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

    if !status.success() {
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: format!("git -C {} {}", dir.display(), args.join(" ")),
        stderr: format!("exit code {}", status.code().unwrap_or(-1)),
      }));
    }

    Ok(())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory via -C
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self, dir: &Path) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(dir);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
