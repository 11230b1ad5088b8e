//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A miniature dear-imgui-rs workspace with git history
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a workspace with the core crates laid out the way the real
  /// repository is: dear-imgui-sys, dear-imgui (publishing as dear-imgui-rs)
  /// and the wgpu backend, all at version 0.4.0.
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("Cargo.toml"),
      r#"[workspace]
members = ["dear-imgui-sys", "dear-imgui", "backends/dear-imgui-wgpu"]
resolver = "2"
"#,
    )?;

    std::fs::write(
      path.join("README.md"),
      r#"# dear-imgui-rs

Rust bindings for Dear ImGui.

## Compatibility

| Crate | Version |
|-------|---------|
| dear-imgui-rs | 0.4.x |
| dear-imgui-wgpu | 0.4.x |

## Quick start

```toml
[dependencies]
dear-imgui-rs = "0.4"
dear-imgui-wgpu = "0.4"
```
"#,
    )?;

    add_crate(&path, "dear-imgui-sys", "dear-imgui-sys", "0.4.0", &[])?;
    add_crate(
      &path,
      "dear-imgui",
      "dear-imgui-rs",
      "0.4.0",
      &[("dear-imgui-sys", r#"{ path = "../dear-imgui-sys", version = "0.4" }"#)],
    )?;
    add_crate(
      &path,
      "backends/dear-imgui-wgpu",
      "dear-imgui-wgpu",
      "0.4.0",
      &[("dear-imgui-rs", r#"{ path = "../../dear-imgui", version = "0.4" }"#)],
    )?;

    std::fs::write(
      path.join("backends/dear-imgui-wgpu/README.md"),
      r#"# dear-imgui-wgpu

WGPU renderer backend.

```toml
[dependencies]
dear-imgui-wgpu = "0.4"
```
"#,
    )?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial workspace setup"])?;

    Ok(Self { _root: root, path })
  }

  pub fn read_file(&self, rel: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(rel)).with_context(|| format!("reading {}", rel))
  }
}

/// Create a crate directory with a manifest and a trivial lib.rs
fn add_crate(root: &Path, dir: &str, name: &str, version: &str, deps: &[(&str, &str)]) -> Result<PathBuf> {
  let crate_path = root.join(dir);
  std::fs::create_dir_all(crate_path.join("src"))?;

  let mut cargo_toml = format!(
    r#"[package]
name = "{}"
version = "{}"
edition = "2021"
license = "MIT"

[dependencies]
"#,
    name, version
  );
  for (dep_name, dep_spec) in deps {
    cargo_toml.push_str(&format!("{} = {}\n", dep_name, dep_spec));
  }
  std::fs::write(crate_path.join("Cargo.toml"), cargo_toml)?;

  std::fs::write(
    crate_path.join("src/lib.rs"),
    format!("//! {} crate\n\npub fn name() -> &'static str {{\n  \"{}\"\n}}\n", name, name),
  )?;

  Ok(crate_path)
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the dear-release CLI, failing the test on a nonzero exit
pub fn run_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_release_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "dear-release command failed: dear-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the dear-release CLI without asserting the exit status, for tests
/// that exercise failure paths
pub fn run_release_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_dear-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env("NO_COLOR", "1")
    .output()
    .context("Failed to run dear-release")
}
