//! Declarative crate registry for the dear-imgui-rs workspace
//!
//! One table drives every command: manifest bumping, README syncing,
//! pre-publish checks, and publishing. The declaration order IS the publish
//! order (dependencies before dependents), so no command carries its own copy
//! of the crate list.

use crate::core::error::{ReleaseError, ReleaseResult};
use std::path::{Path, PathBuf};

/// Broad role of a crate inside the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrateKind {
  /// Raw FFI bindings (cimgui and friends)
  Sys,
  /// The main safe wrapper
  Core,
  /// Windowing/rendering backends
  Backend,
  /// Optional extension wrappers
  Extension,
  /// Application runner
  App,
}

/// Vendored submodule and build knobs for a -sys crate
#[derive(Debug, Clone, Copy)]
pub struct BindingsInfo {
  /// Submodule directory, relative to the crate root
  pub submodule_dir: &'static str,
  /// Branch the submodule tracks
  pub branch: &'static str,
  /// Env var that skips the native C/C++ build while still running bindgen
  pub skip_cc_env: &'static str,
}

/// A single workspace crate
#[derive(Debug, Clone, Copy)]
pub struct CrateInfo {
  /// Published crate name
  pub name: &'static str,
  /// Directory relative to the workspace root
  pub path: &'static str,
  pub kind: CrateKind,
  /// Whether the crate has a README tracked for version sync
  pub readme: bool,
  /// Pregenerated-bindings configuration (only for -sys crates with vendored headers)
  pub bindings: Option<BindingsInfo>,
}

impl CrateInfo {
  /// Path to the crate's Cargo.toml
  pub fn manifest_path(&self, root: &Path) -> PathBuf {
    root.join(self.path).join("Cargo.toml")
  }

  /// Path to the crate's README.md
  pub fn readme_path(&self, root: &Path) -> PathBuf {
    root.join(self.path).join("README.md")
  }

  /// Path to the crate's pregenerated bindings file
  pub fn pregenerated_bindings_path(&self, root: &Path) -> PathBuf {
    root.join(self.path).join("src").join("bindings_pregenerated.rs")
  }
}

/// The crate whose manifest is authoritative for the current workspace version
pub const ANCHOR_CRATE: &str = "dear-imgui-sys";

/// All publishable crates, in publish order
pub const CRATES: &[CrateInfo] = &[
  // Core (must be first)
  CrateInfo {
    name: "dear-imgui-sys",
    path: "dear-imgui-sys",
    kind: CrateKind::Sys,
    readme: false,
    bindings: Some(BindingsInfo {
      submodule_dir: "third-party/cimgui",
      branch: "docking_inter",
      skip_cc_env: "IMGUI_SYS_SKIP_CC",
    }),
  },
  CrateInfo {
    name: "dear-imgui-rs",
    path: "dear-imgui",
    kind: CrateKind::Core,
    readme: false,
    bindings: None,
  },
  // Backends (depend on dear-imgui-rs)
  CrateInfo {
    name: "dear-imgui-winit",
    path: "backends/dear-imgui-winit",
    kind: CrateKind::Backend,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imgui-wgpu",
    path: "backends/dear-imgui-wgpu",
    kind: CrateKind::Backend,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imgui-glow",
    path: "backends/dear-imgui-glow",
    kind: CrateKind::Backend,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imgui-ash",
    path: "backends/dear-imgui-ash",
    kind: CrateKind::Backend,
    readme: false,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imgui-sdl3",
    path: "backends/dear-imgui-sdl3",
    kind: CrateKind::Backend,
    readme: false,
    bindings: None,
  },
  // Extension sys crates (depend on dear-imgui-sys)
  CrateInfo {
    name: "dear-implot-sys",
    path: "extensions/dear-implot-sys",
    kind: CrateKind::Sys,
    readme: false,
    bindings: Some(BindingsInfo {
      submodule_dir: "third-party/cimplot",
      branch: "master",
      skip_cc_env: "IMPLOT_SYS_SKIP_CC",
    }),
  },
  CrateInfo {
    name: "dear-imnodes-sys",
    path: "extensions/dear-imnodes-sys",
    kind: CrateKind::Sys,
    readme: false,
    bindings: Some(BindingsInfo {
      submodule_dir: "third-party/cimnodes",
      branch: "master",
      skip_cc_env: "IMNODES_SYS_SKIP_CC",
    }),
  },
  CrateInfo {
    name: "dear-imguizmo-sys",
    path: "extensions/dear-imguizmo-sys",
    kind: CrateKind::Sys,
    readme: false,
    bindings: Some(BindingsInfo {
      submodule_dir: "third-party/cimguizmo",
      branch: "master",
      skip_cc_env: "IMGUIZMO_SYS_SKIP_CC",
    }),
  },
  CrateInfo {
    name: "dear-implot3d-sys",
    path: "extensions/dear-implot3d-sys",
    kind: CrateKind::Sys,
    readme: false,
    bindings: Some(BindingsInfo {
      submodule_dir: "third-party/cimplot3d",
      branch: "main",
      skip_cc_env: "IMPLOT3D_SYS_SKIP_CC",
    }),
  },
  CrateInfo {
    name: "dear-imguizmo-quat-sys",
    path: "extensions/dear-imguizmo-quat-sys",
    kind: CrateKind::Sys,
    readme: false,
    bindings: Some(BindingsInfo {
      submodule_dir: "third-party/cimguizmo_quat",
      branch: "master",
      skip_cc_env: "IMGUIZMO_QUAT_SYS_SKIP_CC",
    }),
  },
  // Test engine ships pregenerated sources in-tree, no managed submodule
  CrateInfo {
    name: "dear-imgui-test-engine-sys",
    path: "extensions/dear-imgui-test-engine-sys",
    kind: CrateKind::Sys,
    readme: false,
    bindings: None,
  },
  // Extension high-level crates (depend on dear-imgui-rs and their sys crates)
  CrateInfo {
    name: "dear-implot",
    path: "extensions/dear-implot",
    kind: CrateKind::Extension,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imnodes",
    path: "extensions/dear-imnodes",
    kind: CrateKind::Extension,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imguizmo",
    path: "extensions/dear-imguizmo",
    kind: CrateKind::Extension,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-implot3d",
    path: "extensions/dear-implot3d",
    kind: CrateKind::Extension,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imguizmo-quat",
    path: "extensions/dear-imguizmo-quat",
    kind: CrateKind::Extension,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imgui-test-engine",
    path: "extensions/dear-imgui-test-engine",
    kind: CrateKind::Extension,
    readme: false,
    bindings: None,
  },
  CrateInfo {
    name: "dear-file-browser",
    path: "extensions/dear-file-browser",
    kind: CrateKind::Extension,
    readme: true,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imgui-reflect-derive",
    path: "extensions/dear-imgui-reflect-derive",
    kind: CrateKind::Extension,
    readme: false,
    bindings: None,
  },
  CrateInfo {
    name: "dear-imgui-reflect",
    path: "extensions/dear-imgui-reflect",
    kind: CrateKind::Extension,
    readme: true,
    bindings: None,
  },
  // Application runner (depends on backends and dear-imgui-rs)
  CrateInfo {
    name: "dear-app",
    path: "dear-app",
    kind: CrateKind::App,
    readme: true,
    bindings: None,
  },
];

/// Look up a crate by name
pub fn find(name: &str) -> Option<&'static CrateInfo> {
  CRATES.iter().find(|c| c.name == name)
}

/// Resolve a comma-separated crate selection, preserving publish order.
///
/// `None` selects every crate. Unknown names are rejected before any work
/// starts.
pub fn select(csv: Option<&str>) -> ReleaseResult<Vec<&'static CrateInfo>> {
  let Some(csv) = csv else {
    return Ok(CRATES.iter().collect());
  };

  let requested: Vec<&str> = csv.split(',').map(|c| c.trim()).filter(|c| !c.is_empty()).collect();

  let unknown: Vec<&str> = requested.iter().copied().filter(|name| find(name).is_none()).collect();
  if !unknown.is_empty() {
    let known: Vec<&str> = CRATES.iter().map(|c| c.name).collect();
    return Err(ReleaseError::with_help(
      format!("Unknown crates: {}", unknown.join(", ")),
      format!("Known crates: {}", known.join(", ")),
    ));
  }

  Ok(CRATES.iter().filter(|c| requested.contains(&c.name)).collect())
}

/// All -sys crates with managed vendored bindings, in publish order
pub fn bindings_crates() -> Vec<&'static CrateInfo> {
  CRATES.iter().filter(|c| c.bindings.is_some()).collect()
}

/// All crates with a README tracked for version sync, in publish order
pub fn readme_crates() -> Vec<&'static CrateInfo> {
  CRATES.iter().filter(|c| c.readme).collect()
}
