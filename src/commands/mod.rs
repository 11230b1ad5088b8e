//! CLI commands for dear-release
//!
//! One command per release-engineering task:
//!
//! - **bump**: Bump version numbers across workspace manifests
//! - **readme**: Sync versions in README compatibility tables and examples
//! - **check**: Pre-publish validation (versions, bindings, git, lock, docs, tests)
//! - **publish**: Publish crates to crates.io in dependency order
//! - **bindings**: Update vendored submodules and regenerate pregenerated bindings
//! - **prep**: All-in-one release preparation workflow
//!
//! Commands take the workspace root and a [`Reporter`] explicitly; there is
//! no global state.

pub mod bindings;
pub mod bump;
pub mod check;
pub mod prep;
pub mod publish;
pub mod readme;

pub use bindings::run_bindings;
pub use bump::run_bump;
pub use check::run_check;
pub use prep::run_prep;
pub use publish::run_publish;
pub use readme::run_readme;

use crate::ui::Reporter;
use serde::Serialize;
use std::path::PathBuf;

/// Per-file outcome of a batch patch run, shared by bump and readme
#[derive(Debug, Serialize)]
pub struct FileReport {
  pub path: PathBuf,
  pub changed: bool,
  pub descriptions: Vec<String>,
  /// Set when the file could not be patched; the batch continues regardless
  pub error: Option<String>,
}

impl FileReport {
  pub fn failed(&self) -> bool {
    self.error.is_some()
  }
}

/// Print one file's outcome in the script style: success lines for changes,
/// a warning for no-ops, errors in red.
pub fn print_file_report(reporter: &Reporter, report: &FileReport) {
  if let Some(error) = &report.error {
    reporter.error(error);
    return;
  }

  for description in &report.descriptions {
    if description == "No changes needed" {
      reporter.warning(description);
    } else {
      reporter.success(description);
    }
  }
}
