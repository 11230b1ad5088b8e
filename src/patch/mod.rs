//! The version patcher: idempotent regex substitutions over text files
//!
//! One engine serves both file formats. A format module (`manifest`,
//! `readme`) turns an old/new version pair into an ordered list of
//! [`PatchRule`]s; the engine applies them in order over a file's content and
//! reports what changed. Rules anchor on structural boundaries (quotes, table
//! pipes, the `.x` suffix) so a version never matches inside a longer number:
//! bumping 0.4.1 must leave 0.4.10 alone.
//!
//! Applying is a pure function over the content; file I/O happens only at the
//! [`patch_file`] boundary, and the file is rewritten only when the output
//! differs byte for byte (a no-op bump keeps the mtime).

pub mod manifest;
pub mod readme;

use crate::core::error::{PatchError, ReleaseError, ReleaseResult};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Whether a patch run may touch the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
  /// Report what would change, never write
  Preview,
  /// Rewrite files in place when content changed
  Apply,
}

/// A single substitution rule: compiled pattern, replacement template, and a
/// human-readable label. `{n}` in the label is replaced by the occurrence
/// count when the rule matched.
pub struct PatchRule {
  regex: Regex,
  replacement: String,
  label: String,
}

impl PatchRule {
  pub fn new(pattern: &str, replacement: impl Into<String>, label: impl Into<String>) -> ReleaseResult<Self> {
    Ok(Self {
      regex: Regex::new(pattern)?,
      replacement: replacement.into(),
      label: label.into(),
    })
  }
}

/// Result of applying a rule set to one file's content
#[derive(Debug)]
pub struct PatchOutcome {
  /// The rewritten content (equal to the input when nothing matched)
  pub content: String,
  /// Whether the output differs from the input
  pub changed: bool,
  /// One description per rule that matched, or a single no-op note
  pub descriptions: Vec<String>,
}

/// Apply rules in order, each globally, over `content`.
///
/// Rule order is preserved for reproducibility: later rules see the output of
/// earlier ones. The rule sets built by `manifest` and `readme` target
/// disjoint syntactic contexts, so in practice order does not affect the
/// result.
pub fn apply(content: &str, rules: &[PatchRule]) -> PatchOutcome {
  let mut current = content.to_string();
  let mut descriptions = Vec::new();

  for rule in rules {
    let count = rule.regex.find_iter(&current).count();
    if count > 0 {
      current = rule.regex.replace_all(&current, rule.replacement.as_str()).into_owned();
      descriptions.push(rule.label.replace("{n}", &count.to_string()));
    }
  }

  // A rule can match without changing anything (old == new); only a byte
  // difference counts as a change.
  let changed = current != content;
  if !changed {
    descriptions = vec!["No changes needed".to_string()];
  }

  PatchOutcome {
    content: current,
    changed,
    descriptions,
  }
}

/// Per-file report for batch runs and `--json` output
#[derive(Debug, Serialize)]
pub struct FilePatch {
  pub path: PathBuf,
  pub changed: bool,
  pub descriptions: Vec<String>,
}

/// Read a file, apply the rules, and (in [`ApplyMode::Apply`]) write it back
/// if anything changed.
pub fn patch_file(path: &Path, rules: &[PatchRule], mode: ApplyMode) -> ReleaseResult<FilePatch> {
  if !path.exists() {
    return Err(ReleaseError::Patch(PatchError::FileNotFound {
      path: path.to_path_buf(),
    }));
  }

  let content = std::fs::read_to_string(path).map_err(|source| {
    ReleaseError::Patch(PatchError::Read {
      path: path.to_path_buf(),
      source,
    })
  })?;

  let outcome = apply(&content, rules);

  if outcome.changed && mode == ApplyMode::Apply {
    std::fs::write(path, &outcome.content).map_err(|source| {
      ReleaseError::Patch(PatchError::Write {
        path: path.to_path_buf(),
        source,
      })
    })?;
  }

  Ok(FilePatch {
    path: path.to_path_buf(),
    changed: outcome.changed,
    descriptions: outcome.descriptions,
  })
}
