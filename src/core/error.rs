//! Error types for dear-release with contextual messages and exit codes
//!
//! Per-file patch failures are reported through [`PatchError`] so a batch can
//! keep going; everything that must abort the run (bad version input, failed
//! subprocess collaborators) surfaces as a [`ReleaseError`] from the command.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::ui::Reporter;

/// Exit codes for dear-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (invalid version, unknown crate, bad args)
  User = 1,
  /// System error (git, cargo, I/O, file patching)
  System = 2,
  /// Validation failure (pre-publish checks failed)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for dear-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Version string errors
  Version(VersionError),

  /// File patching errors
  Patch(PatchError),

  /// Git operation errors
  Git(GitError),

  /// External tool (cargo) errors
  Tool(ToolError),

  /// One or more files in a batch failed
  BatchFailed { failed: usize, total: usize },

  /// Pre-publish validation checks failed
  ChecksFailed { failed: usize },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Version(_) => ExitCode::User,
      ReleaseError::Patch(_) => ExitCode::System,
      ReleaseError::Git(_) => ExitCode::System,
      ReleaseError::Tool(_) => ExitCode::System,
      ReleaseError::BatchFailed { .. } => ExitCode::System,
      ReleaseError::ChecksFailed { .. } => ExitCode::Validation,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Version(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::ChecksFailed { .. } => {
        Some("Fix the failing checks above, then re-run `dear-release check`.".to_string())
      }
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Version(e) => write!(f, "{}", e),
      ReleaseError::Patch(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Tool(e) => write!(f, "{}", e),
      ReleaseError::BatchFailed { failed, total } => {
        write!(f, "Failed to update {} of {} file(s)", failed, total)
      }
      ReleaseError::ChecksFailed { failed } => {
        write!(f, "{} pre-publish check(s) failed", failed)
      }
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      ReleaseError::Patch(PatchError::Read { source, .. }) => Some(source),
      ReleaseError::Patch(PatchError::Write { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ReleaseError {
  fn from(err: toml_edit::TomlError) -> Self {
    ReleaseError::message(format!("TOML parse error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for ReleaseError {
  fn from(err: regex::Error) -> Self {
    ReleaseError::message(format!("Regex error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ReleaseError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ReleaseError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<anyhow::Error> for ReleaseError {
  fn from(err: anyhow::Error) -> Self {
    ReleaseError::message(err.to_string())
  }
}

/// Version-string errors
#[derive(Debug)]
pub enum VersionError {
  /// Input does not match MAJOR.MINOR.PATCH with optional -pre/+build suffixes
  InvalidFormat { input: String },

  /// Could not auto-detect the current workspace version
  DetectFailed { manifest: PathBuf },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::InvalidFormat { .. } => {
        Some("Expected format: MAJOR.MINOR.PATCH (e.g. 0.6.0, 0.6.0-rc.1)".to_string())
      }
      VersionError::DetectFailed { .. } => {
        Some("Specify the current version explicitly with --old-version.".to_string())
      }
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::InvalidFormat { input } => {
        write!(f, "Invalid version format: {}", input)
      }
      VersionError::DetectFailed { manifest } => {
        write!(f, "Could not auto-detect current version from {}", manifest.display())
      }
    }
  }
}

/// Per-file patch errors
#[derive(Debug)]
pub enum PatchError {
  /// Target file does not exist
  FileNotFound { path: PathBuf },

  /// Target file could not be read or is not valid UTF-8 text
  Read { path: PathBuf, source: io::Error },

  /// Rewriting the target file failed
  Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for PatchError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PatchError::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
      PatchError::Read { path, source } => {
        write!(f, "Failed to read {}: {}", path.display(), source)
      }
      PatchError::Write { path, source } => {
        write!(f, "Failed to write {}: {}", path.display(), source)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Submodule path missing from the working tree
  SubmoduleNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run dear-release from inside the workspace, or check the path: {}",
        path.display()
      )),
      GitError::SubmoduleNotFound { .. } => {
        Some("Run `git submodule update --init --recursive` first.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::SubmoduleNotFound { path } => {
        write!(f, "Submodule path not found: {}", path.display())
      }
    }
  }
}

/// External tool (cargo) errors
#[derive(Debug)]
pub enum ToolError {
  /// Subprocess exited nonzero
  Failed { command: String, code: i32 },

  /// Subprocess could not be spawned
  Spawn { command: String, source: io::Error },
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::Failed { command, code } => {
        write!(f, "Command failed with exit code {}: {}", code, command)
      }
      ToolError::Spawn { command, source } => {
        write!(f, "Failed to execute {}: {}", command, source)
      }
    }
  }
}

/// Result type alias for dear-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(reporter: &Reporter, error: &ReleaseError) {
  reporter.error(&format!("{}", error));

  if let Some(help) = error.help_message() {
    reporter.hint(&help);
  }
}
