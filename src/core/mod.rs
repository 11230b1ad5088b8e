//! Core building blocks for dear-release
//!
//! - **error**: Categorized error types with exit codes and help messages
//! - **registry**: The declarative crate table (publish order, paths, flags)
//! - **version**: Version validation, projection, and workspace detection
//! - **vcs**: Git operations via system git (status, submodules)

pub mod error;
pub mod registry;
pub mod version;
pub mod vcs;
