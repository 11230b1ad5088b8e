//! Git operations abstraction
//!
//! dear-release only needs a thin slice of git: working tree cleanliness for
//! pre-publish checks, and fetch/checkout/pull for vendored submodules.
//! Everything goes through system git subprocesses.

mod system_git;

pub use system_git::SystemGit;
