//! Integration test harness for dear-release
//!
//! Each test builds a throwaway workspace shaped like the real repository
//! and drives the compiled binary through it.

mod helpers;

mod test_bindings;
mod test_bump;
mod test_check;
mod test_publish;
mod test_readme;
