//! Progress indicators for long-running operations
//!
//! Uses `linya` for allocation-free progress bars. The only long wait in
//! dear-release is the pause between publishes while crates.io indexes the
//! uploaded crate.

use linya::{Bar, Progress};

/// Countdown bar for the crates.io indexing wait
pub struct WaitProgress {
  progress: Progress,
  bar: Bar,
}

impl WaitProgress {
  /// Create a bar spanning `total_secs` seconds
  pub fn new(total_secs: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total_secs, label.into());
    Self { progress, bar }
  }

  /// Advance by one second
  pub fn tick(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}

/// Sleep for `secs` seconds while drawing a countdown bar
pub fn wait_with_bar(secs: u64, label: impl Into<String>) {
  let mut bar = WaitProgress::new(secs as usize, label);
  for _ in 0..secs {
    std::thread::sleep(std::time::Duration::from_secs(1));
    bar.tick();
  }
}
