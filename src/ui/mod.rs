//! Console reporting
//!
//! The [`Reporter`] owns the color decision: it is resolved once at startup
//! (from `--no-color` and the NO_COLOR environment variable) and passed by
//! reference into every command. No process-wide formatting state exists.

pub mod progress;

use crate::core::error::{ReleaseResult, ResultExt};
use anstyle::{AnsiColor, Color, Style};
use std::io::Write;

const GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const YELLOW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const RED: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
const BLUE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue)));
const BOLD: Style = Style::new().bold();

/// Console reporter with an explicit color choice
pub struct Reporter {
  color: bool,
}

impl Reporter {
  pub fn new(color: bool) -> Self {
    Self { color }
  }

  /// Resolve the color choice from the CLI flag and NO_COLOR
  pub fn from_env(no_color_flag: bool) -> Self {
    let color = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
    Self::new(color)
  }

  fn paint(&self, style: Style, text: &str) -> String {
    if self.color {
      format!("{}{}{}", style.render(), text, style.render_reset())
    } else {
      text.to_string()
    }
  }

  pub fn info(&self, msg: &str) {
    println!("{}", self.paint(BLUE, &format!("INFO: {}", msg)));
  }

  pub fn success(&self, msg: &str) {
    println!("{}", self.paint(GREEN, &format!("OK: {}", msg)));
  }

  pub fn warning(&self, msg: &str) {
    println!("{}", self.paint(YELLOW, &format!("WARN: {}", msg)));
  }

  pub fn error(&self, msg: &str) {
    eprintln!("{}", self.paint(RED, &format!("ERR: {}", msg)));
  }

  /// Help text accompanying an error, printed to stderr
  pub fn hint(&self, msg: &str) {
    eprintln!("{}", self.paint(YELLOW, &format!("help: {}", msg)));
  }

  /// Bold single line, e.g. "Updating: backends/dear-imgui-wgpu"
  pub fn bold(&self, msg: &str) {
    println!("{}", self.paint(BOLD, msg));
  }

  /// Section header framed by '=' rules
  pub fn header(&self, msg: &str) {
    let rule = "=".repeat(80);
    println!();
    println!("{}", self.paint(BOLD, &rule));
    println!("{}", self.paint(BOLD, msg));
    println!("{}", self.paint(BOLD, &rule));
    println!();
  }

  /// Check progress line for the validation command
  pub fn check(&self, msg: &str) {
    println!("{}", self.paint(BLUE, &format!("Checking: {}", msg)));
  }

  pub fn pass(&self, msg: &str) {
    println!("{}", self.paint(GREEN, &format!("  ✓ {}", msg)));
  }

  pub fn fail(&self, msg: &str) {
    println!("{}", self.paint(RED, &format!("  ✗ {}", msg)));
  }

  pub fn plain(&self, msg: &str) {
    println!("{}", msg);
  }

  /// Interactive yes/no prompt. `assume_yes` answers yes without reading
  /// stdin (for CI).
  pub fn confirm(&self, prompt: &str, default_yes: bool, assume_yes: bool) -> ReleaseResult<bool> {
    if assume_yes {
      return Ok(true);
    }

    let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
    print!("{} {}: ", prompt, suffix);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
      .read_line(&mut line)
      .context("Failed to read from stdin")?;

    let answer = line.trim().to_lowercase();
    Ok(match answer.as_str() {
      "" => default_yes,
      "y" | "yes" => true,
      _ => false,
    })
  }
}
