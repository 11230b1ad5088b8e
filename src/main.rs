mod cargo;
mod commands;
mod core;
mod patch;
mod ui;

use clap::{Parser, Subcommand, ValueEnum};
use crate::core::error::{ReleaseError, print_error};
use crate::ui::Reporter;

/// Release engineering for the dear-imgui-rs workspace
#[derive(Parser)]
#[command(name = "dear-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Disable colored output (also honored via the NO_COLOR environment variable)
  #[arg(long, global = true)]
  no_color: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Version maintenance
  // ============================================================================
  /// Bump version numbers across all workspace manifests
  Bump {
    /// New version number (e.g. 0.6.0)
    new_version: String,
    /// Old version to replace (default: auto-detect from dear-imgui-sys)
    #[arg(long)]
    old_version: Option<String>,
    /// Comma-separated list of crate names to update (default: all)
    #[arg(long)]
    crates: Option<String>,
    /// Show what would be changed without modifying files
    #[arg(long)]
    dry_run: bool,
    /// Skip updating README files after the manifest pass
    #[arg(long)]
    skip_readme: bool,
    /// Output the per-file report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Update version numbers in README files (compatibility tables, dependency examples)
  Readme {
    /// New version number (e.g. 0.6.0)
    new_version: String,
    /// Old version to replace (default: auto-detect from dear-imgui-sys)
    #[arg(long)]
    old_version: Option<String>,
    /// Show what would be changed without modifying files
    #[arg(long)]
    dry_run: bool,
    /// Output the per-file report in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Publishing
  // ============================================================================
  /// Run pre-publish validation checks
  Check {
    /// Skip the git working tree check
    #[arg(long)]
    skip_git: bool,
    /// Skip the offline documentation build check
    #[arg(long)]
    skip_doc: bool,
    /// Skip the test run
    #[arg(long)]
    skip_test: bool,
    /// Output check results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Publish all crates to crates.io in dependency order
  Publish {
    /// Comma-separated list of crate names to publish (default: all)
    #[arg(long)]
    crates: Option<String>,
    /// Start publishing from this crate (useful for resuming)
    #[arg(long)]
    start_from: Option<String>,
    /// Show the publish plan without publishing anything
    #[arg(long)]
    dry_run: bool,
    /// Pass --no-verify to cargo publish
    #[arg(long)]
    no_verify: bool,
    /// Seconds to wait between publishes for crates.io indexing
    #[arg(long, default_value_t = 30)]
    wait: u64,
    /// Answer yes to all prompts (non-interactive use)
    #[arg(short, long)]
    yes: bool,
  },

  // ============================================================================
  // Bindings maintenance
  // ============================================================================
  /// Update vendored submodules and regenerate pregenerated bindings for -sys crates
  Bindings {
    /// Comma-separated list of -sys crates to process, or "all"
    #[arg(long, default_value = "all")]
    crates: String,
    /// Cargo profile to use when generating bindings
    #[arg(long, value_enum, default_value_t = Profile::Debug)]
    profile: Profile,
    /// Submodule handling: auto = selected crates only, update = all, skip = none
    #[arg(long, value_enum, default_value_t = SubmodulePolicy::Auto)]
    submodules: SubmodulePolicy,
    /// Remote name for submodule fetches
    #[arg(long, default_value = "origin")]
    remote: String,
    /// Print commands without executing them
    #[arg(long)]
    dry_run: bool,
  },

  /// Prepare a release end to end (bump, bindings, tests, checks)
  Prep {
    /// New version number (e.g. 0.6.0)
    new_version: String,
    /// Old version to replace (default: auto-detect from dear-imgui-sys)
    #[arg(long)]
    old_version: Option<String>,
  },
}

/// Cargo profile for bindings generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
  Debug,
  Release,
}

impl Profile {
  /// Directory name under `target/`
  pub fn dir_name(self) -> &'static str {
    match self {
      Profile::Debug => "debug",
      Profile::Release => "release",
    }
  }
}

/// How the bindings command treats vendored submodules
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SubmodulePolicy {
  /// Update submodules only for the selected crates
  Auto,
  /// Update all known submodules
  Update,
  /// Leave submodules untouched
  Skip,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  // Color choice is resolved once here and threaded through every command;
  // there is no process-wide formatting state.
  let reporter = Reporter::from_env(cli.no_color);

  let workspace_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let result = match cli.command {
    Commands::Bump {
      new_version,
      old_version,
      crates,
      dry_run,
      skip_readme,
      json,
    } => commands::run_bump(
      &workspace_root,
      &reporter,
      commands::bump::BumpOptions {
        new_version,
        old_version,
        crates,
        dry_run,
        skip_readme,
        json,
      },
    ),
    Commands::Readme {
      new_version,
      old_version,
      dry_run,
      json,
    } => commands::run_readme(
      &workspace_root,
      &reporter,
      commands::readme::ReadmeOptions {
        new_version,
        old_version,
        dry_run,
        json,
      },
    ),
    Commands::Check {
      skip_git,
      skip_doc,
      skip_test,
      json,
    } => commands::run_check(
      &workspace_root,
      &reporter,
      commands::check::CheckOptions {
        skip_git,
        skip_doc,
        skip_test,
        json,
      },
    ),
    Commands::Publish {
      crates,
      start_from,
      dry_run,
      no_verify,
      wait,
      yes,
    } => commands::run_publish(
      &workspace_root,
      &reporter,
      commands::publish::PublishOptions {
        crates,
        start_from,
        dry_run,
        no_verify,
        wait,
        yes,
      },
    ),
    Commands::Bindings {
      crates,
      profile,
      submodules,
      remote,
      dry_run,
    } => commands::run_bindings(
      &workspace_root,
      &reporter,
      commands::bindings::BindingsOptions {
        crates,
        profile,
        submodules,
        remote,
        dry_run,
      },
    ),
    Commands::Prep {
      new_version,
      old_version,
    } => commands::run_prep(&workspace_root, &reporter, new_version, old_version),
  };

  if let Err(err) = result {
    handle_error(&reporter, err);
  }
}

fn handle_error(reporter: &Reporter, err: ReleaseError) -> ! {
  print_error(reporter, &err);
  std::process::exit(err.exit_code().as_i32());
}
