mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nativedist_lib::project::Project;

use crate::cmd::{Workspace, cmd_args, cmd_build, cmd_copy, cmd_info};
use crate::output::print_error;

/// nativedist - build and package V8, Skia and ANGLE
#[derive(Parser)]
#[command(name = "nativedist")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Workspace root holding sources and build-versions.json (default: current directory)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  /// Distribution directory (default: <root>/dist)
  #[arg(long, global = true)]
  dist: Option<PathBuf>,

  /// Pinned versions file (default: <root>/build-versions.json)
  #[arg(long, global = true)]
  versions: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Fetch, build and install projects into the distribution directory
  Build {
    /// Projects to build: v8, skia, angle
    #[arg(required = true)]
    projects: Vec<Project>,

    /// Build with AddressSanitizer
    #[arg(long)]
    asan: bool,

    /// Print the commands that would run without running them
    #[arg(long)]
    dry_run: bool,
  },

  /// Print the GN arguments for a project and the current target
  Args {
    project: Project,

    /// Include AddressSanitizer
    #[arg(long)]
    asan: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Copy files matching a glob pattern, keeping their layout below the pattern's base
  Copy {
    /// Pattern relative to the workspace root, e.g. "include/**/*.h"
    pattern: String,

    /// Destination directory (relative paths resolve against the workspace root)
    dest: PathBuf,
  },

  /// Show the target configuration and resolved paths
  Info {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = Workspace::resolve(cli.root, cli.dist, cli.versions).and_then(|ws| match cli.command {
    Commands::Build {
      projects,
      asan,
      dry_run,
    } => cmd_build(&ws, projects, asan, dry_run),
    Commands::Args { project, asan, json } => cmd_args(&ws, project, asan, json),
    Commands::Copy { pattern, dest } => cmd_copy(&ws, &pattern, &dest),
    Commands::Info { json } => cmd_info(&ws, json),
  });

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
