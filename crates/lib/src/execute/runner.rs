//! Process runners.
//!
//! [`ProcessRunner`] spawns real processes and blocks until they exit.
//! [`DryRunner`] only records and logs what would run; it backs `--dry-run`
//! and lets tests assert the exact command sequence of a recipe.

use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::types::{ExecError, Invocation};

pub trait Runner {
  /// Run one command to completion. Any non-zero exit is an error.
  fn run(&mut self, invocation: &Invocation) -> Result<(), ExecError>;

  /// Whether side effects are being simulated rather than performed.
  fn is_dry_run(&self) -> bool {
    false
  }
}

/// Spawns each invocation as a child process with inherited stdout/stderr and
/// a closed stdin.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<(), ExecError> {
    info!(cmd = %invocation, cwd = %invocation.cwd.display(), "running");

    let status = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .envs(&invocation.env)
      .stdin(Stdio::null())
      .status()
      .map_err(|e| ExecError::Spawn {
        program: invocation.program.clone(),
        source: e,
      })?;

    if !status.success() {
      debug!(cmd = %invocation, ?status, "command failed");
      return Err(ExecError::Failed {
        cmd: invocation.command_line(),
        code: status.code(),
      });
    }

    Ok(())
  }
}

/// Records invocations instead of running them.
#[derive(Debug, Default)]
pub struct DryRunner {
  invocations: Vec<Invocation>,
}

impl DryRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn invocations(&self) -> &[Invocation] {
    &self.invocations
  }

  /// Recorded command lines, in order.
  pub fn command_lines(&self) -> Vec<String> {
    self.invocations.iter().map(Invocation::command_line).collect()
  }
}

impl Runner for DryRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<(), ExecError> {
    info!(cmd = %invocation, cwd = %invocation.cwd.display(), "would run");
    self.invocations.push(invocation.clone());
    Ok(())
  }

  fn is_dry_run(&self) -> bool {
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::execute::Context;
  use crate::util::testutil::{shell_cmd, touch_file};
  use tempfile::TempDir;

  #[test]
  fn successful_command() {
    let temp = TempDir::new().unwrap();
    let (program, args) = shell_cmd("exit 0");

    Context::new(temp.path())
      .run(&mut ProcessRunner, program, args)
      .unwrap();
  }

  #[test]
  fn non_zero_exit_is_an_error() {
    let temp = TempDir::new().unwrap();
    let (program, args) = shell_cmd("exit 3");

    let err = Context::new(temp.path())
      .run(&mut ProcessRunner, program, args)
      .unwrap_err();
    assert!(matches!(err, ExecError::Failed { code: Some(3), .. }));
  }

  #[test]
  fn missing_program_is_a_spawn_error() {
    let temp = TempDir::new().unwrap();
    let err = Context::new(temp.path())
      .run(&mut ProcessRunner, "definitely-not-a-real-program-xyz", ["--version"])
      .unwrap_err();
    assert!(matches!(err, ExecError::Spawn { .. }));
  }

  #[test]
  fn runs_in_context_directory() {
    let temp = TempDir::new().unwrap();
    let sub = temp.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    let (program, args) = touch_file("cwd_marker");

    Context::new(temp.path())
      .at("sub")
      .run(&mut ProcessRunner, program, args)
      .unwrap();

    assert!(sub.join("cwd_marker").exists());
  }

  #[test]
  #[cfg(unix)]
  fn passes_environment_overrides() {
    let temp = TempDir::new().unwrap();
    let (program, args) = shell_cmd("test \"$NATIVEDIST_PROBE\" = yes");

    Context::new(temp.path())
      .with_env("NATIVEDIST_PROBE", "yes")
      .run(&mut ProcessRunner, program, args)
      .unwrap();
  }

  #[test]
  fn dry_runner_records_without_spawning() {
    let mut runner = DryRunner::new();
    let ctx = Context::new("/nonexistent/dir");

    ctx.run(&mut runner, "git", ["pull"]).unwrap();
    ctx.at("sub").run(&mut runner, "ninja", ["-C", "gn_out"]).unwrap();

    assert!(runner.is_dry_run());
    assert_eq!(runner.command_lines(), vec!["git pull", "ninja -C gn_out"]);
    assert_eq!(runner.invocations()[1].cwd, std::path::PathBuf::from("/nonexistent/dir/sub"));
  }
}
