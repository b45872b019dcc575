//! Types for external command execution.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
  /// The program could not be started at all.
  #[error("failed to start '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The program ran and exited unsuccessfully.
  #[error("command \"{cmd}\" exited with code {code:?}")]
  Failed { cmd: String, code: Option<i32> },

  /// A directory could not be added to `PATH`.
  #[error("cannot add {} to PATH: {source}", dir.display())]
  PathJoin {
    dir: PathBuf,
    #[source]
    source: std::env::JoinPathsError,
  },
}

/// One fully described external command: what to run, where, and with which
/// environment overrides on top of the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
  pub env: BTreeMap<String, String>,
}

impl Invocation {
  /// The command line as a single string, for logs and error messages.
  pub fn command_line(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}
