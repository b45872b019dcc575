//! Explicit working-directory and environment context.
//!
//! Nothing in this crate changes the process-wide current directory or
//! environment. Every command is spawned from a [`Context`], which carries the
//! directory to run in and the variables to override; nested steps derive a
//! child context with [`Context::at`] and the parent is untouched once the
//! child goes out of scope.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::runner::Runner;
use super::types::{ExecError, Invocation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
  cwd: PathBuf,
  env: BTreeMap<String, String>,
}

impl Context {
  pub fn new(cwd: impl Into<PathBuf>) -> Self {
    Self {
      cwd: cwd.into(),
      env: BTreeMap::new(),
    }
  }

  pub fn cwd(&self) -> &Path {
    &self.cwd
  }

  pub fn env(&self) -> &BTreeMap<String, String> {
    &self.env
  }

  /// Resolve `path` against this context's directory.
  pub fn path(&self, path: impl AsRef<Path>) -> PathBuf {
    self.cwd.join(path)
  }

  /// A child context running in `dir` (relative paths resolve against the
  /// current directory), sharing the environment overrides.
  pub fn at(&self, dir: impl AsRef<Path>) -> Self {
    Self {
      cwd: self.cwd.join(dir),
      env: self.env.clone(),
    }
  }

  /// Add or replace an environment override.
  pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  /// Prefix `PATH` with `dir`. `inherited` is the `PATH` this context would
  /// otherwise see; pass `std::env::var_os("PATH")` at the process boundary.
  ///
  /// Fails when `dir` contains the platform's `PATH` separator.
  pub fn with_path_prefix(self, dir: &Path, inherited: Option<OsString>) -> Result<Self, ExecError> {
    let current = self
      .env
      .get("PATH")
      .map(OsString::from)
      .or(inherited)
      .unwrap_or_default();

    let mut entries = vec![dir.to_path_buf()];
    entries.extend(std::env::split_paths(&current));
    let joined = std::env::join_paths(entries).map_err(|source| ExecError::PathJoin {
      dir: dir.to_path_buf(),
      source,
    })?;

    Ok(self.with_env("PATH", joined.to_string_lossy().into_owned()))
  }

  /// Describe `program args...` running in this context.
  pub fn invocation<I, S>(&self, program: &str, args: I) -> Invocation
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Invocation {
      program: program.to_string(),
      args: args.into_iter().map(Into::into).collect(),
      cwd: self.cwd.clone(),
      env: self.env.clone(),
    }
  }

  /// Run `program args...` in this context and wait for it to exit.
  pub fn run<I, S>(&self, runner: &mut dyn Runner, program: &str, args: I) -> Result<(), ExecError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    runner.run(&self.invocation(program, args))
  }
}
