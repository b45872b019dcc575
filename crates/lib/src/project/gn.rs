//! GN argument lists and the generate/build steps shared by every project.

use std::fmt;

use tracing::info;

use crate::consts::GN_OUT_DIR;
use crate::execute::{Context, ExecError, Runner};
use crate::toolchain::{gn, ninja, python};

/// A single GN argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GnValue {
  Bool(bool),
  Int(i64),
  Str(String),
}

impl fmt::Display for GnValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GnValue::Bool(b) => write!(f, "{}", b),
      GnValue::Int(i) => write!(f, "{}", i),
      GnValue::Str(s) => {
        write!(f, "\"")?;
        for c in s.chars() {
          if matches!(c, '"' | '\\' | '$') {
            write!(f, "\\")?;
          }
          write!(f, "{}", c)?;
        }
        write!(f, "\"")
      }
    }
  }
}

impl From<bool> for GnValue {
  fn from(value: bool) -> Self {
    GnValue::Bool(value)
  }
}

impl From<i64> for GnValue {
  fn from(value: i64) -> Self {
    GnValue::Int(value)
  }
}

impl From<i32> for GnValue {
  fn from(value: i32) -> Self {
    GnValue::Int(value.into())
  }
}

impl From<&str> for GnValue {
  fn from(value: &str) -> Self {
    GnValue::Str(value.to_string())
  }
}

impl From<String> for GnValue {
  fn from(value: String) -> Self {
    GnValue::Str(value)
  }
}

/// Ordered `key=value` list passed to `gn gen --args`.
///
/// Setting a key that is already present replaces its value in place, so a
/// platform branch can override a default without GN seeing the key twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GnArgs {
  entries: Vec<(String, GnValue)>,
}

impl GnArgs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(&mut self, key: &str, value: impl Into<GnValue>) -> &mut Self {
    let value = value.into();
    match self.entries.iter_mut().find(|(k, _)| k == key) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((key.to_string(), value)),
    }
    self
  }

  pub fn get(&self, key: &str) -> Option<&GnValue> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &GnValue)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Each argument rendered as `key=value`.
  pub fn to_vec(&self) -> Vec<String> {
    self.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
  }
}

impl fmt::Display for GnArgs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_vec().join(" "))
  }
}

/// `gn gen gn_out` with the given arguments.
pub fn gn_gen(src: &Context, runner: &mut dyn Runner, args: &GnArgs) -> Result<(), ExecError> {
  info!(args = args.len(), dir = %src.cwd().display(), "generating build files");
  src.run(
    runner,
    gn(),
    [
      format!("--script-executable={}", python()),
      "gen".to_string(),
      GN_OUT_DIR.to_string(),
      "--ide=json".to_string(),
      format!("--args={}", args),
    ],
  )
}

/// `gn args gn_out --list`, printing the effective arguments into the build log.
pub fn gn_list(src: &Context, runner: &mut dyn Runner) -> Result<(), ExecError> {
  src.run(
    runner,
    gn(),
    [
      format!("--script-executable={}", python()),
      "args".to_string(),
      GN_OUT_DIR.to_string(),
      "--list".to_string(),
    ],
  )
}

/// `ninja -C gn_out [targets...]`; no targets builds the default target.
pub fn ninja_build(src: &Context, runner: &mut dyn Runner, targets: &[&str]) -> Result<(), ExecError> {
  let mut args = vec!["-C", GN_OUT_DIR];
  args.extend_from_slice(targets);
  src.run(runner, ninja(), args)
}
