//! Build configuration read from the environment.
//!
//! The environment is consulted exactly once, at the process boundary, and the
//! resulting [`BuildConfig`] is passed by reference into every recipe. Values
//! that only one project needs (`CLANG_BASE_PATH`, the V8 pointer compression
//! flag) are kept optional here and demanded by the recipe that uses them.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::consts::{ENV_CLANG_BASE_PATH, ENV_TARGET_ARCH, ENV_TARGET_OS, ENV_V8_POINTER_COMPRESSION};
use crate::platform::{Platform, TargetArch, TargetOs};

/// Errors raised while reading the build configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("environment variable \"{0}\" not found")]
  MissingVar(&'static str),

  #[error("unsupported {var} value '{value}' (expected one of: windows, macos, ios, linux, android)", var = ENV_TARGET_OS)]
  InvalidOs { value: String },

  #[error("unsupported {var} value '{value}' (expected one of: x86_64, aarch64, arm, i686)", var = ENV_TARGET_ARCH)]
  InvalidArch { value: String },

  #[error("{var} has value '{value}', which is not a recognized boolean")]
  InvalidBool { var: &'static str, value: String },
}

/// Parse a boolean flag.
///
/// Accepts `true`, `t`, `yes`, `y`, `on`, `1` and `false`, `f`, `no`, `n`, `off`, `0`,
/// case-insensitively. Anything else is rejected, so a typo never silently
/// turns a feature off.
pub fn parse_bool(value: &str) -> Option<bool> {
  match value.trim().to_ascii_lowercase().as_str() {
    "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
    "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
    _ => None,
  }
}

/// Typed snapshot of the environment inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  #[serde(serialize_with = "serialize_display")]
  pub target_os: TargetOs,
  #[serde(serialize_with = "serialize_display")]
  pub target_arch: TargetArch,
  pub clang_base_path: Option<PathBuf>,
  pub v8_pointer_compression: Option<bool>,
}

impl BuildConfig {
  /// Read the configuration from the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Read the configuration through an arbitrary variable lookup.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let os = lookup(ENV_TARGET_OS).ok_or(ConfigError::MissingVar(ENV_TARGET_OS))?;
    let target_os = os.parse().map_err(|value| ConfigError::InvalidOs { value })?;

    let arch = lookup(ENV_TARGET_ARCH).ok_or(ConfigError::MissingVar(ENV_TARGET_ARCH))?;
    let target_arch = arch.parse().map_err(|value| ConfigError::InvalidArch { value })?;

    let clang_base_path = lookup(ENV_CLANG_BASE_PATH).filter(|p| !p.is_empty()).map(PathBuf::from);

    let v8_pointer_compression = match lookup(ENV_V8_POINTER_COMPRESSION) {
      Some(raw) => Some(parse_bool(&raw).ok_or(ConfigError::InvalidBool {
        var: ENV_V8_POINTER_COMPRESSION,
        value: raw,
      })?),
      None => None,
    };

    Ok(Self {
      target_os,
      target_arch,
      clang_base_path,
      v8_pointer_compression,
    })
  }

  pub fn platform(&self) -> Platform {
    Platform::new(self.target_arch, self.target_os)
  }

  /// The pointer compression flag, required when building V8.
  pub fn require_v8_pointer_compression(&self) -> Result<bool, ConfigError> {
    self
      .v8_pointer_compression
      .ok_or(ConfigError::MissingVar(ENV_V8_POINTER_COMPRESSION))
  }
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
  T: std::fmt::Display,
  S: serde::Serializer,
{
  serializer.collect_str(value)
}
