//! External tool names and toolchain discovery.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::{BuildConfig, ConfigError};
use crate::consts::ENV_CLANG_BASE_PATH;

#[derive(Debug, Error)]
pub enum ToolchainError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("failed to resolve {var} '{}': {source}", path.display(), var = ENV_CLANG_BASE_PATH)]
  Resolve { path: PathBuf, source: std::io::Error },

  #[error("clang not found at {}", .0.display())]
  ClangNotFound(PathBuf),
}

pub fn python() -> &'static str {
  "python3"
}

pub fn gn() -> &'static str {
  "gn"
}

pub fn ninja() -> &'static str {
  "ninja"
}

pub fn git() -> &'static str {
  "git"
}

pub fn gclient() -> &'static str {
  "gclient"
}

/// Locate the clang installation named by `CLANG_BASE_PATH`.
///
/// Relative paths resolve against `root`. Returns the absolute base directory
/// once `bin/clang` has been found inside it.
pub fn find_system_clang(config: &BuildConfig, root: &Path) -> Result<PathBuf, ToolchainError> {
  let configured = config
    .clang_base_path
    .as_ref()
    .ok_or(ConfigError::MissingVar(ENV_CLANG_BASE_PATH))?;

  let requested = root.join(configured);
  let base = dunce::canonicalize(&requested).map_err(|e| ToolchainError::Resolve {
    path: requested.clone(),
    source: e,
  })?;

  let clang = base
    .join("bin")
    .join(format!("clang{}", std::env::consts::EXE_SUFFIX));
  if !clang.is_file() {
    return Err(ToolchainError::ClangNotFound(clang));
  }

  debug!(clang = %clang.display(), "found system clang");
  Ok(base)
}
