mod args;
mod build;
mod copy;
mod info;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use nativedist_lib::consts::{DIST_DIR, VERSIONS_FILE};

pub use args::cmd_args;
pub use build::cmd_build;
pub use copy::cmd_copy;
pub use info::cmd_info;

/// Paths every command works relative to.
#[derive(Debug, Clone)]
pub struct Workspace {
  pub root: PathBuf,
  pub dist: PathBuf,
  pub versions: PathBuf,
}

impl Workspace {
  pub fn resolve(root: Option<PathBuf>, dist: Option<PathBuf>, versions: Option<PathBuf>) -> Result<Self> {
    let root = match root {
      Some(root) => root,
      None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let root = dunce::canonicalize(&root).with_context(|| format!("Workspace root not found: {}", root.display()))?;

    let ws = Self {
      dist: dist.map(|d| root.join(d)).unwrap_or_else(|| root.join(DIST_DIR)),
      versions: versions.map(|v| root.join(v)).unwrap_or_else(|| root.join(VERSIONS_FILE)),
      root,
    };
    debug!(root = %ws.root.display(), dist = %ws.dist.display(), versions = %ws.versions.display(), "resolved workspace");
    Ok(ws)
  }
}
