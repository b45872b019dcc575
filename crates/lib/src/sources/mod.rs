//! Source trees: pinned revisions, clone-or-update, and depot tools.
//!
//! Every project is checked out directly below the workspace root under its
//! own name (`v8/`, `skia/`, `angle/`). Existing checkouts are updated in
//! place; missing ones are cloned at the pinned branch.

mod gclient;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{DEPOT_TOOLS_DIR, DEPOT_TOOLS_URL};
use crate::execute::{Context, ExecError, Runner};
use crate::project::Project;
use crate::toolchain::git;

pub use gclient::{gclient_descriptor, write_gclient_descriptor};

#[derive(Debug, Error)]
pub enum SourceError {
  #[error("failed to read {}: {source}", path.display())]
  ReadVersions { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}: {source}", path.display())]
  ParseVersions { path: PathBuf, source: serde_json::Error },

  #[error("failed to write {}: {source}", path.display())]
  WriteDescriptor { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Exec(#[from] ExecError),
}

/// Upstream location and branch of one source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePin {
  pub git: String,
  pub branch: String,
}

/// Contents of `build-versions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
  pub v8: SourcePin,
  pub skia: SourcePin,
  pub angle: SourcePin,
}

impl Versions {
  pub fn load(path: &Path) -> Result<Self, SourceError> {
    let content = fs::read_to_string(path).map_err(|e| SourceError::ReadVersions {
      path: path.to_path_buf(),
      source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| SourceError::ParseVersions {
      path: path.to_path_buf(),
      source: e,
    })
  }

  pub fn pin(&self, project: Project) -> &SourcePin {
    match project {
      Project::V8 => &self.v8,
      Project::Skia => &self.skia,
      Project::Angle => &self.angle,
    }
  }
}

/// Make sure `name` below `root` is a checkout of `pin`, and return a context
/// running inside it.
///
/// An existing checkout is pulled, switched to the pinned branch and has its
/// submodules updated. Otherwise the branch is cloned with submodules.
pub fn setup_source(
  root: &Context,
  runner: &mut dyn Runner,
  name: &str,
  pin: &SourcePin,
) -> Result<Context, SourceError> {
  let src = root.at(name);

  if src.cwd().exists() {
    info!(name, branch = %pin.branch, "updating source");
    src.run(runner, git(), ["pull"])?;
    src.run(runner, git(), ["checkout", pin.branch.as_str()])?;
    src.run(runner, git(), ["submodule", "update", "--init", "--recursive"])?;
  } else {
    info!(name, url = %pin.git, branch = %pin.branch, "cloning source");
    root.run(
      runner,
      git(),
      [
        "clone",
        "--recurse-submodules",
        "--branch",
        pin.branch.as_str(),
        pin.git.as_str(),
        name,
      ],
    )?;
  }

  Ok(src)
}

/// Shallow-clone `url` into `dest` (relative to `ctx`) unless it already exists.
///
/// Returns whether a clone was performed.
pub fn maybe_clone_repo(ctx: &Context, runner: &mut dyn Runner, dest: &str, url: &str) -> Result<bool, SourceError> {
  if ctx.path(dest).exists() {
    debug!(dest, "repository already present");
    return Ok(false);
  }

  ctx.run(runner, git(), ["clone", "--depth=1", url, dest])?;
  Ok(true)
}

/// Ensure depot tools are checked out below `root` and return a context that
/// has them first on `PATH`.
///
/// `inherited_path` is the caller's `PATH`, read once at the process boundary.
pub fn setup_depot_tools(
  root: &Context,
  runner: &mut dyn Runner,
  inherited_path: Option<OsString>,
) -> Result<Context, SourceError> {
  maybe_clone_repo(root, runner, DEPOT_TOOLS_DIR, DEPOT_TOOLS_URL)?;

  let depot_tools = root.path(DEPOT_TOOLS_DIR);
  let ctx = root.clone().with_path_prefix(&depot_tools, inherited_path)?;

  // Use the locally installed Visual Studio instead of Google's internal toolchain.
  if cfg!(windows) {
    return Ok(ctx.with_env("DEPOT_TOOLS_WIN_TOOLCHAIN", "0"));
  }
  Ok(ctx)
}
