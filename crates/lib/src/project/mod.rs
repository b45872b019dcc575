//! Per-project build recipes.
//!
//! A recipe turns a [`BuildConfig`] into GN arguments, drives the
//! generate/build steps inside a checked-out source tree and finally installs
//! the produced artifacts into a [`DistLayout`].

mod angle;
mod gn;
mod skia;
mod v8;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::{BuildConfig, ConfigError};
use crate::copy::FsError;
use crate::execute::{Context, ExecError, Runner};
use crate::platform::Platform;
use crate::sources::{SourceError, SourcePin, write_gclient_descriptor};
use crate::toolchain::{ToolchainError, gclient, python};

pub use gn::{GnArgs, GnValue, gn_gen, gn_list, ninja_build};

#[derive(Debug, Error)]
pub enum RecipeError {
  #[error("{project} is not supported for this target: {reason}")]
  Unsupported { project: &'static str, reason: String },

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Toolchain(#[from] ToolchainError),

  #[error(transparent)]
  Source(#[from] SourceError),

  #[error(transparent)]
  Exec(#[from] ExecError),

  #[error(transparent)]
  Fs(#[from] FsError),

  #[error("I/O error on {}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },
}

/// A buildable project. Ordering is the order projects are built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Project {
  V8,
  Skia,
  Angle,
}

/// How third-party dependencies of a checkout are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepsSync {
  /// `.gclient` descriptor next to the checkout, then `gclient sync`.
  Gclient,
  /// `python3 tools/git-sync-deps` inside the checkout.
  GitSyncDeps,
}

impl Project {
  pub const ALL: [Project; 3] = [Project::V8, Project::Skia, Project::Angle];

  pub fn as_str(&self) -> &'static str {
    match self {
      Project::V8 => "v8",
      Project::Skia => "skia",
      Project::Angle => "angle",
    }
  }

  pub fn deps_sync(&self) -> DepsSync {
    match self {
      Project::V8 | Project::Angle => DepsSync::Gclient,
      Project::Skia => DepsSync::GitSyncDeps,
    }
  }
}

impl FromStr for Project {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "v8" => Ok(Project::V8),
      "skia" => Ok(Project::Skia),
      "angle" => Ok(Project::Angle),
      _ => Err(format!("unknown project '{}' (expected one of: v8, skia, angle)", s)),
    }
  }
}

impl fmt::Display for Project {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Installation layout of one project below the distribution root:
/// `lib/<triple>/`, `bin/<triple>/` and a shared `include/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistLayout {
  root: PathBuf,
  platform: Platform,
}

impl DistLayout {
  pub fn new(root: impl Into<PathBuf>, platform: Platform) -> Self {
    Self {
      root: root.into(),
      platform,
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn lib_dir(&self) -> PathBuf {
    self.root.join("lib").join(self.platform.triple())
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.root.join("bin").join(self.platform.triple())
  }

  pub fn include_dir(&self) -> PathBuf {
    self.root.join("include")
  }
}

/// One project built for one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Recipe<'a> {
  pub project: Project,
  pub config: &'a BuildConfig,
  pub asan: bool,
}

impl<'a> Recipe<'a> {
  pub fn new(project: Project, config: &'a BuildConfig, asan: bool) -> Self {
    Self { project, config, asan }
  }

  /// GN arguments for this target. `root` is the workspace root, used to
  /// resolve a relative `CLANG_BASE_PATH`.
  ///
  /// Runs no commands, so every requested project can be validated before
  /// anything is fetched or built.
  pub fn gn_args(&self, root: &Path) -> Result<GnArgs, RecipeError> {
    match self.project {
      Project::V8 => v8::gn_args(self.config, self.asan),
      Project::Skia => skia::gn_args(self.config, root),
      Project::Angle => angle::gn_args(self.config, self.asan),
    }
  }

  /// Fetch the checkout's own dependencies.
  ///
  /// `root` runs in the workspace root, `src` inside the checkout.
  pub fn sync_deps(
    &self,
    root: &Context,
    src: &Context,
    runner: &mut dyn Runner,
    pin: &SourcePin,
  ) -> Result<(), RecipeError> {
    info!(project = %self.project, "syncing dependencies");
    match self.project.deps_sync() {
      DepsSync::Gclient => {
        write_gclient_descriptor(root, runner, self.project.as_str(), &pin.git, "DEPS")?;
        src.run(runner, gclient(), ["sync"])?;
      }
      DepsSync::GitSyncDeps => {
        src.run(runner, python(), ["tools/git-sync-deps"])?;
      }
    }
    Ok(())
  }

  /// Target-specific preparation between dependency sync and `gn gen`.
  pub fn prepare(&self, src: &Context, runner: &mut dyn Runner) -> Result<(), RecipeError> {
    match self.project {
      Project::V8 => v8::prepare(src, runner, self.config),
      Project::Skia | Project::Angle => Ok(()),
    }
  }

  pub fn build(&self, src: &Context, runner: &mut dyn Runner, args: &GnArgs) -> Result<(), RecipeError> {
    match self.project {
      Project::V8 => v8::build(src, runner, args),
      Project::Skia => skia::build(src, runner, args),
      Project::Angle => angle::build(src, runner, args),
    }
  }

  /// Copy the artifacts into `layout`. Returns every file written.
  pub fn install(&self, src: &Context, layout: &DistLayout) -> Result<Vec<PathBuf>, RecipeError> {
    match self.project {
      Project::V8 => v8::install(src, layout),
      Project::Skia => skia::install(src, layout),
      Project::Angle => angle::install(src, self.config, layout),
    }
  }
}
