//! Build orchestration.
//!
//! `run_build` drives the full flow for the requested projects:
//!
//! 1. Compute GN arguments for every project (fails before any command runs)
//! 2. Load pinned source versions
//! 3. Make sure depot tools are available and on `PATH`
//! 4. Per project, in build order: clone or update the source, sync its
//!    dependencies, prepare the target, generate and build, then install into
//!    `<dist>/<project>`

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

use crate::config::BuildConfig;
use crate::execute::{Context, Runner};
use crate::project::{DistLayout, GnArgs, Project, Recipe, RecipeError};
use crate::sources::{SourceError, Versions, setup_depot_tools, setup_source};

/// Inputs of one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  /// Workspace root; sources and depot tools are checked out below it.
  pub root: PathBuf,

  /// Distribution root; each project installs into `<dist>/<name>`.
  pub dist: PathBuf,

  /// Path to `build-versions.json`.
  pub versions: PathBuf,

  /// Build with AddressSanitizer where the project supports it.
  pub asan: bool,

  /// Requested projects, in any order and possibly repeated.
  pub projects: Vec<Project>,
}

impl BuildOptions {
  /// Requested projects, deduplicated and in build order.
  pub fn ordered_projects(&self) -> Vec<Project> {
    self.projects.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
  }
}

/// Outcome of building one project.
#[derive(Debug, Clone)]
pub struct ProjectReport {
  pub project: Project,

  /// Files written into the distribution tree.
  pub installed: Vec<PathBuf>,

  pub install_dir: PathBuf,

  pub elapsed: Duration,
}

#[derive(Debug, Error)]
pub enum BuildError {
  /// Nothing to build.
  #[error("no projects requested")]
  NoProjects,

  /// Source checkout or versions file failed.
  #[error("source error: {0}")]
  Source(#[from] SourceError),

  /// A project recipe failed.
  #[error("{project} failed: {source}")]
  Recipe {
    project: Project,
    #[source]
    source: RecipeError,
  },
}

impl BuildError {
  fn recipe(project: Project) -> impl FnOnce(RecipeError) -> Self {
    move |source| BuildError::Recipe { project, source }
  }
}

/// GN arguments for each requested project, in build order.
///
/// Runs nothing. An unsupported target or a missing variable for any project
/// fails the whole plan.
pub fn plan(options: &BuildOptions, config: &BuildConfig) -> Result<Vec<(Project, GnArgs)>, BuildError> {
  let projects = options.ordered_projects();
  if projects.is_empty() {
    return Err(BuildError::NoProjects);
  }

  projects
    .into_iter()
    .map(|project| {
      Recipe::new(project, config, options.asan)
        .gn_args(&options.root)
        .map(|args| (project, args))
        .map_err(BuildError::recipe(project))
    })
    .collect()
}

/// Fetch, build and install every requested project.
///
/// `inherited_path` is the caller's `PATH`, read once at the process boundary.
pub fn run_build(
  options: &BuildOptions,
  config: &BuildConfig,
  runner: &mut dyn Runner,
  inherited_path: Option<OsString>,
) -> Result<Vec<ProjectReport>, BuildError> {
  let planned = plan(options, config)?;
  let versions = Versions::load(&options.versions)?;

  info!(
    target = %config.platform(),
    projects = planned.len(),
    dry_run = runner.is_dry_run(),
    "starting build"
  );

  let root = setup_depot_tools(&Context::new(&options.root), runner, inherited_path)?;
  let layout_platform = config.platform();

  let mut reports = Vec::with_capacity(planned.len());
  for (project, args) in planned {
    let start = Instant::now();
    let recipe = Recipe::new(project, config, options.asan);
    let pin = versions.pin(project);

    let src = setup_source(&root, runner, project.as_str(), pin)?;
    recipe
      .sync_deps(&root, &src, runner, pin)
      .map_err(BuildError::recipe(project))?;
    recipe.prepare(&src, runner).map_err(BuildError::recipe(project))?;
    recipe.build(&src, runner, &args).map_err(BuildError::recipe(project))?;

    let layout = DistLayout::new(options.dist.join(project.as_str()), layout_platform);
    let installed = recipe.install(&src, &layout).map_err(BuildError::recipe(project))?;
    let install_dir = layout.root().to_path_buf();

    let elapsed = start.elapsed();
    info!(%project, files = installed.len(), dir = %install_dir.display(), ?elapsed, "installed");
    reports.push(ProjectReport {
      project,
      installed,
      install_dir,
      elapsed,
    });
  }

  Ok(reports)
}
