//! Implementation of the `nativedist build` command.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};

use nativedist_lib::config::BuildConfig;
use nativedist_lib::execute::{DryRunner, ProcessRunner};
use nativedist_lib::pipeline::{BuildOptions, ProjectReport, run_build};
use nativedist_lib::project::Project;

use super::Workspace;
use crate::output::{format_bytes, format_duration, print_info, print_stat, print_success, symbols};

pub fn cmd_build(ws: &Workspace, projects: Vec<Project>, asan: bool, dry_run: bool) -> Result<()> {
  let config = BuildConfig::from_env().context("Failed to read build configuration")?;
  let options = BuildOptions {
    root: ws.root.clone(),
    dist: ws.dist.clone(),
    versions: ws.versions.clone(),
    asan,
    projects,
  };
  let inherited_path = std::env::var_os("PATH");
  let start = Instant::now();

  if dry_run {
    let mut runner = DryRunner::new();
    let reports = run_build(&options, &config, &mut runner, inherited_path).context("Build failed")?;

    print_info(&format!("Dry run for {}: {} command(s)", config.platform(), runner.invocations().len()));
    for invocation in runner.invocations() {
      println!("  {} {}", symbols::ARROW, invocation);
    }
    print_reports(&reports);
    return Ok(());
  }

  let reports = run_build(&options, &config, &mut ProcessRunner, inherited_path).context("Build failed")?;
  print_reports(&reports);
  print_success(&format!("Build complete in {}", format_duration(start.elapsed())));
  Ok(())
}

fn print_reports(reports: &[ProjectReport]) {
  for report in reports {
    let bytes: u64 = report
      .installed
      .iter()
      .filter_map(|p| fs::metadata(p).ok())
      .map(|m| m.len())
      .sum();

    print_success(&format!(
      "{}: {} file(s) installed in {}",
      report.project,
      report.installed.len(),
      format_duration(report.elapsed)
    ));
    print_stat("Output", &report.install_dir.display().to_string());
    print_stat("Size", &format_bytes(bytes));
  }
}
