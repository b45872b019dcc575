use anyhow::{Context, Result};

use nativedist_lib::config::BuildConfig;
use nativedist_lib::project::{Project, Recipe};

use super::Workspace;
use crate::output::print_json;

pub fn cmd_args(ws: &Workspace, project: Project, asan: bool, json: bool) -> Result<()> {
  let config = BuildConfig::from_env().context("Failed to read build configuration")?;
  let args = Recipe::new(project, &config, asan)
    .gn_args(&ws.root)
    .with_context(|| format!("Failed to compute GN arguments for {}", project))?;

  if json {
    let output = serde_json::json!({
      "project": project,
      "target": config.platform().triple(),
      "asan": asan,
      "args": args.to_vec(),
    });
    return print_json(&output);
  }

  for arg in args.to_vec() {
    println!("{}", arg);
  }
  Ok(())
}
