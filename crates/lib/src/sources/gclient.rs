//! The `.gclient` descriptor consumed by `gclient sync`.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use super::SourceError;
use crate::execute::{Context, Runner};

/// Render a `.gclient` file declaring one unmanaged solution.
pub fn gclient_descriptor(name: &str, url: &str, deps_file: &str) -> String {
  format!(
    r#"solutions = [
  {{
    "name": "{name}",
    "url": "{url}",
    "deps_file": "{deps_file}",
    "managed": False,
    "custom_deps": {{}},
  }},
]
"#
  )
}

/// Write `.gclient` next to the `name` checkout below `root`.
///
/// gclient syncs every solution listed in the descriptor it finds, so the file
/// is rewritten for each project right before its sync.
pub fn write_gclient_descriptor(
  root: &Context,
  runner: &dyn Runner,
  name: &str,
  url: &str,
  deps_file: &str,
) -> Result<PathBuf, SourceError> {
  let path = root.path(".gclient");

  if runner.is_dry_run() {
    info!(path = %path.display(), name, "would write gclient descriptor");
    return Ok(path);
  }

  fs::write(&path, gclient_descriptor(name, url, deps_file)).map_err(|e| SourceError::WriteDescriptor {
    path: path.clone(),
    source: e,
  })?;
  info!(path = %path.display(), name, "wrote gclient descriptor");
  Ok(path)
}
