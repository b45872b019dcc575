use std::path::Path;

use anyhow::{Context, Result};

use nativedist_lib::copy::copy_glob;

use super::Workspace;
use crate::output::{print_info, print_success};

pub fn cmd_copy(ws: &Workspace, pattern: &str, dest: &Path) -> Result<()> {
  let dest = ws.root.join(dest);
  let copied = copy_glob(&ws.root, pattern, &dest).with_context(|| format!("Failed to copy '{}'", pattern))?;

  if copied.is_empty() {
    print_info(&format!("No files matched '{}'", pattern));
  } else {
    print_success(&format!("Copied {} file(s) to {}", copied.len(), dest.display()));
  }
  Ok(())
}
