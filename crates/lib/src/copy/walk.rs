//! Predicate-driven recursive directory walk.

use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use super::FsError;

/// Walk everything below `root`, asking `predicate(path, is_dir)` about each
/// entry.
///
/// A rejected directory is never descended into, so the predicate is the only
/// pruning mechanism. Accepted files are handed to `on_file`; directories are
/// never yielded. Sibling order is whatever the directory listing returns.
/// A missing `root` walks nothing.
pub fn walk_files<P, F>(root: &Path, mut predicate: P, mut on_file: F) -> Result<(), FsError>
where
  P: FnMut(&Path, bool) -> bool,
  F: FnMut(&Path) -> Result<(), FsError>,
{
  if !root.exists() {
    trace!(root = %root.display(), "walk root missing");
    return Ok(());
  }

  let walker = WalkDir::new(root)
    .min_depth(1)
    .follow_links(true)
    .into_iter()
    .filter_entry(|entry| predicate(entry.path(), entry.file_type().is_dir()));

  for entry in walker {
    let entry = entry.map_err(|e| FsError::Walk {
      root: root.to_path_buf(),
      source: e,
    })?;
    if entry.file_type().is_dir() {
      continue;
    }
    on_file(entry.path())?;
  }

  Ok(())
}
