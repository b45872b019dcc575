//! Projection of build outputs into the distribution tree.
//!
//! Every operation here mirrors a source file to `dest_root + (file - base)`,
//! creating parent directories on the way and overwriting whatever is already
//! there. Nothing is transactional: a failed copy may leave a partial file
//! behind, which the next build run simply overwrites.

pub mod walk;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::glob::{Glob, GlobError};

pub use walk::walk_files;

/// Errors from walking or copying files.
#[derive(Debug, Error)]
pub enum FsError {
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to walk {}: {source}", root.display())]
  Walk { root: PathBuf, source: walkdir::Error },

  #[error("{} is not under {}", path.display(), base.display())]
  OutsideBase { path: PathBuf, base: PathBuf },

  #[error(transparent)]
  Glob(#[from] GlobError),
}

/// Copy `file` to `dest_root` joined with its path relative to `base`.
///
/// Returns the destination path.
pub fn project_file(file: &Path, base: &Path, dest_root: &Path) -> Result<PathBuf, FsError> {
  let relative = file.strip_prefix(base).map_err(|_| FsError::OutsideBase {
    path: file.to_path_buf(),
    base: base.to_path_buf(),
  })?;
  let dest = dest_root.join(relative);
  copy_file(file, &dest)?;
  Ok(dest)
}

/// Copy `src` into `dest_dir` under its own file name, but only if it exists.
///
/// Returns `None` without touching the filesystem when the source is missing;
/// build outputs such as static libraries are optional on some platforms.
pub fn copy_file_to_dir(src: &Path, dest_dir: &Path) -> Result<Option<PathBuf>, FsError> {
  let Some(name) = src.file_name().filter(|_| src.is_file()) else {
    debug!(path = %src.display(), "optional artifact not present, skipping");
    return Ok(None);
  };

  let dest = dest_dir.join(name);
  copy_file(src, &dest)?;
  info!(from = %src.display(), to = %dest.display(), "installed");
  Ok(Some(dest))
}

/// Copy every file matching `pattern` (relative to `cwd`) into `dest_root`,
/// preserving the structure below the pattern's base path.
///
/// A pattern without wildcards copies the named file, or the whole directory
/// it names. A base path that does not exist copies nothing.
pub fn copy_glob(cwd: &Path, pattern: &str, dest_root: &Path) -> Result<Vec<PathBuf>, FsError> {
  let glob = Glob::new(pattern)?;
  let base = cwd.join(glob.base_path());
  let mut copied = Vec::new();

  if !base.exists() {
    debug!(pattern = glob.as_str(), base = %base.display(), "glob base missing, nothing to copy");
    return Ok(copied);
  }

  if glob.is_literal() {
    if base.is_dir() {
      return copy_tree(&base, dest_root, &[]);
    }
    if let Some(dest) = copy_file_to_dir(&base, dest_root)? {
      copied.push(dest);
    }
    return Ok(copied);
  }

  walk_files(
    &base,
    |path, is_dir| is_dir || glob.is_match(candidate(cwd, path, &glob)),
    |file| {
      let dest = project_file(file, &base, dest_root)?;
      debug!(from = %file.display(), to = %dest.display(), "copied");
      copied.push(dest);
      Ok(())
    },
  )?;

  info!(pattern = glob.as_str(), count = copied.len(), dest = %dest_root.display(), "copied glob");
  Ok(copied)
}

/// Copy files below `src` into `dest_root`, keeping relative paths.
///
/// Only files whose extension (with leading dot, e.g. `".h"`) appears in
/// `extensions` are copied; an empty list copies everything. A missing `src`
/// copies nothing.
pub fn copy_tree(src: &Path, dest_root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, FsError> {
  let mut copied = Vec::new();

  walk_files(
    src,
    |path, is_dir| is_dir || has_extension(path, extensions),
    |file| {
      copied.push(project_file(file, src, dest_root)?);
      Ok(())
    },
  )?;

  if !copied.is_empty() {
    info!(from = %src.display(), to = %dest_root.display(), count = copied.len(), "copied tree");
  }
  Ok(copied)
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), FsError> {
  if let Some(parent) = dest.parent() {
    fs::create_dir_all(parent).map_err(|e| FsError::CreateDir {
      path: parent.to_path_buf(),
      source: e,
    })?;
  }

  fs::copy(src, dest).map_err(|e| FsError::Copy {
    from: src.to_path_buf(),
    to: dest.to_path_buf(),
    source: e,
  })?;
  Ok(())
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
  if extensions.is_empty() {
    return true;
  }
  let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
    return false;
  };
  extensions.iter().any(|want| want.trim_start_matches('.') == ext)
}

// Relative patterns are matched against the path as seen from `cwd`.
fn candidate<'a>(cwd: &Path, path: &'a Path, glob: &Glob) -> &'a Path {
  if glob.is_absolute() {
    return path;
  }
  path.strip_prefix(cwd).unwrap_or(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::{read, write_tree};
  use tempfile::TempDir;
  use tracing_test::traced_test;

  #[test]
  fn glob_copy_preserves_structure_below_base() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("v8");
    write_tree(&src, &["include/v8.h", "include/cppgc/heap.h", "include/cppgc/README.md"]);
    let dest = temp.path().join("dist/include");

    let mut copied = copy_glob(&src, "./include/**/*.h", &dest).unwrap();
    copied.sort();

    assert_eq!(copied, vec![dest.join("cppgc").join("heap.h"), dest.join("v8.h")]);
    assert!(!dest.join("cppgc/README.md").exists());
    assert_eq!(read(&dest.join("cppgc/heap.h")), "include/cppgc/heap.h");
  }

  #[test]
  #[traced_test]
  fn glob_copy_logs_normalized_pattern() {
    let temp = TempDir::new().unwrap();
    write_tree(
      temp.path(),
      &["out/libobj/sub/foo.a", "out/libbar.a", "out/libobj/foo.o", "out/obj/libbaz.a"],
    );
    let dest = temp.path().join("dist");

    let mut copied = copy_glob(temp.path(), "./out//lib**.a", &dest).unwrap();
    copied.sort();

    assert_eq!(copied, vec![dest.join("libbar.a"), dest.join("libobj").join("sub").join("foo.a")]);
    assert!(logs_contain("out/lib**.a"));
    assert!(!logs_contain("./out//lib**.a"));
  }

  #[test]
  fn glob_with_missing_base_is_noop() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("dist");

    let copied = copy_glob(temp.path(), "include/**/*.h", &dest).unwrap();
    assert!(copied.is_empty());
    assert!(!dest.exists());
  }

  #[test]
  fn literal_glob_copies_named_file() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["gn_out/obj/libv8_monolith.a"]);
    let dest = temp.path().join("dist/lib");

    let copied = copy_glob(temp.path(), "gn_out/obj/libv8_monolith.a", &dest).unwrap();
    assert_eq!(copied, vec![dest.join("libv8_monolith.a")]);
  }

  #[test]
  fn literal_glob_copies_named_directory() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["include/EGL/egl.h", "include/GLES2/gl2.h"]);
    let dest = temp.path().join("dist/include");

    let copied = copy_glob(temp.path(), "include", &dest).unwrap();
    assert_eq!(copied.len(), 2);
    assert!(dest.join("EGL/egl.h").is_file());
    assert!(dest.join("GLES2/gl2.h").is_file());
  }

  #[test]
  fn missing_single_file_is_silently_skipped() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("dist/lib/x64-linux");

    let result = copy_file_to_dir(&temp.path().join("lib/libFoo.a"), &dest).unwrap();
    assert_eq!(result, None);
    assert!(!temp.path().join("dist").exists());
  }

  #[test]
  #[traced_test]
  fn skipped_artifact_is_logged() {
    let temp = TempDir::new().unwrap();

    copy_file_to_dir(&temp.path().join("gn_out/skia.lib"), temp.path()).unwrap();
    assert!(logs_contain("optional artifact not present"));
  }

  #[test]
  fn single_file_copy_creates_directory_and_overwrites() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["gn_out/libEGL.so"]);
    let dest_dir = temp.path().join("dist/lib/x86_64-linux");
    std::fs::create_dir_all(&dest_dir).unwrap();
    std::fs::write(dest_dir.join("libEGL.so"), "stale").unwrap();

    let dest = copy_file_to_dir(&temp.path().join("gn_out/libEGL.so"), &dest_dir)
      .unwrap()
      .unwrap();
    assert_eq!(read(&dest), "gn_out/libEGL.so");
  }

  #[test]
  fn copy_tree_filters_by_extension() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("include");
    write_tree(&src, &["core/SkCanvas.h", "core/README.md", "private/notes.txt"]);
    let dest = temp.path().join("out");

    let copied = copy_tree(&src, &dest, &[".h", ".md"]).unwrap();
    assert_eq!(copied.len(), 2);
    assert!(dest.join("core/SkCanvas.h").is_file());
    assert!(dest.join("core/README.md").is_file());
    assert!(!dest.join("private/notes.txt").exists());
  }

  #[test]
  fn project_file_rejects_paths_outside_base() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["a/x.h"]);

    let err = project_file(&temp.path().join("a/x.h"), &temp.path().join("b"), temp.path()).unwrap_err();
    assert!(matches!(err, FsError::OutsideBase { .. }));
  }
}
