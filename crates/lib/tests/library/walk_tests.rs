use std::path::PathBuf;

use nativedist_lib::copy::walk_files;
use tempfile::TempDir;

use super::common::write_tree;

#[test]
fn missing_root_yields_nothing() {
  let temp = TempDir::new().unwrap();
  let mut seen = Vec::new();

  walk_files(
    &temp.path().join("does-not-exist"),
    |_, _| true,
    |file| {
      seen.push(file.to_path_buf());
      Ok(())
    },
  )
  .unwrap();

  assert!(seen.is_empty());
}

#[test]
fn rejected_directories_are_not_descended() {
  let temp = TempDir::new().unwrap();
  write_tree(temp.path(), &["keep/a.h", "keep/deep/b.h", "skip/c.h", "top.h"]);
  let skip = temp.path().join("skip");
  let mut seen: Vec<PathBuf> = Vec::new();

  walk_files(
    temp.path(),
    |path, is_dir| !(is_dir && path == skip),
    |file| {
      seen.push(file.strip_prefix(temp.path()).unwrap().to_path_buf());
      Ok(())
    },
  )
  .unwrap();

  seen.sort();
  assert_eq!(
    seen,
    vec![
      PathBuf::from("keep/a.h"),
      PathBuf::from("keep/deep/b.h"),
      PathBuf::from("top.h")
    ]
  );
}
