use nativedist_lib::copy::{copy_file_to_dir, copy_glob, copy_tree};
use nativedist_lib::glob::Glob;
use tempfile::TempDir;

use super::common::{list_tree, write_tree};

#[test]
fn recursive_headers_only() {
  let temp = TempDir::new().unwrap();
  let src = temp.path().join("src");
  write_tree(&src, &["include/a.h", "include/sub/b.h", "include/sub/readme.md"]);
  let dest = temp.path().join("out");

  copy_glob(&src, "include/**/*.h", &dest).unwrap();

  assert_eq!(list_tree(&dest), vec!["a.h", "sub/b.h"]);
}

#[test]
fn structure_is_preserved_at_every_depth() {
  let temp = TempDir::new().unwrap();
  let src = temp.path().join("v8");
  write_tree(
    &src,
    &[
      "include/v8.h",
      "include/cppgc/heap.h",
      "include/cppgc/internal/api-constants.h",
      "include/libplatform/v8-tracing.h",
    ],
  );
  let dest = temp.path().join("dist/v8/include");

  copy_glob(&src, "./include/**/*.h", &dest).unwrap();

  assert_eq!(
    list_tree(&dest),
    vec![
      "cppgc/heap.h",
      "cppgc/internal/api-constants.h",
      "libplatform/v8-tracing.h",
      "v8.h",
    ]
  );
  assert_eq!(
    std::fs::read_to_string(dest.join("cppgc/internal/api-constants.h")).unwrap(),
    "include/cppgc/internal/api-constants.h"
  );
}

#[test]
fn copying_twice_gives_the_same_tree() {
  let temp = TempDir::new().unwrap();
  let src = temp.path().join("skia");
  write_tree(&src, &["include/core/SkCanvas.h", "include/gpu/README.md", "include/BUILD.gn"]);
  let dest = temp.path().join("dist/include");

  let first = copy_tree(&src.join("include"), &dest, &[".h", ".md"]).unwrap();
  let tree = list_tree(&dest);
  let second = copy_tree(&src.join("include"), &dest, &[".h", ".md"]).unwrap();

  assert_eq!(first.len(), second.len());
  assert_eq!(list_tree(&dest), tree);
  assert_eq!(tree, vec!["core/SkCanvas.h", "gpu/README.md"]);
}

#[test]
fn missing_optional_library_is_ignored() {
  let temp = TempDir::new().unwrap();
  let dest = temp.path().join("dist/lib/x64-linux");

  let copied = copy_file_to_dir(&temp.path().join("lib/libFoo.a"), &dest).unwrap();

  assert!(copied.is_none());
  assert!(list_tree(temp.path()).is_empty());
}

#[test]
fn missing_base_copies_nothing() {
  let temp = TempDir::new().unwrap();
  let copied = copy_glob(temp.path(), "gn_out/**/*.a", &temp.path().join("dist")).unwrap();
  assert!(copied.is_empty());
}

#[test]
fn literal_and_wildcard_agree_on_single_file() {
  let literal = Glob::new("gn_out/obj/libskia.a").unwrap();
  let wild = Glob::new("gn_out/**/libskia.a").unwrap();

  for path in ["gn_out/obj/libskia.a", "gn_out/libskia.a", "gn_out/obj/libskia.a.tmp"] {
    if literal.is_match(path) {
      assert!(wild.is_match(path), "{path}");
    }
  }
  assert!(wild.is_match("gn_out/libskia.a"));
  assert!(!literal.is_match("gn_out/libskia.a"));
}

#[test]
fn empty_pattern_is_an_error_not_a_panic() {
  let temp = TempDir::new().unwrap();
  let err = copy_glob(temp.path(), "", temp.path()).unwrap_err();
  assert!(err.to_string().contains("empty glob pattern"));
}

#[test]
fn triple_star_spans_at_least_one_directory() {
  let temp = TempDir::new().unwrap();
  let src = temp.path().join("src");
  write_tree(&src, &["include/x.h", "include/a/x.h", "include/a/b/x.h"]);
  let dest = temp.path().join("out");

  copy_glob(&src, "include/***/x.h", &dest).unwrap();

  assert_eq!(list_tree(&dest), vec!["a/b/x.h", "a/x.h"]);
}
