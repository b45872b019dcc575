//! Restricted glob patterns for selecting build outputs.
//!
//! Only three kinds of token exist:
//! - `*` matches any run of characters inside one path segment
//! - `**` matches any run of characters across segments; as a whole segment
//!   followed by `/` it also matches zero directories, so `include/**/*.h`
//!   selects `include/a.h` as well as `include/sub/b.h`. Inside a segment
//!   `out/lib**.a` selects `out/libobj/foo.a`, and `***` reads as `**` then `*`
//! - everything else is literal, including characters that are regex syntax
//!
//! Patterns and candidate paths are normalized the same way before matching:
//! separators become `/` and `.` segments disappear. A match always covers the
//! whole path.

use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

/// Errors produced when compiling a pattern.
#[derive(Debug, Error)]
pub enum GlobError {
  #[error("empty glob pattern")]
  Empty,

  #[error("invalid glob '{pattern}': {source}")]
  Compile {
    pattern: String,
    #[source]
    source: regex::Error,
  },
}

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Glob {
  pattern: String,
  base: PathBuf,
  absolute: bool,
  matcher: Option<Regex>,
}

impl Glob {
  /// Compile a pattern.
  pub fn new(pattern: &str) -> Result<Self, GlobError> {
    if pattern.trim().is_empty() {
      return Err(GlobError::Empty);
    }

    let normalized = normalize(pattern);
    let absolute = Path::new(&normalized).is_absolute() || normalized.starts_with('/');
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    let Some(first_wild) = segments.iter().position(|s| s.contains('*')) else {
      // No wildcard: the pattern names one file or directory.
      return Ok(Self {
        base: PathBuf::from(&normalized),
        pattern: normalized,
        absolute,
        matcher: None,
      });
    };

    let base = base_of(&segments[..first_wild], normalized.starts_with('/'));
    let source = translate(&segments, normalized.starts_with('/'));
    let matcher = Regex::new(&source).map_err(|e| GlobError::Compile {
      pattern: pattern.to_string(),
      source: e,
    })?;

    Ok(Self {
      pattern: normalized,
      base,
      absolute,
      matcher: Some(matcher),
    })
  }

  /// The normalized pattern text.
  pub fn as_str(&self) -> &str {
    &self.pattern
  }

  /// Longest literal directory prefix. Every path the pattern can match lies
  /// under it; for a literal pattern it is the pattern itself.
  pub fn base_path(&self) -> &Path {
    &self.base
  }

  /// Whether the pattern contains no wildcard at all.
  pub fn is_literal(&self) -> bool {
    self.matcher.is_none()
  }

  pub fn is_absolute(&self) -> bool {
    self.absolute
  }

  /// Test a full path against the pattern.
  pub fn is_match(&self, path: impl AsRef<Path>) -> bool {
    let candidate = normalize(&path.as_ref().to_string_lossy());
    match &self.matcher {
      Some(re) => re.is_match(&candidate),
      None => candidate == self.pattern,
    }
  }
}

/// Normalize separators and drop `.` segments and repeated separators.
pub fn normalize(path: &str) -> String {
  #[cfg(windows)]
  let path = path.replace('\\', "/");

  let absolute = path.starts_with('/');
  let joined = path
    .split('/')
    .filter(|s| !s.is_empty() && *s != ".")
    .collect::<Vec<_>>()
    .join("/");

  match (absolute, joined.is_empty()) {
    (true, _) => format!("/{joined}"),
    (false, true) => ".".to_string(),
    (false, false) => joined,
  }
}

fn base_of(literal: &[&str], rooted: bool) -> PathBuf {
  let joined = literal.join("/");
  match (rooted, joined.is_empty()) {
    (true, _) => PathBuf::from(format!("/{joined}")),
    (false, true) => PathBuf::from("."),
    (false, false) => PathBuf::from(joined),
  }
}

fn translate(segments: &[&str], rooted: bool) -> String {
  let mut re = String::from("^");
  if rooted {
    re.push('/');
  }

  let last = segments.len() - 1;
  for (i, segment) in segments.iter().enumerate() {
    if *segment == "**" {
      if i == last {
        re.push_str(".*");
      } else {
        // Zero or more whole directories, trailing separator included.
        re.push_str("(?:.*/)?");
      }
      continue;
    }

    push_segment(&mut re, segment);

    if i != last {
      re.push('/');
    }
  }

  re.push('$');
  re
}

// `**` is consumed before `*`, so `***` reads as `**` then `*`.
fn push_segment(re: &mut String, segment: &str) {
  let mut literal = String::new();
  let mut chars = segment.chars().peekable();

  while let Some(c) = chars.next() {
    if c != '*' {
      literal.push(c);
      continue;
    }
    re.push_str(&regex::escape(&literal));
    literal.clear();
    if chars.peek() == Some(&'*') {
      chars.next();
      re.push_str(".*");
    } else {
      re.push_str("[^/]*");
    }
  }
  re.push_str(&regex::escape(&literal));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn recursive_header_scenario() {
    let glob = Glob::new("include/**/*.h").unwrap();
    assert!(glob.is_match("include/a.h"));
    assert!(glob.is_match("include/sub/b.h"));
    assert!(!glob.is_match("include/sub/readme.md"));
    assert_eq!(glob.base_path(), Path::new("include"));
  }

  #[test]
  fn literal_pattern_matches_only_itself() {
    let glob = Glob::new("gn_out/obj/libv8_monolith.a").unwrap();
    assert!(glob.is_literal());
    assert!(glob.is_match("gn_out/obj/libv8_monolith.a"));
    assert!(glob.is_match("./gn_out/obj/libv8_monolith.a"));
    assert!(!glob.is_match("gn_out/obj/libv8_monolith.a.bak"));
    assert!(!glob.is_match("x/gn_out/obj/libv8_monolith.a"));
    assert_eq!(glob.base_path(), Path::new("gn_out/obj/libv8_monolith.a"));
  }

  #[test]
  fn single_star_stays_inside_segment() {
    let glob = Glob::new("include/*.h").unwrap();
    assert!(glob.is_match("include/v8.h"));
    assert!(glob.is_match("include/.h"));
    assert!(!glob.is_match("include/cppgc/heap.h"));
  }

  #[test]
  fn double_star_spans_any_depth() {
    let glob = Glob::new("out/**/lib*.a").unwrap();
    assert!(glob.is_match("out/libfoo.a"));
    assert!(glob.is_match("out/obj/libfoo.a"));
    assert!(glob.is_match("out/obj/third_party/zlib/libz.a"));
    assert!(!glob.is_match("out/obj/foo.a"));
  }

  #[test]
  fn trailing_double_star_matches_everything_below() {
    let glob = Glob::new("include/**").unwrap();
    assert!(glob.is_match("include/a.h"));
    assert!(glob.is_match("include/x/y/z.md"));
    assert!(!glob.is_match("src/a.h"));
  }

  #[test]
  fn anchored_at_both_ends() {
    let glob = Glob::new("*.h").unwrap();
    assert!(glob.is_match("v8.h"));
    assert!(!glob.is_match("v8.hpp"));
    assert!(!glob.is_match("include/v8.h"));
    assert_eq!(glob.base_path(), Path::new("."));
  }

  #[test]
  fn regex_metacharacters_are_literal() {
    let glob = Glob::new("lib/c++/[x].(h)").unwrap();
    assert!(glob.is_match("lib/c++/[x].(h)"));
    assert!(!glob.is_match("lib/cc/x.h"));

    let glob = Glob::new("gen/*.pb.h").unwrap();
    assert!(glob.is_match("gen/msg.pb.h"));
    assert!(!glob.is_match("gen/msgXpbXh"));
  }

  #[test]
  fn leading_dot_segments_are_ignored() {
    let glob = Glob::new("./include/**/*.md").unwrap();
    assert!(glob.is_match("include/README.md"));
    assert!(glob.is_match("./include/cppgc/README.md"));
    assert_eq!(glob.base_path(), Path::new("include"));
  }

  #[test]
  fn absolute_patterns_keep_root() {
    let glob = Glob::new("/opt/out/*.so").unwrap();
    assert!(glob.is_absolute());
    assert!(glob.is_match("/opt/out/libEGL.so"));
    assert!(!glob.is_match("opt/out/libEGL.so"));
    assert_eq!(glob.base_path(), Path::new("/opt/out"));
  }

  #[test]
  fn empty_pattern_is_rejected() {
    assert!(matches!(Glob::new(""), Err(GlobError::Empty)));
    assert!(matches!(Glob::new("   "), Err(GlobError::Empty)));
  }

  #[test]
  fn double_star_inside_segment_crosses_separators() {
    let glob = Glob::new("out/lib**.a").unwrap();
    assert!(glob.is_match("out/libobj/sub/foo.a"));
    assert!(glob.is_match("out/lib.a"));
    assert!(!glob.is_match("out/obj/sub/libfoo.a"));
    assert!(!glob.is_match("out/libobj/sub/foo.o"));
    assert_eq!(glob.base_path(), Path::new("out"));

    let glob = Glob::new("include/**.h").unwrap();
    assert!(glob.is_match("include/v8.h"));
    assert!(glob.is_match("include/cppgc/heap.h"));
    assert!(!glob.is_match("include/cppgc/README.md"));
  }

  #[test]
  fn triple_star_is_double_then_single() {
    let glob = Glob::new("a/***/b").unwrap();
    assert!(glob.is_match("a/x/y/b"));
    assert!(glob.is_match("a/x/b"));
    assert!(!glob.is_match("a/b"));
    assert!(!glob.is_match("a/x/y/c"));
  }

  #[test]
  fn normalize_collapses_separators() {
    assert_eq!(normalize("./a//b/./c"), "a/b/c");
    assert_eq!(normalize("/a/b"), "/a/b");
    assert_eq!(normalize("./"), ".");
  }
}
