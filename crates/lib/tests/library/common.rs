use std::fs;
use std::path::Path;

/// Create `files` below `root`; each file contains its own relative path.
pub fn write_tree(root: &Path, files: &[&str]) {
  for file in files {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, file).unwrap();
  }
}

/// Every file below `root` as a sorted list of `/`-separated relative paths.
pub fn list_tree(root: &Path) -> Vec<String> {
  let mut files = Vec::new();
  collect(root, root, &mut files);
  files.sort();
  files
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
  let Ok(entries) = fs::read_dir(dir) else {
    return;
  };
  for entry in entries {
    let path = entry.unwrap().path();
    if path.is_dir() {
      collect(root, &path, out);
    } else {
      let rel = path.strip_prefix(root).unwrap();
      let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
      out.push(parts.join("/"));
    }
  }
}
