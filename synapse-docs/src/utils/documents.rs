use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::Group;

/// Collect the Markdown documents of one group, sorted by file name.
///
/// Paths are returned relative to `root`. A missing group folder is skipped
/// with a warning; a folder that exists but cannot be listed is an error.
pub fn collect_group_documents(root: &Path, group: &Group) -> Result<Vec<PathBuf>> {
  let dir = root.join(&group.name);
  if !dir.is_dir() {
    warn!("Group folder not found, skipping: {}", dir.display());
    return Ok(Vec::new());
  }

  let mut documents = Vec::new();
  for entry in WalkDir::new(&dir)
    .min_depth(1)
    .max_depth(1)
    .sort_by_file_name()
  {
    let entry = entry
      .wrap_err_with(|| format!("Failed to list group folder {}", dir.display()))?;
    let path = entry.path();
    if !entry.file_type().is_file()
      || path.extension().is_none_or(|ext| ext != "md")
    {
      continue;
    }

    if let Ok(rel) = path.strip_prefix(root) {
      debug!("Found document: {}", rel.display());
      documents.push(rel.to_path_buf());
    }
  }

  Ok(documents)
}

/// Output path of a document, relative to the output directory.
#[must_use]
pub fn output_rel_path(source_rel: &Path) -> PathBuf {
  source_rel.with_extension("html")
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn group(name: &str) -> Group {
    Group {
      name:  name.to_string(),
      label: name.to_string(),
    }
  }

  #[test]
  fn only_top_level_markdown_in_name_order() {
    let dir = TempDir::new().expect("temp dir");
    let pds = dir.path().join("PDS");
    fs::create_dir_all(pds.join("nested")).expect("mkdir");
    for name in ["b.md", "a.md", "notes.txt", "nested/c.md"] {
      fs::write(pds.join(name), "# x").expect("write");
    }

    let docs = collect_group_documents(dir.path(), &group("PDS")).expect("list");
    assert_eq!(docs, vec![
      PathBuf::from("PDS/a.md"),
      PathBuf::from("PDS/b.md")
    ]);
  }

  #[test]
  fn missing_group_yields_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let docs = collect_group_documents(dir.path(), &group("PRD")).expect("list");
    assert!(docs.is_empty());
  }

  #[test]
  fn output_path_swaps_extension() {
    assert_eq!(
      output_rel_path(Path::new("PRD/Идеи.md")),
      PathBuf::from("PRD/Идеи.html")
    );
  }
}
