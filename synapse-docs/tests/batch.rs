use std::{fs, path::Path};

use synapse_docs::{config::Config, utils::process_markdown_files};
use synapse_markdown::Engine;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("create dirs");
  }
  fs::write(path, content).expect("write file");
}

fn read(root: &Path, rel: &str) -> String {
  fs::read_to_string(root.join(rel)).expect("read output")
}

fn repository() -> TempDir {
  let dir = TempDir::new().expect("temp dir");
  let root = dir.path();
  write(
    root,
    "PRD/SynapsePRD.md",
    "# Synapse PRD\n\n## Goals\n\nSee SynapsePDS_FW for firmware.\n\n```mermaid\ngraph \
     TD\nA-->B\n```\n\n```mermaid\ngraph LR\nC-->D\n```\n",
  );
  write(
    root,
    "PDS/SynapsePDS_FW.md",
    "# Firmware\n\n## Overview\n\n- one\n  - nested\n- two\n\nBack to SynapsePRD.\n",
  );
  write(root, "PDS/notes.txt", "not markdown");
  dir
}

fn config_for(dir: &TempDir) -> Config {
  Config {
    root: dir.path().to_path_buf(),
    ..Default::default()
  }
}

#[test]
fn converts_groups_into_output_tree() {
  let dir = repository();
  let config = config_for(&dir);

  let report = process_markdown_files(&config).expect("batch runs");
  assert_eq!(report.converted, 2);
  assert_eq!(report.failed, 0);
  assert_eq!(report.diagrams, 2);

  let out = dir.path().join("INDEX");
  assert!(out.join("PRD/SynapsePRD.html").is_file());
  assert!(out.join("PDS/SynapsePDS_FW.html").is_file());
  assert!(out.join("PRD/SynapsePRD_diagram_0.html").is_file());
  assert!(out.join("PRD/SynapsePRD_diagram_1.html").is_file());
  assert!(!out.join("PDS/notes.html").exists());
}

#[test]
fn page_shell_is_filled() {
  let dir = repository();
  let config = config_for(&dir);
  process_markdown_files(&config).expect("batch runs");

  let page = read(dir.path(), "INDEX/PRD/SynapsePRD.html");
  assert!(page.contains("<title>Synapse PRD - Synapse"));
  assert!(page.contains(r#"href="../assets/css/style.css""#));
  assert!(page.contains(r#"<a href="../index.html#prd">PRD</a>"#));
  assert!(page.contains("<span>SynapsePRD</span>"));
  assert!(
    page.contains("https://github.com/KhudyakovAlex/Synapse/blob/master/PRD/SynapsePRD.md")
  );
  assert!(page.contains(r#"<h2 id="goals">Goals</h2>"#));
  assert!(page.contains(r##"<a href="#goals">Goals</a>"##));
  assert!(page.contains(r#"<a href="../PDS/SynapsePDS_FW.html">SynapsePDS_FW</a>"#));
  assert!(page.contains(r#"data-diagram-url="SynapsePRD_diagram_1.html""#));
  // The level-1 heading moves to the title region, out of the content.
  assert_eq!(page.matches("<h1").count(), 1);

  let diagram = read(dir.path(), "INDEX/PRD/SynapsePRD_diagram_0.html");
  assert!(diagram.contains("Synapse PRD - Диаграмма 1"));
  assert!(diagram.contains(r#"href="SynapsePRD.html""#));
  assert!(diagram.contains("A-->B"));
}

#[test]
fn repeated_runs_give_identical_output() {
  let dir = repository();
  let config = config_for(&dir);

  process_markdown_files(&config).expect("first run");
  let first = read(dir.path(), "INDEX/PDS/SynapsePDS_FW.html");
  let first_diagram = read(dir.path(), "INDEX/PRD/SynapsePRD_diagram_1.html");

  process_markdown_files(&config).expect("second run");
  assert_eq!(read(dir.path(), "INDEX/PDS/SynapsePDS_FW.html"), first);
  assert_eq!(
    read(dir.path(), "INDEX/PRD/SynapsePRD_diagram_1.html"),
    first_diagram
  );
}

#[test]
fn both_engines_nest_lists() {
  for engine in [Engine::Comrak, Engine::Simple] {
    let dir = repository();
    let config = Config {
      engine,
      ..config_for(&dir)
    };
    process_markdown_files(&config).expect("batch runs");
    let page = read(dir.path(), "INDEX/PDS/SynapsePDS_FW.html").replace('\n', "");
    assert!(
      page.contains("<ul><li>one<ul><li>nested</li></ul></li><li>two</li></ul>"),
      "{engine}"
    );
  }
}

#[test]
fn unreadable_document_is_counted_and_skipped() {
  let dir = repository();
  // Invalid UTF-8 cannot be read as text.
  fs::write(dir.path().join("PDS/Broken.md"), [0xff, 0xfe, 0x00]).expect("write");
  let config = config_for(&dir);

  let report = process_markdown_files(&config).expect("batch still runs");
  assert_eq!(report.converted, 2);
  assert_eq!(report.failed, 1);
  assert!(!dir.path().join("INDEX/PDS/Broken.html").exists());
}

#[test]
fn document_without_heading_uses_file_stem() {
  let dir = TempDir::new().expect("temp dir");
  write(dir.path(), "PDS/Plain.md", "Just text.\n");
  let config = config_for(&dir);
  process_markdown_files(&config).expect("batch runs");

  let page = read(dir.path(), "INDEX/PDS/Plain.html");
  assert!(page.contains("<title>Plain - Synapse"));
  assert!(page.contains("<p>Just text.</p>"));
}

#[test]
fn schema_embed_adds_diagram_page() {
  let dir = TempDir::new().expect("temp dir");
  write(
    dir.path(),
    "PDS/SynapsePDS_APP_DB.md",
    "# App DB\n\n**Последнее изменение:** 2025-01-01\n\n## Tables\n",
  );
  write(
    dir.path(),
    "PDS/SynapsePDS_APP_DB_scheme.md",
    "# Scheme\n\n```mermaid\nerDiagram\n  USER ||--o{ ROOM : owns\n```\n",
  );
  let config = config_for(&dir);
  let report = process_markdown_files(&config).expect("batch runs");
  assert_eq!(report.converted, 2);

  let page = read(dir.path(), "INDEX/PDS/SynapsePDS_APP_DB.html");
  assert!(page.contains(r#"data-diagram-url="SynapsePDS_APP_DB_diagram_0.html""#));
  assert!(
    dir
      .path()
      .join("INDEX/PDS/SynapsePDS_APP_DB_diagram_0.html")
      .is_file()
  );
}

#[test]
fn explicit_output_dir_is_honoured() {
  let dir = repository();
  let out = TempDir::new().expect("output dir");
  let config = Config {
    output_dir: Some(out.path().to_path_buf()),
    ..config_for(&dir)
  };
  process_markdown_files(&config).expect("batch runs");
  assert!(out.path().join("PRD/SynapsePRD.html").is_file());
  assert!(!dir.path().join("INDEX").exists());
}
