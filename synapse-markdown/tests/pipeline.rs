use std::collections::BTreeMap;

use synapse_markdown::{
  CommandLinks,
  DocumentContext,
  Engine,
  MarkdownOptions,
  MarkdownProcessor,
};

fn documents() -> BTreeMap<String, String> {
  [
    ("SynapsePDS_FW", "PDS/SynapsePDS_FW.html"),
    ("SynapsePDS_FW_DB", "PDS/SynapsePDS_FW_DB.html"),
    ("SynapsePDS_USML", "PDS/SynapsePDS_USML.html"),
    ("SynapsePRD", "PRD/SynapsePRD.html"),
  ]
  .into_iter()
  .map(|(name, path)| (name.to_string(), path.to_string()))
  .collect()
}

fn processor(engine: Engine) -> MarkdownProcessor {
  MarkdownProcessor::new(MarkdownOptions {
    engine,
    documents: documents(),
    commands: Some(CommandLinks::default()),
    ..Default::default()
  })
}

fn engines() -> [Engine; 2] {
  [Engine::Comrak, Engine::Simple]
}

fn compact(html: &str) -> String {
  html.replace('\n', "")
}

#[test]
fn nested_list_groups_by_indentation() {
  for engine in engines() {
    let result = processor(engine)
      .render("- A\n  - B\n- C\n", &DocumentContext::new("PDS/list.html"));
    assert!(
      compact(&result.html)
        .contains("<ul><li>A<ul><li>B</li></ul></li><li>C</li></ul>"),
      "{engine}: {}",
      result.html
    );
  }
}

#[test]
fn indented_first_item_keeps_the_rest_of_the_list() {
  for engine in engines() {
    let result = processor(engine)
      .render("  - a\n- b\n- c\n", &DocumentContext::new("PDS/list.html"));
    assert!(
      compact(&result.html).contains("<ul><li>a</li><li>b</li><li>c</li></ul>"),
      "{engine}: {}",
      result.html
    );
  }
}

#[test]
fn ordered_list_nests_inside_unordered() {
  for engine in engines() {
    let result = processor(engine).render(
      "- A\n  1. one\n  2. two\n- B\n",
      &DocumentContext::new("PDS/list.html"),
    );
    assert!(
      compact(&result.html)
        .contains("<ul><li>A<ol><li>one</li><li>two</li></ol></li><li>B</li></ul>"),
      "{engine}: {}",
      result.html
    );
  }
}

#[test]
fn list_folded_into_paragraph_is_recovered() {
  let html = "<p>Steps:\n- one\n  - one.a\n- two</p>";
  let recovered = synapse_markdown::lists::recover_lists(html);
  assert_eq!(
    compact(&recovered),
    "<p>Steps:</p><ul><li>one<ul><li>one.a</li></ul></li><li>two</li></ul>"
  );
}

#[test]
fn compound_document_name_is_linked_whole() {
  for engine in engines() {
    let result = processor(engine).render(
      "See SynapsePDS_FW_DB and SynapsePDS_FW.",
      &DocumentContext::new("PRD/SynapsePRD.html"),
    );
    assert!(
      result
        .html
        .contains(r#"<a href="../PDS/SynapsePDS_FW_DB.html">SynapsePDS_FW_DB</a>"#),
      "{engine}: {}",
      result.html
    );
    assert!(
      result
        .html
        .contains(r#"<a href="../PDS/SynapsePDS_FW.html">SynapsePDS_FW</a>."#)
    );
    assert_eq!(result.html.matches("<a href=").count(), 2);
  }
}

#[test]
fn explicit_links_are_not_rewritten() {
  let result = processor(Engine::Comrak).render(
    "[the firmware spec](https://example.com/SynapsePDS_FW) SynapsePDS_FW",
    &DocumentContext::new("index.html"),
  );
  assert!(
    result
      .html
      .contains(r#"<a href="https://example.com/SynapsePDS_FW">the firmware spec</a>"#)
  );
  assert!(
    result
      .html
      .contains(r#"<a href="PDS/SynapsePDS_FW.html">SynapsePDS_FW</a>"#)
  );
}

#[test]
fn long_url_label_is_shorter_than_target() {
  let url = "https://github.com/KhudyakovAlex/Synapse/blob/master/PDS/SynapsePDS_FW.md";
  for engine in engines() {
    let result = processor(engine)
      .render(&format!("Source: {url}"), &DocumentContext::new("PDS/a.html"));
    let html = result.html;
    let href = format!(r#"<a href="{url}" target="_blank">"#);
    let start = html.find(&href).map(|i| i + href.len());
    let label = start
      .and_then(|s| html[s..].find("</a>").map(|e| &html[s..s + e]))
      .unwrap_or_default();
    assert!(!label.is_empty(), "{engine}: {html}");
    assert!(label.chars().count() < url.chars().count());
    assert!(label.contains(" ... "));
  }
}

#[test]
fn urls_inside_code_spans_are_not_linked() {
  for engine in engines() {
    let result = processor(engine).render(
      "Call `https://api.example.com/v1` now\n",
      &DocumentContext::new("PDS/a.html"),
    );
    assert!(
      result
        .html
        .contains("<code>https://api.example.com/v1</code>"),
      "{engine}: {}",
      result.html
    );
    assert!(!result.html.contains("<a href"), "{engine}: {}", result.html);
  }
}

#[test]
fn diagram_indices_are_contiguous() {
  let md = "# Flows\n\n```mermaid\ngraph TD\nA-->B\n```\n\ntext\n\n```mermaid\n\
            sequenceDiagram\nA->>B: hi\n```\n\n```rust\nfn main() {}\n```\n\n```mermaid\n\
            erDiagram\n```\n";
  for engine in engines() {
    let result = processor(engine).render(md, &DocumentContext::new("PDS/Flows.html"));
    let indices: Vec<usize> = result.diagrams.iter().map(|d| d.index).collect();
    assert_eq!(indices, vec![0, 1, 2], "{engine}");
    let names: Vec<&str> = result
      .diagrams
      .iter()
      .map(|d| d.file_name.as_str())
      .collect();
    assert_eq!(names, vec![
      "Flows_diagram_0.html",
      "Flows_diagram_1.html",
      "Flows_diagram_2.html",
    ]);
    assert!(result.diagrams[1].source.contains("A->>B: hi"));
    assert_eq!(result.html.matches("data-diagram-url=").count(), 3);
  }
}

#[test]
fn rendering_is_deterministic() {
  let md = "# Title\n\n## Section\n\nSynapsePRD links to https://example.com.\n\n\
            - a\n  - b\n\n```mermaid\ngraph TD\nA-->B\n```\n";
  for engine in engines() {
    let p = processor(engine);
    let ctx = DocumentContext::new("PRD/Title.html");
    assert_eq!(p.render(md, &ctx), p.render(md, &ctx), "{engine}");
  }
}

#[test]
fn command_links_point_at_generated_heading_ids() {
  let p = processor(Engine::Comrak);
  let reference = p.render(
    "# USML\n\n## 4.1. DALI_ — работа с линией DALI\n\nUse `[FW.DALI_SET(1)]`.",
    &DocumentContext::new("PDS/SynapsePDS_USML.html"),
  );
  let heading = reference
    .headers
    .iter()
    .find(|h| h.level == 2)
    .map(|h| h.id.clone())
    .unwrap_or_default();
  assert_eq!(heading, "41-dali-работа-с-линией-dali");
  // The reference itself never links to itself.
  assert!(reference.html.contains("<code>[FW.DALI_SET(1)]</code>"));
  assert!(!reference.html.contains("SynapsePDS_USML.html#"));

  let user = p.render(
    "Send `[FW.DALI_SET(1)]` and `[FW.OTHER_CMD()]`.",
    &DocumentContext::new("PDS/SynapsePDS_FW.html"),
  );
  assert!(
    user
      .html
      .contains(&format!(r#"href="../PDS/SynapsePDS_USML.html#{heading}""#))
  );
  assert!(user.html.contains("<code>[FW.OTHER_CMD()]</code>"));
}

#[test]
fn heading_ids_keep_entity_names() {
  let result = processor(Engine::Comrak)
    .render("## Q&A\n", &DocumentContext::new("PDS/a.html"));
  assert!(
    result.html.contains(r#"<h2 id="qampa">Q&amp;A</h2>"#),
    "{}",
    result.html
  );
}

#[test]
fn icon_documents_get_previews() {
  let result = processor(Engine::Comrak).render(
    "100_default.svg - default controller\n\n101_hub.svg - hub",
    &DocumentContext::new("PDS/SynapsePDS_Icons_Controllers.html")
      .with_icon_dir("../../MOBILE/Images/Ico/Controller"),
  );
  assert_eq!(result.html.matches("<img ").count(), 2);
  assert!(
    result
      .html
      .contains(r#"<img src="../../MOBILE/Images/Ico/Controller/101_hub.svg""#)
  );
}
