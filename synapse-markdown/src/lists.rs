//! Nested list grouping and the recovery pass for lists a renderer folded
//! into paragraphs.
use std::{fmt::Write, sync::LazyLock};

use regex::Regex;

use crate::utils::compile_regex;

/// Kind of a list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
  /// `- item`
  Unordered,
  /// `1. item`
  Ordered,
}

impl ListKind {
  const fn tag(self) -> &'static str {
    match self {
      Self::Unordered => "ul",
      Self::Ordered => "ol",
    }
  }
}

/// A single list marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
  /// Leading whitespace width before the marker.
  pub depth: usize,
  pub kind:  ListKind,
  /// Item content after the marker.
  pub text:  String,
}

/// An item of a grouped list together with its nested items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
  pub kind:     ListKind,
  pub text:     String,
  pub children: Vec<ListNode>,
}

static MARKER_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"^(\s*)(?:(-)|\d+\.)\s+(.+?)\s*$"));

/// Parse a list marker line (`- text` or `N. text`, optionally indented).
#[must_use]
pub fn parse_marker(line: &str) -> Option<ListItem> {
  let caps = MARKER_RE.captures(line)?;
  let depth = caps.get(1).map_or(0, |m| m.as_str().chars().count());
  let kind = if caps.get(2).is_some() {
    ListKind::Unordered
  } else {
    ListKind::Ordered
  };
  Some(ListItem {
    depth,
    kind,
    text: caps[3].to_string(),
  })
}

/// Group a flat run of items into a tree.
///
/// An item deeper than the current level opens a nested group under the
/// previous item; an item shallower than the current level ends the group
/// and hands control back to the caller. When a group ends at the top, the
/// next item starts a new top-level run, so every item lands in the tree.
#[must_use]
pub fn build_tree(items: &[ListItem]) -> Vec<ListNode> {
  let mut nodes = Vec::new();
  let mut pos = 0;

  while let Some(item) = items.get(pos) {
    let (run, next) = group(items, pos, item.depth);
    nodes.extend(run);
    pos = next;
  }

  nodes
}

fn group(items: &[ListItem], start: usize, level: usize) -> (Vec<ListNode>, usize) {
  let mut nodes: Vec<ListNode> = Vec::new();
  let mut pos = start;

  while let Some(item) = items.get(pos) {
    if item.depth < level {
      break;
    }
    if item.depth > level {
      let (children, next) = group(items, pos, item.depth);
      match nodes.last_mut() {
        Some(parent) => parent.children.extend(children),
        None => nodes.extend(children),
      }
      pos = next;
      continue;
    }
    nodes.push(ListNode {
      kind:     item.kind,
      text:     item.text.clone(),
      children: Vec::new(),
    });
    pos += 1;
  }

  (nodes, pos)
}

/// Render grouped nodes as nested `<ul>`/`<ol>` markup. The list type of a
/// group is taken from its first item.
#[must_use]
pub fn render_tree(nodes: &[ListNode]) -> String {
  let mut out = String::new();
  write_group(&mut out, nodes);
  out
}

fn write_group(out: &mut String, nodes: &[ListNode]) {
  let Some(first) = nodes.first() else {
    return;
  };
  let tag = first.kind.tag();
  let _ = writeln!(out, "<{tag}>");
  for node in nodes {
    out.push_str("<li>");
    out.push_str(&node.text);
    if !node.children.is_empty() {
      out.push('\n');
      write_group(out, &node.children);
    }
    out.push_str("</li>\n");
  }
  let _ = write!(out, "</{tag}>");
}

/// Render a flat run of items, grouping by depth first.
#[must_use]
pub fn render_items(items: &[ListItem]) -> String {
  render_tree(&build_tree(items))
}

static PARAGRAPH_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"(?s)<p>(.*?)</p>"));
static BREAK_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"<br\s*/?>"));

/// Rebuild lists that a renderer folded into a paragraph.
///
/// Every `<p>` whose lines contain list markers is split into leading prose,
/// a properly nested list and trailing prose. Paragraphs without markers are
/// left as they are.
#[must_use]
pub fn recover_lists(html: &str) -> String {
  PARAGRAPH_RE
    .replace_all(html, |caps: &regex::Captures| {
      recover_paragraph(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

fn recover_paragraph(content: &str) -> Option<String> {
  let normalized = BREAK_RE.replace_all(content, "\n");
  let lines: Vec<&str> = normalized.lines().collect();

  let first_item = lines.iter().position(|l| parse_marker(l).is_some())?;

  let mut items: Vec<ListItem> = Vec::new();
  let mut last_item = first_item;
  for (idx, line) in lines.iter().enumerate().skip(first_item) {
    if let Some(item) = parse_marker(line) {
      items.push(item);
      last_item = idx;
    }
  }

  // Prose between two items continues the item above it.
  let mut continued: Vec<ListItem> = Vec::with_capacity(items.len());
  let mut marker_idx = 0;
  for line in &lines[first_item..=last_item] {
    if parse_marker(line).is_some() {
      if let Some(item) = items.get(marker_idx) {
        continued.push(item.clone());
      }
      marker_idx += 1;
    } else if let Some(prev) = continued.last_mut() {
      let extra = line.trim();
      if !extra.is_empty() {
        prev.text.push(' ');
        prev.text.push_str(extra);
      }
    }
  }

  let mut parts = Vec::new();

  let before = join_prose(&lines[..first_item]);
  if !before.is_empty() {
    parts.push(format!("<p>{before}</p>"));
  }

  parts.push(render_items(&continued));

  let after = join_prose(&lines[last_item + 1..]);
  if !after.is_empty() && parse_marker(&after).is_none() {
    parts.push(format!("<p>{after}</p>"));
  }

  Some(parts.join("\n"))
}

fn join_prose(lines: &[&str]) -> String {
  lines
    .iter()
    .map(|l| l.trim())
    .filter(|l| !l.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(depth: usize, text: &str) -> ListItem {
    ListItem {
      depth,
      kind: ListKind::Unordered,
      text: text.to_string(),
    }
  }

  #[test]
  fn nested_item_opens_group_under_previous() {
    let tree = build_tree(&[item(0, "A"), item(2, "B"), item(0, "C")]);

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].text, "A");
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].text, "B");
    assert_eq!(tree[1].text, "C");
    assert!(tree[1].children.is_empty());
  }

  #[test]
  fn nested_render_closes_in_reverse_order() {
    let html = render_items(&[item(0, "A"), item(2, "B"), item(0, "C")]);
    assert_eq!(
      html,
      "<ul>\n<li>A\n<ul>\n<li>B</li>\n</ul></li>\n<li>C</li>\n</ul>"
    );
    assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
  }

  #[test]
  fn deep_then_shallow_returns_through_every_level() {
    let tree = build_tree(&[
      item(0, "a"),
      item(2, "b"),
      item(4, "c"),
      item(0, "d"),
    ]);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].children[0].children[0].text, "c");
    assert_eq!(tree[1].text, "d");
  }

  #[test]
  fn uneven_return_depth_stays_nested() {
    let tree = build_tree(&[item(0, "a"), item(4, "b"), item(2, "c")]);
    assert_eq!(tree.len(), 1);
    let texts: Vec<&str> =
      tree[0].children.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["b", "c"]);
  }

  #[test]
  fn shallower_items_after_an_indented_start_are_kept() {
    let items: Vec<ListItem> = ["  - a", "- b", "- c"]
      .into_iter()
      .filter_map(parse_marker)
      .collect();
    let tree = build_tree(&items);
    let texts: Vec<&str> = tree.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
    assert_eq!(
      render_items(&items),
      "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>"
    );
  }

  #[test]
  fn deep_start_still_nests_later_items() {
    let tree = build_tree(&[
      item(4, "a"),
      item(0, "b"),
      item(2, "c"),
      item(0, "d"),
    ]);
    let texts: Vec<&str> = tree.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "d"]);
    assert_eq!(tree[1].children[0].text, "c");

    let html = render_tree(&tree);
    assert_eq!(html.matches("<li>").count(), 4);
    assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
  }

  #[test]
  fn ordered_markers_render_ol() {
    let items = vec![parse_marker("1. one"), parse_marker("2. two")]
      .into_iter()
      .flatten()
      .collect::<Vec<_>>();
    assert_eq!(render_items(&items), "<ol>\n<li>one</li>\n<li>two</li>\n</ol>");
  }

  #[test]
  fn parse_marker_reads_depth() {
    assert_eq!(parse_marker("    - deep"), Some(item(4, "deep")));
    assert_eq!(parse_marker("plain prose"), None);
    assert_eq!(parse_marker("-not a marker"), None);
  }

  #[test]
  fn folded_paragraph_is_split() {
    let html = "<p>Intro text:\n- A\n  - B\n- C\nTail words.</p>";
    let out = recover_lists(html);
    assert!(out.starts_with("<p>Intro text:</p>\n<ul>"));
    assert!(out.contains("<li>A\n<ul>\n<li>B</li>\n</ul></li>"));
    assert!(out.contains("<li>C Tail words.</li>"));
  }

  #[test]
  fn break_separated_items_form_one_list() {
    let html = "<p>- one<br />\n- two</p>";
    let out = recover_lists(html);
    assert_eq!(out, "<ul>\n<li>one</li>\n<li>two</li>\n</ul>");
  }

  #[test]
  fn paragraphs_without_markers_are_untouched() {
    let html = "<p>Just a - dash in prose.</p>";
    assert_eq!(recover_lists(html), html);
  }
}
