//! Cross-reference rewriting: bare document names and command tokens.
use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
  markup::{Granularity, rewrite_text},
  utils::{compile_regex, is_identifier_adjacent, slugify},
};

/// Known document names and their output paths, longest name first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReferences {
  entries: Vec<(String, String)>,
}

impl CrossReferences {
  /// Build the lookup from a `name -> output path` table.
  #[must_use]
  pub fn new(table: &BTreeMap<String, String>) -> Self {
    let mut entries: Vec<(String, String)> = table
      .iter()
      .filter(|(name, _)| !name.is_empty())
      .map(|(name, path)| (name.clone(), path.clone()))
      .collect();
    // Longest first; the BTreeMap order breaks ties deterministically.
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    Self { entries }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Output path of a known document name.
  #[must_use]
  pub fn target(&self, name: &str) -> Option<&str> {
    self
      .entries
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, path)| path.as_str())
  }

  /// Link every standalone mention of a known name in plain `text`.
  ///
  /// At each position the names are tried longest first, so a compound name
  /// wins over any shorter name it starts with. A mention is standalone
  /// when neither neighbour is an identifier-like character.
  #[must_use]
  pub fn link_text(&self, text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
      if prev.is_none_or(|p| !is_identifier_adjacent(p))
        && let Some((name, path)) = self.match_at(text, pos)
      {
        out.push_str(&format!(r#"<a href="{prefix}{path}">{name}</a>"#));
        pos += name.len();
        prev = name.chars().next_back();
        continue;
      }
      out.push(c);
      pos += c.len_utf8();
      prev = Some(c);
    }

    out
  }

  fn match_at(&self, text: &str, pos: usize) -> Option<(&str, &str)> {
    let rest = &text[pos..];
    self
      .entries
      .iter()
      .find(|(name, _)| {
        rest.starts_with(name.as_str())
          && rest[name.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_identifier_adjacent(c))
      })
      .map(|(name, path)| (name.as_str(), path.as_str()))
  }
}

/// Link bare document names in rendered HTML. Existing anchors, code
/// blocks, diagrams and tag attributes are never rewritten.
#[must_use]
pub fn link_documents(html: &str, refs: &CrossReferences, prefix: &str) -> String {
  if refs.is_empty() {
    return html.to_string();
  }
  rewrite_text(html, Granularity::Tags, |text| refs.link_text(text, prefix))
}

/// A family of commands documented under one heading of the command
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFamily {
  /// Name prefix that selects the family, e.g. `DALI_`.
  pub prefix:  String,
  /// Full heading text of the family's section, as written in Markdown.
  /// The link anchor is generated from its rendered (escaped) form the same
  /// way heading ids are.
  pub heading: String,
  /// Short section name used in the link title.
  pub label:   String,
}

impl CommandFamily {
  #[must_use]
  pub fn anchor(&self) -> String {
    slugify(&html_escape::encode_double_quoted_attribute(&self.heading))
  }
}

/// Settings for linking command tokens such as `[FW.DALI_SET(1)]` to the
/// command reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandLinks {
  /// Output path of the command reference, relative to the output root.
  pub document:       String,
  /// Display name of the command reference.
  pub document_label: String,
  /// Namespaces that mark a command token.
  pub namespaces:     Vec<String>,
  pub families:       Vec<CommandFamily>,
  /// Link title; `{section}` and `{document}` are substituted.
  pub title:          String,
}

impl Default for CommandLinks {
  fn default() -> Self {
    Self {
      document:       "PDS/SynapsePDS_USML.html".to_string(),
      document_label: "USML".to_string(),
      namespaces:     vec!["FW".to_string(), "USM".to_string()],
      families:       vec![
        CommandFamily {
          prefix:  "DALI_".to_string(),
          heading: "4.1. DALI_ — работа с линией DALI".to_string(),
          label:   "4.1. DALI_".to_string(),
        },
        CommandFamily {
          prefix:  "CONTR_".to_string(),
          heading: "4.2. CONTR_ — работа с контроллером".to_string(),
          label:   "4.2. CONTR_".to_string(),
        },
      ],
      title:          "См. {section} в {document}".to_string(),
    }
  }
}

impl CommandLinks {
  fn family(&self, name: &str) -> Option<&CommandFamily> {
    self.families.iter().find(|f| name.starts_with(&f.prefix))
  }

  fn title_for(&self, family: &CommandFamily) -> String {
    self
      .title
      .replace("{section}", &family.label)
      .replace("{document}", &self.document_label)
  }
}

static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(r"<code>(\[([A-Za-z]+)\.([A-Z][A-Z0-9_]*)\([^)]*\)\])</code>")
});

/// Link `<code>[NS.NAME(args)]</code>` tokens to the section of the command
/// reference that documents `NAME`'s family.
///
/// Tokens in an unknown namespace or without a known family prefix are left
/// as they are.
#[must_use]
pub fn link_commands(html: &str, commands: &CommandLinks, prefix: &str) -> String {
  rewrite_text(html, Granularity::Elements, |text| {
    COMMAND_RE
      .replace_all(text, |caps: &regex::Captures| {
        let known_namespace = commands.namespaces.iter().any(|ns| ns == &caps[2]);
        match commands.family(&caps[3]) {
          Some(family) if known_namespace => {
            format!(
              r#"<a href="{prefix}{}#{}" title="{}"><code>{}</code></a>"#,
              commands.document,
              family.anchor(),
              commands.title_for(family),
              &caps[1]
            )
          },
          _ => caps[0].to_string(),
        }
      })
      .into_owned()
  })
}
