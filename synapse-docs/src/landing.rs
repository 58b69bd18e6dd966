//! Landing page refresh: diagram containers and the ship log.
//!
//! The landing page is hand-written HTML. Only two kinds of regions are
//! touched: the bodies of `<div class="mermaid" id="…">` containers and the
//! entries of the ship log block. Everything else is left byte for byte.
use std::{fs, sync::LazyLock};

use color_eyre::eyre::{Context, Result};
use log::{info, warn};
use regex::{Captures, Regex};
use synapse_markdown::{
  preprocess::first_fenced_body,
  utils::{compile_regex, try_compile_regex},
};

use crate::{
  config::{Config, LandingDiagram},
  utils::output::write_file,
};

static LOG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(r"^(\d{4}-\d{2}-\d{2}\s+\d{1,2}:\d{2})\s*[—–-]\s*(.+)$")
});

/// One line of the ship log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
  /// `YYYY-MM-DD HH:MM`, absent for lines without a timestamp.
  pub date: Option<String>,
  pub text: String,
}

/// Parse the log document: one entry per non-blank line.
#[must_use]
pub fn parse_ship_log(markdown: &str) -> Vec<LogEntry> {
  markdown
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(|line| {
      match LOG_LINE_RE.captures(line) {
        Some(caps) => {
          LogEntry {
            date: Some(caps[1].to_string()),
            text: caps[2].to_string(),
          }
        },
        None => {
          LogEntry {
            date: None,
            text: line.to_string(),
          }
        },
      }
    })
    .collect()
}

/// Render entries as the `log-entry` blocks of the landing page.
#[must_use]
pub fn render_ship_log(entries: &[LogEntry]) -> String {
  entries
    .iter()
    .map(|entry| {
      let text = html_escape::encode_text(&entry.text);
      match &entry.date {
        Some(date) => {
          format!(
            "            <div class=\"log-entry\">\n                <span \
             class=\"log-date\">{date}</span>\n                <p \
             class=\"log-text\">{text}</p>\n            </div>"
          )
        },
        None => {
          format!(
            "            <div class=\"log-entry\">\n                <p \
             class=\"log-text\">{text}</p>\n            </div>"
          )
        },
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Swap the existing entries under `heading` for `log_html`.
///
/// Returns `None` when the page has no log block with at least one entry.
#[must_use]
pub fn replace_ship_log(page: &str, heading: &str, log_html: &str) -> Option<String> {
  let pattern = format!(
    r#"(?s)(<div class="hero-log">.*?<h3>{}</h3>\s*)((?:<div class="log-entry">.*?</div>\s*)+)(\s*</div>)"#,
    regex::escape(heading)
  );
  let re = try_compile_regex(&pattern).ok()?;
  if !re.is_match(page) {
    return None;
  }

  Some(
    re.replace(page, |caps: &Captures| {
      format!("{}\n{log_html}\n        {}", &caps[1], &caps[3])
    })
    .into_owned(),
  )
}

/// Diagram text for a landing container: the first diagram of the source
/// document with the configured rewrites and required lines applied.
#[must_use]
pub fn prepare_diagram(markdown: &str, diagram: &LandingDiagram) -> Option<String> {
  let mut body = first_fenced_body(markdown, "mermaid")?.trim().to_string();

  for rewrite in &diagram.rewrites {
    body = body.replace(&rewrite.from, &rewrite.to);
  }
  for ensure in &diagram.ensure {
    if !body.contains(&ensure.marker) {
      body.push('\n');
      body.push_str(&ensure.line);
    }
  }

  Some(body)
}

/// Replace the body of the diagram container with id `id`.
///
/// Returns `None` when the page has no such container.
#[must_use]
pub fn replace_diagram(page: &str, id: &str, body: &str) -> Option<String> {
  let pattern = format!(
    r#"(?s)(<div class="mermaid" id="{}"[^>]*>)(.*?)(</div>)"#,
    regex::escape(id)
  );
  let re = try_compile_regex(&pattern).ok()?;
  if !re.is_match(page) {
    return None;
  }

  Some(
    re.replace(page, |caps: &Captures| {
      format!("{}\n{body}\n            {}", &caps[1], &caps[3])
    })
    .into_owned(),
  )
}

/// Refresh the landing page in the output directory.
///
/// Missing inputs are logged and skipped; the page is only written when
/// something changed.
pub fn update_landing(config: &Config) -> Result<()> {
  let page_path = config.output_dir().join(&config.landing.page);
  let Ok(original) = fs::read_to_string(&page_path) else {
    warn!("Landing page not found: {}", page_path.display());
    return Ok(());
  };

  let mut page = original.clone();

  for diagram in &config.landing.diagrams {
    let source_path = config.root.join(&diagram.source);
    let Ok(source) = fs::read_to_string(&source_path) else {
      warn!("Diagram source not found: {}", source_path.display());
      continue;
    };
    let Some(body) = prepare_diagram(&source, diagram) else {
      warn!("No diagram found in {}", source_path.display());
      continue;
    };
    match replace_diagram(&page, &diagram.id, &body) {
      Some(updated) => {
        info!("  [OK] Updated diagram {}", diagram.id);
        page = updated;
      },
      None => warn!("Diagram container {} not found", diagram.id),
    }
  }

  let log = &config.landing.ship_log;
  let log_path = config.root.join(&log.source);
  match fs::read_to_string(&log_path) {
    Ok(content) => {
      let entries = parse_ship_log(&content);
      if entries.is_empty() {
        warn!("No log entries found in {}", log_path.display());
      } else if let Some(updated) =
        replace_ship_log(&page, &log.heading, &render_ship_log(&entries))
      {
        info!("  [OK] Updated ship log with {} entries", entries.len());
        page = updated;
      } else {
        warn!("Could not find the log section in {}", page_path.display());
      }
    },
    Err(_) => warn!("Log file not found: {}", log_path.display()),
  }

  if page != original {
    write_file(&page_path, &page)
      .wrap_err_with(|| format!("Failed to update {}", page_path.display()))?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{EnsureLine, Rewrite};

  #[test]
  fn dated_and_undated_lines() {
    let entries =
      parse_ship_log("2025-03-01 9:15 — First release\n\n  plain note  \n2025-03-02 10:00-fix");
    assert_eq!(entries, vec![
      LogEntry {
        date: Some("2025-03-01 9:15".to_string()),
        text: "First release".to_string(),
      },
      LogEntry {
        date: None,
        text: "plain note".to_string(),
      },
      LogEntry {
        date: Some("2025-03-02 10:00".to_string()),
        text: "fix".to_string(),
      },
    ]);
  }

  #[test]
  fn rendered_entries_escape_text() {
    let html = render_ship_log(&[LogEntry {
      date: None,
      text: "a <b> & c".to_string(),
    }]);
    assert_eq!(
      html,
      "            <div class=\"log-entry\">\n                <p \
       class=\"log-text\">a &lt;b&gt; &amp; c</p>\n            </div>"
    );
  }

  #[test]
  fn ship_log_replaces_only_entries() {
    let page = "<div class=\"hero-log\">\n        <h3>Судовой журнал</h3>\n        \
                <div class=\"log-entry\"><p class=\"log-text\">old</p></div>\n    \
                </div>\n<div class=\"log-entry\">outside</div>";
    let updated =
      replace_ship_log(page, "Судовой журнал", "NEW").expect("log block found");
    assert!(!updated.contains(">old<"));
    assert!(updated.contains("<h3>Судовой журнал</h3>\n        \nNEW\n        "));
    assert!(updated.ends_with("<div class=\"log-entry\">outside</div>"));
    assert!(replace_ship_log("<p>none</p>", "Судовой журнал", "NEW").is_none());
  }

  #[test]
  fn diagram_rewrites_and_required_lines() {
    let diagram = LandingDiagram {
      id:       "process-diagram".to_string(),
      source:   "Project/process.md".into(),
      rewrites: vec![Rewrite {
        from: "https://example.com/PRD.html".to_string(),
        to:   "PRD.html".to_string(),
      }],
      ensure:   vec![
        EnsureLine {
          marker: "click A".to_string(),
          line:   "    click A \"a.html\"".to_string(),
        },
        EnsureLine {
          marker: "click B".to_string(),
          line:   "    click B \"b.html\"".to_string(),
        },
      ],
    };
    let md = "# Process\n\n```mermaid\ngraph TD\n    click B \
              \"https://example.com/PRD.html\"\n```\n";
    let body = prepare_diagram(md, &diagram).expect("diagram");
    assert_eq!(body, "graph TD\n    click B \"PRD.html\"\n    click A \"a.html\"");
    assert!(prepare_diagram("no diagram", &diagram).is_none());
  }

  #[test]
  fn diagram_container_body_is_swapped() {
    let page = "<div class=\"mermaid\" id=\"mindmap-diagram\" \
                style=\"x\">\nold\n</div><div class=\"mermaid\" \
                id=\"other\">keep</div>";
    let updated =
      replace_diagram(page, "mindmap-diagram", "mindmap\n  root").expect("found");
    assert_eq!(
      updated,
      "<div class=\"mermaid\" id=\"mindmap-diagram\" style=\"x\">\nmindmap\n  \
       root\n            </div><div class=\"mermaid\" id=\"other\">keep</div>"
    );
    assert!(replace_diagram(page, "missing", "x").is_none());
  }
}
