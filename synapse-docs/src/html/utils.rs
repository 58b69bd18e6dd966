use std::{
  fmt::Write,
  path::{Component, Path, PathBuf},
};

use synapse_markdown::{Header, utils::root_relative_prefix};

use crate::config::Config;

/// Build the breadcrumb trail of a page: home, group, document stem.
///
/// `rel_path` is the output path relative to the output directory. A page
/// outside any configured group gets no group crumb.
#[must_use]
pub fn breadcrumbs(config: &Config, rel_path: &Path) -> String {
  let root = root_relative_prefix(rel_path);
  let mut crumbs = vec![
    format!(
      r#"<a href="{root}index.html">{}</a>"#,
      html_escape::encode_text(&config.site.home_label)
    ),
    "<span>›</span>".to_string(),
  ];

  let group = rel_path
    .parent()
    .and_then(Path::to_str)
    .filter(|name| !name.is_empty());
  if let Some(name) = group {
    let label = config.group(name).map_or(name, |g| g.label.as_str());
    crumbs.push(format!(
      r#"<a href="{root}index.html#{}">{}</a>"#,
      name.to_lowercase(),
      html_escape::encode_text(label)
    ));
    crumbs.push("<span>›</span>".to_string());
  }

  let stem = rel_path
    .file_stem()
    .map(|s| s.to_string_lossy())
    .unwrap_or_default();
  crumbs.push(format!("<span>{}</span>", html_escape::encode_text(&stem)));

  crumbs.join("\n        ")
}

/// Link to the Markdown source of a document, given relative to the source
/// root.
#[must_use]
pub fn source_url(config: &Config, source_rel: &Path) -> String {
  let rel = source_rel
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/");
  format!("{}/{rel}", config.source_url.trim_end_matches('/'))
}

/// Sidebar entries for the second and third level headers.
#[must_use]
pub fn generate_toc(headers: &[Header]) -> String {
  let mut toc = String::new();
  for header in headers.iter().filter(|h| matches!(h.level, 2 | 3)) {
    let class = if header.level == 3 { r#" class="toc-sub""# } else { "" };
    let _ = writeln!(
      toc,
      r##"                <li{class}><a href="#{}">{}</a></li>"##,
      header.id,
      html_escape::encode_text(&header.text)
    );
  }
  toc.trim_end().to_string()
}

/// Relative URL from the directory `from_dir` to `to`.
///
/// Both paths are made absolute against the working directory first.
#[must_use]
pub fn relative_link(from_dir: &Path, to: &Path) -> String {
  let from = normalize(from_dir);
  let to = normalize(to);

  let common = from
    .components()
    .zip(to.components())
    .take_while(|(a, b)| a == b)
    .count();

  let ups = from.components().count().saturating_sub(common);
  let mut parts: Vec<String> = std::iter::repeat_n("..".to_string(), ups).collect();
  parts.extend(
    to.components()
      .skip(common)
      .map(|c| c.as_os_str().to_string_lossy().into_owned()),
  );

  if parts.is_empty() {
    ".".to_string()
  } else {
    parts.join("/")
  }
}

/// Absolute form of `path` with `.` and `..` folded, without touching the
/// filesystem.
fn normalize(path: &Path) -> PathBuf {
  let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
  let mut out = PathBuf::new();
  for component in absolute.components() {
    match component {
      Component::CurDir => {},
      Component::ParentDir => {
        out.pop();
      },
      other => out.push(other.as_os_str()),
    }
  }
  out
}
