use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_regex;

/// Rendered size of an icon preview, in pixels.
pub const ICON_SIZE: u32 = 64;

static ICON_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(r"(?s)<p>(\d{3}_[a-zA-Z0-9_]+\.svg)(.*?)</p>")
});

/// Prepend a preview image to every paragraph that starts with an icon file
/// name such as `100_default.svg`.
///
/// `icon_dir` is the folder holding the icons, as a link relative to the
/// output document.
#[must_use]
pub fn link_icon_lines(html: &str, icon_dir: &str) -> String {
  let dir = icon_dir.trim_end_matches('/');
  ICON_LINE_RE
    .replace_all(html, |caps: &regex::Captures| {
      let file = &caps[1];
      format!(
        r#"<p><img src="{dir}/{file}" width="{ICON_SIZE}" height="{ICON_SIZE}" alt="{file}" style="vertical-align: middle; margin-right: 15px;">{file}{}</p>"#,
        &caps[2]
      )
    })
    .into_owned()
}
