use std::collections::HashMap;

pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const DIAGRAM_TEMPLATE: &str = include_str!("../templates/diagram.html");

#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates = HashMap::new();
  templates.insert("page.html", PAGE_TEMPLATE);
  templates.insert("diagram.html", DIAGRAM_TEMPLATE);
  templates
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_template_binds_every_slot() {
    for slot in [
      "{{ title }}",
      "{{ css_path }}",
      "{{ js_path }}",
      "{{ root_path }}",
      "{{ breadcrumbs }}",
      "{{ source_url }}",
      "{{ page_title }}",
      "{{ toc }}",
      "{{ content }}",
    ] {
      assert!(PAGE_TEMPLATE.contains(slot), "missing {slot}");
    }
  }

  #[test]
  fn diagram_template_is_self_contained() {
    assert!(DIAGRAM_TEMPLATE.contains("{{ diagram_code }}"));
    assert!(DIAGRAM_TEMPLATE.contains("{{ js_path }}"));
    assert!(!DIAGRAM_TEMPLATE.contains("style.css"));
  }
}
