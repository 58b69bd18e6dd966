//! Built-in settings for the Synapse repository layout.
use std::collections::BTreeMap;

use super::{EnsureLine, Group, IconSet, LandingDiagram, Rewrite, SchemaEmbed};

pub const SCHEMA_MARKER: &str = "**Последнее изменение:**";

const PRD_DOCUMENTS: &[&str] = &["SynapsePRD", "Идеи"];

const PDS_DOCUMENTS: &[&str] = &[
  "SynapsePDS_APP",
  "SynapsePDS_APP_Bluetooth",
  "SynapsePDS_APP_UI",
  "SynapsePDS_APP_UX",
  "SynapsePDS_Bluetooth",
  "SynapsePDS_APP_DB",
  "SynapsePDS_DB_scheme",
  "SynapsePDS_APP_DB_scheme",
  "SynapsePDS_FW_DB_scheme",
  "SynapsePDS_FW",
  "SynapsePDS_FW_DB",
  "SynapsePDS_FW_Bluetooth",
  "SynapsePDS_FW_Logic",
  "SynapsePDS_Icons_Controllers",
  "SynapsePDS_Icons_Locations",
  "SynapsePDS_Icons_Luminaires",
  "SynapsePDS_Icons_System",
  "SynapsePDS_LLM",
  "SynapsePDS_USML",
];

pub fn groups() -> Vec<Group> {
  ["PRD", "PDS"]
    .into_iter()
    .map(|name| {
      Group {
        name:  name.to_string(),
        label: name.to_string(),
      }
    })
    .collect()
}

pub fn documents() -> BTreeMap<String, String> {
  let prd = PRD_DOCUMENTS.iter().map(|name| (*name, "PRD"));
  let pds = PDS_DOCUMENTS.iter().map(|name| (*name, "PDS"));
  prd
    .chain(pds)
    .map(|(name, group)| (name.to_string(), format!("{group}/{name}.html")))
    .collect()
}

pub fn schema_embeds() -> Vec<SchemaEmbed> {
  ["APP", "FW"]
    .into_iter()
    .map(|part| {
      SchemaEmbed {
        document: format!("PDS/SynapsePDS_{part}_DB.md").into(),
        source:   format!("PDS/SynapsePDS_{part}_DB_scheme.md").into(),
        marker:   SCHEMA_MARKER.to_string(),
      }
    })
    .collect()
}

pub fn icon_sets() -> Vec<IconSet> {
  [
    ("Controllers", "Controller"),
    ("Luminaires", "Luminaire"),
    ("Locations", "Location"),
    ("System", "System"),
  ]
  .into_iter()
  .map(|(document, folder)| {
    IconSet {
      document: format!("PDS/SynapsePDS_Icons_{document}.md").into(),
      dir:      format!("MOBILE/Images/Ico/{folder}").into(),
    }
  })
  .collect()
}

pub fn landing_diagrams() -> Vec<LandingDiagram> {
  let ensure = [
    ("DSUI", "PDS/SynapsePDS_APP_UI.html"),
    ("DSFW", "PDS/SynapsePDS_FW.html"),
    ("DSAPP", "PDS/SynapsePDS_APP.html"),
  ]
  .into_iter()
  .map(|(node, target)| {
    EnsureLine {
      marker: format!("click {node}"),
      line:   format!("    click {node} \"{target}\""),
    }
  })
  .collect();

  vec![
    LandingDiagram {
      id:       "process-diagram".to_string(),
      source:   "Project/process.md".into(),
      rewrites: vec![Rewrite {
        from: "click PRD \"https://khudyakovalex.github.io/Synapse/INDEX/PRD/SynapsePRD.html\""
          .to_string(),
        to:   "click PRD \"PRD/SynapsePRD.html\"".to_string(),
      }],
      ensure,
    },
    LandingDiagram {
      id:       "mindmap-diagram".to_string(),
      source:   "Project/mindmap.md".into(),
      rewrites: Vec::new(),
      ensure:   Vec::new(),
    },
  ]
}
