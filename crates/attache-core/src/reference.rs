//! Reference options: the lookup values behind selection controls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which lookup list a selection control draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceList {
  Industries,
  Skills,
}

impl ReferenceList {
  pub const ALL: [ReferenceList; 2] = [ReferenceList::Industries, ReferenceList::Skills];

  /// Path of the list endpoint, relative to the API root.
  pub fn endpoint(self) -> &'static str {
    match self {
      ReferenceList::Industries => "/industries/",
      ReferenceList::Skills => "/skills/",
    }
  }

  /// Label shown while nothing is selected.
  pub fn placeholder(self) -> &'static str {
    match self {
      ReferenceList::Industries => "Select an industry",
      ReferenceList::Skills => "Select a skill",
    }
  }
}

impl fmt::Display for ReferenceList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      ReferenceList::Industries => "industries",
      ReferenceList::Skills => "skills",
    })
  }
}

/// One lookup value. Immutable from the client's point of view.
///
/// Industries arrive as `{industry_id, industry_name}` and skills as
/// `{skill_id, name}`; both decode into this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOption {
  #[serde(alias = "industry_id", alias = "skill_id")]
  pub id:   String,
  #[serde(alias = "industry_name", alias = "skill_name")]
  pub name: String,
}

/// Display name of the option with `id`, if present in `options`.
pub fn label_for<'a>(options: &'a [ReferenceOption], id: &str) -> Option<&'a str> {
  options.iter().find(|o| o.id == id).map(|o| o.name.as_str())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_both_wire_shapes() {
    let industries: Vec<ReferenceOption> = serde_json::from_str(
      r#"[{"industry_id":"IND01","industry_name":"Mining"}]"#,
    )
    .unwrap();
    let skills: Vec<ReferenceOption> =
      serde_json::from_str(r#"[{"skill_id":"SK07","name":"Python"}]"#).unwrap();

    assert_eq!(industries[0], ReferenceOption { id: "IND01".into(), name: "Mining".into() });
    assert_eq!(skills[0], ReferenceOption { id: "SK07".into(), name: "Python".into() });
    assert_eq!(label_for(&skills, "SK07"), Some("Python"));
    assert_eq!(label_for(&skills, "SK99"), None);
  }
}
