//! `templates.toml`: candidate missions for procedural selection

use std::path::Path;

use serde::Deserialize;

use crate::core::error::Result;
use crate::core::types::{Seconds, TIME_NEVER};
use crate::defs::{label, rank, read_def, window, ExtraKeys};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemplateDef {
    pub id: i32,
    pub name: String,
    pub script: String,
    #[serde(alias = "rgn")]
    pub region: String,
    #[serde(rename = "type")]
    pub mission_type: String,
    #[serde(rename = "group")]
    pub group_type: String,
    #[serde(deserialize_with = "rank")]
    pub min_rank: i32,
    #[serde(deserialize_with = "rank")]
    pub max_rank: i32,
    pub action_id: i32,
    #[serde(deserialize_with = "label")]
    pub action_status: Option<String>,
    pub exec_once: i32,
    #[serde(skip)]
    pub start_before: Seconds,
    #[serde(skip)]
    pub start_after: Seconds,
    #[serde(flatten)]
    pub extra: ExtraKeys,
}

impl Default for TemplateDef {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            script: String::new(),
            region: String::new(),
            mission_type: String::new(),
            group_type: String::new(),
            min_rank: 0,
            max_rank: 0,
            action_id: 0,
            action_status: None,
            exec_once: 0,
            start_before: TIME_NEVER,
            start_after: 0,
            extra: ExtraKeys::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    mission: Vec<TemplateDef>,
}

pub fn load_templates(path: &Path) -> Result<Vec<TemplateDef>> {
    let file: TemplateFile = read_def(path)?;
    let name = path.display().to_string();

    let mut templates = file.mission;
    for t in &mut templates {
        let (before, after) = window(&t.extra, &name)?;
        t.start_before = before.unwrap_or(TIME_NEVER);
        t.start_after = after.unwrap_or(0);
    }
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates.toml");
        fs::write(
            &path,
            r#"
            [[mission]]
            id = 10
            name = "Fighter Patrol"
            script = "tpl/patrol.toml"
            rgn = "Ostara"
            type = "patrol"
            group = "wing"
            action_id = 3
            action_status = "complete"
            exec_once = 1
            start_after = "1/02:00:00"
            "#,
        )
        .unwrap();

        let list = load_templates(&path).unwrap();
        assert_eq!(list.len(), 1);
        let t = &list[0];
        assert_eq!(t.region, "Ostara");
        assert_eq!(t.group_type, "wing");
        assert_eq!(t.action_id, 3);
        assert_eq!(t.exec_once, 1);
        assert_eq!(t.start_after, 2 * 3600);
        assert_eq!(t.start_before, TIME_NEVER);
        assert_eq!(t.max_rank, 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_templates(&dir.path().join("templates.toml")).is_err());
    }

    #[test]
    fn test_numeric_action_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates.toml");
        fs::write(
            &path,
            r#"
            [[mission]]
            id = 11
            type = "strike"
            group = "wing"
            min_rank = "captain"
            action_id = 3
            action_status = 4
            mission_before = 7200
            "#,
        )
        .unwrap();

        let t = &load_templates(&path).unwrap()[0];
        assert_eq!(t.action_status.as_deref(), Some("4"));
        assert_eq!(t.start_before, 7200);
        assert_eq!(t.min_rank, 5);
    }
}
