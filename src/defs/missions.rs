//! `missions.toml` mission lists and one-file custom missions

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::core::error::Result;
use crate::core::types::Seconds;
use crate::defs::{read_def, start_time, text_block};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissionDef {
    pub id: i32,
    pub name: String,
    #[serde(deserialize_with = "text_block")]
    pub desc: String,
    #[serde(deserialize_with = "start_time")]
    pub start: Seconds,
    pub system: String,
    #[serde(alias = "rgn")]
    pub region: String,
    pub script: String,
    #[serde(rename = "type")]
    pub mission_type: String,
}

#[derive(Debug, Default, Deserialize)]
struct MissionList {
    #[serde(default)]
    mission: Vec<MissionDef>,
}

/// Every `[[mission]]` record of a mission list
pub fn load_mission_list(path: &Path) -> Result<Vec<MissionDef>> {
    let list: MissionList = read_def(path)?;
    Ok(list.mission)
}

/// Custom missions: one mission per `*.toml` file in `dir`. The script
/// reference is the file itself. Unreadable files are skipped.
pub fn scan_custom_missions(dir: &Path) -> Result<Vec<MissionDef>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();

    let mut missions = Vec::new();
    for (index, path) in files.iter().enumerate() {
        let mut def: MissionDef = match read_def(path) {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping custom mission {}: {}", path.display(), e);
                continue;
            }
        };
        if def.id == 0 {
            def.id = index as i32 + 1;
        }
        if def.name.is_empty() {
            def.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        def.script = path.display().to_string();
        missions.push(def);
    }
    Ok(missions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_mission_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missions.toml");
        fs::write(
            &path,
            r#"
            [[mission]]
            id = 1
            name = "Patrol Ostara"
            start = "06:00:00"
            type = "patrol"
            script = "msn01.toml"

            [[mission]]
            id = 2
            name = "Strike Korius"
            start = 7200
            "#,
        )
        .unwrap();

        let list = load_mission_list(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].start, 6 * 3600);
        assert_eq!(list[0].mission_type, "patrol");
        assert_eq!(list[1].start, 7200);
    }

    #[test]
    fn test_custom_missions_use_file_as_script() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_raid.toml"), "type = \"strike\"").unwrap();
        fs::write(dir.path().join("a_escort.toml"), "name = \"Escort\"\nid = 9").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("c_broken.toml"), "name = ").unwrap();

        let missions = scan_custom_missions(dir.path()).unwrap();
        assert_eq!(missions.len(), 2);
        assert_eq!(missions[0].name, "Escort");
        assert_eq!(missions[0].id, 9);
        assert_eq!(missions[1].name, "b_raid");
        assert_eq!(missions[1].id, 2);
        assert!(missions[1].script.ends_with("b_raid.toml"));
    }
}
