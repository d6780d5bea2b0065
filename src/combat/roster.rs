//! Stock orders of battle that campaign combatants are cloned from

use std::path::Path;

use tracing::{info, warn};

use crate::combat::force::Force;
use crate::combat::group::{CombatGroup, GroupType};
use crate::core::config::RequirementPolicy;
use crate::core::error::{ConfigError, Result};
use crate::defs::roster::{load_roster_file, RosterDef, UnitDef};

#[derive(Debug, Clone, Default)]
pub struct CombatRoster {
    forces: Vec<Force>,
}

impl CombatRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.toml` order of battle in `dir`. A missing directory
    /// yields an empty roster.
    pub fn load(dir: &Path, policy: RequirementPolicy) -> Result<Self> {
        let mut roster = Self::new();
        if !dir.is_dir() {
            return Ok(roster);
        }

        let mut files: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        files.sort();

        for path in files {
            let def = load_roster_file(&path)?;
            roster.add_force(build_force(&def, policy)?);
        }

        info!("Loaded {} stock forces from {}", roster.forces.len(), dir.display());
        Ok(roster)
    }

    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    pub fn get_force(&self, name: &str) -> Option<&Force> {
        self.forces.iter().find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub fn forces(&self) -> &[Force] {
        &self.forces
    }
}

/// Assemble a force tree from its flat definition. Parents may appear
/// after their components in the file.
pub fn build_force(def: &RosterDef, policy: RequirementPolicy) -> Result<Force> {
    let mut force = Force::new(def.name.clone(), def.iff);
    let mut pending: Vec<(CombatGroup, Option<(GroupType, i32)>)> = Vec::new();

    for g in &def.groups {
        let group_type = GroupType::from_name(&g.group_type).ok_or_else(|| ConfigError::UnknownName {
            field: "group type",
            value: g.group_type.clone(),
        })?;

        let parent = match g.parent() {
            Some((t, id)) => Some((
                GroupType::from_name(t).ok_or_else(|| ConfigError::UnknownName {
                    field: "group type",
                    value: t.to_string(),
                })?,
                id,
            )),
            None => None,
        };

        let mut group = CombatGroup::new(group_type, g.id, g.name.clone(), def.iff);
        group.intel = g.intel;
        group.region = g.region.clone();
        group.assigned_system = g.system.clone();
        group.units = g.units.iter().map(UnitDef::to_unit).collect();
        pending.push((group, parent));
    }

    loop {
        let before = pending.len();
        pending.retain(|(group, parent)| {
            let target = match parent {
                None => Some(force.root()),
                Some((t, id)) => force.find_group(*t, Some(*id)),
            };
            match target {
                Some(key) => {
                    force.add_component(key, group.clone());
                    false
                }
                None => true,
            }
        });
        if pending.is_empty() || pending.len() == before {
            break;
        }
    }

    for (group, parent) in pending {
        let (t, id) = parent.unwrap_or((GroupType::None, 0));
        let err = ConfigError::UnknownGroup {
            owner: format!("{} {}", def.name, group.description()),
            group_type: t.name().to_string(),
            group_id: id,
        };
        match policy {
            RequirementPolicy::Strict => return Err(err.into()),
            RequirementPolicy::Lenient => {
                warn!("{}; attaching to force root", err);
                let root = force.root();
                force.add_component(root, group);
            }
        }
    }

    Ok(force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::group::IntelLevel;
    use crate::defs::roster::RosterGroupDef;

    fn group(t: &str, id: i32, parent: Option<(&str, i32)>) -> RosterGroupDef {
        RosterGroupDef {
            group_type: t.to_string(),
            id,
            name: String::new(),
            intel: IntelLevel::Known,
            region: "Ostara".to_string(),
            system: "Ostara".to_string(),
            parent_type: parent.map(|(t, _)| t.to_string()),
            parent_id: parent.map(|(_, id)| id).unwrap_or(0),
            units: Vec::new(),
        }
    }

    #[test]
    fn test_parents_may_follow_components() {
        let def = RosterDef {
            name: "Alliance".to_string(),
            iff: 1,
            groups: vec![
                group("wing", 12, Some(("carrier_group", 7))),
                group("carrier_group", 7, Some(("fleet", 1))),
                group("fleet", 1, None),
            ],
        };

        let force = build_force(&def, RequirementPolicy::Strict).unwrap();
        assert_eq!(force.len(), 4);
        let wing = force.find_group(GroupType::Wing, Some(12)).unwrap();
        let carrier = force.parent(wing).unwrap();
        assert_eq!(force.get(carrier).unwrap().id, 7);
    }

    #[test]
    fn test_orphan_group_policy() {
        let def = RosterDef {
            name: "Alliance".to_string(),
            iff: 1,
            groups: vec![group("wing", 12, Some(("fleet", 9)))],
        };

        assert!(build_force(&def, RequirementPolicy::Strict).is_err());

        let force = build_force(&def, RequirementPolicy::Lenient).unwrap();
        let wing = force.find_group(GroupType::Wing, Some(12)).unwrap();
        assert_eq!(force.parent(wing), Some(force.root()));
    }

    #[test]
    fn test_roster_lookup_by_name() {
        let mut roster = CombatRoster::new();
        roster.add_force(Force::new("Hegemony", 2));
        assert!(roster.get_force("hegemony").is_some());
        assert!(roster.get_force("Pirates").is_none());
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let roster = CombatRoster::load(&dir.path().join("roster"), RequirementPolicy::Strict).unwrap();
        assert!(roster.forces().is_empty());
    }
}
