//! `roster/*.toml`: stock orders of battle, one force per file

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::combat::group::IntelLevel;
use crate::combat::unit::CombatUnit;
use crate::core::error::Result;
use crate::defs::read_def;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterDef {
    pub name: String,
    #[serde(default)]
    pub iff: i32,
    #[serde(default, rename = "group")]
    pub groups: Vec<RosterGroupDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RosterGroupDef {
    #[serde(rename = "type")]
    pub group_type: String,
    pub id: i32,
    pub name: String,
    #[serde(deserialize_with = "intel_level")]
    pub intel: IntelLevel,
    #[serde(alias = "rgn")]
    pub region: String,
    #[serde(alias = "sys")]
    pub system: String,
    /// Parent by type and id; none attaches to the force root
    pub parent_type: Option<String>,
    pub parent_id: i32,
    #[serde(rename = "unit")]
    pub units: Vec<UnitDef>,
}

impl RosterGroupDef {
    pub fn parent(&self) -> Option<(&str, i32)> {
        self.parent_type.as_deref().map(|t| (t, self.parent_id))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnitDef {
    pub name: String,
    pub design: String,
    pub count: i32,
    pub dead: i32,
    pub value: i32,
}

impl Default for UnitDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            design: String::new(),
            count: 1,
            dead: 0,
            value: 1,
        }
    }
}

impl UnitDef {
    pub fn to_unit(&self) -> CombatUnit {
        let mut unit = CombatUnit::new(self.name.clone(), self.design.clone(), self.count, self.value);
        unit.dead_count = self.dead;
        unit
    }
}

fn intel_level<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<IntelLevel, D::Error> {
    let name = String::deserialize(d)?;
    IntelLevel::from_name(&name).ok_or_else(|| D::Error::custom(format!("unknown intel level `{}`", name)))
}

pub fn load_roster_file(path: &Path) -> Result<RosterDef> {
    read_def(path)
}
