//! `zones.toml`: combat zones

use std::path::Path;

use serde::Deserialize;

use crate::combat::zone::CombatZone;
use crate::core::error::Result;
use crate::defs::{line_list, read_def};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneDef {
    pub name: String,
    #[serde(default)]
    pub system: String,
    #[serde(default, rename = "region", deserialize_with = "line_list")]
    pub regions: Vec<String>,
}

impl ZoneDef {
    pub fn into_zone(self) -> CombatZone {
        let mut zone = CombatZone::new(self.name, self.system);
        zone.regions = self.regions;
        zone
    }
}

#[derive(Debug, Default, Deserialize)]
struct ZoneFile {
    #[serde(default)]
    zone: Vec<ZoneDef>,
}

pub fn load_zones(path: &Path) -> Result<Vec<CombatZone>> {
    let file: ZoneFile = read_def(path)?;
    Ok(file.zone.into_iter().map(ZoneDef::into_zone).collect())
}
