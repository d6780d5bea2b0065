//! Combat zones: named groupings of regions the planners reason about

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatZone {
    pub name: String,
    pub system: String,
    pub regions: Vec<String>,
}

impl CombatZone {
    pub fn new(name: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: system.into(),
            regions: Vec::new(),
        }
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r.eq_ignore_ascii_case(region))
    }

    pub fn first_region(&self) -> Option<&str> {
        self.regions.first().map(String::as_str)
    }
}

/// Zone containing `region`, if any
pub fn zone_for_region<'a>(zones: &'a [CombatZone], region: &str) -> Option<&'a CombatZone> {
    zones.iter().find(|z| z.has_region(region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup_ignores_case() {
        let mut zone = CombatZone::new("Jarnell Front", "Jarnell");
        zone.regions.push("Jarnell".to_string());
        zone.regions.push("Lanos".to_string());
        let zones = vec![zone];

        assert_eq!(zone_for_region(&zones, "lanos").unwrap().name, "Jarnell Front");
        assert!(zone_for_region(&zones, "Korius").is_none());
    }
}
