//! Engine configuration with documented constants
//!
//! Every tunable the orchestrator and planners consult lives here. Values
//! load from TOML; any key left out keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{Seconds, ONE_HOUR};

/// How definition content that references missing things is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementPolicy {
    /// Unknown combatants, actions or groups fail the load with a `ConfigError`
    #[default]
    Strict,
    /// Unknown references are logged and kept with legacy semantics
    Lenient,
}

/// Per-planner throttle, in campaign seconds between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerIntervals {
    pub event: Seconds,
    pub strategic: Seconds,
    pub assignment: Seconds,
    pub movement: Seconds,
    pub mission: Seconds,
}

impl Default for PlannerIntervals {
    fn default() -> Self {
        Self {
            event: 20,
            strategic: 300,
            assignment: 300,
            movement: 60,
            mission: 300,
        }
    }
}

/// Configuration for the campaign engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === CONTENT VALIDATION ===
    /// Strict or lenient handling of dangling references in definitions
    pub requirement_policy: RequirementPolicy,

    // === CLOCK ===
    /// Downtime added to the clock after a completed mission when the
    /// player flies with a fighter group
    pub fighter_downtime: Seconds,

    /// Downtime added after a completed mission for any other player group.
    /// Starships take longer to rearm and reposition.
    pub starship_downtime: Seconds,

    // === SAVE GAMES ===
    /// Slot written after every completed mission
    pub autosave_slot: String,

    /// Directory holding save game slots
    pub save_dir: PathBuf,

    // === RANDOMNESS ===
    /// Seed for probability rolls. When unset the campaign id is used so
    /// a campaign replays identically from a fresh start.
    pub rng_seed: Option<u64>,

    // === PLANNERS ===
    pub planner_intervals: PlannerIntervals,

    /// Live mission count above which the mission planner stops generating
    pub max_live_missions: usize,

    /// How far ahead of the clock a generated mission is scheduled
    pub mission_lead_time: Seconds,

    /// Stock orders of battle. Defaults to `<campaign>/roster`.
    pub roster_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            requirement_policy: RequirementPolicy::Strict,
            fighter_downtime: 10 * ONE_HOUR,
            starship_downtime: 20 * ONE_HOUR,
            autosave_slot: "AutoSave".to_string(),
            save_dir: PathBuf::from("SaveGame"),
            rng_seed: None,
            planner_intervals: PlannerIntervals::default(),
            max_live_missions: 3,
            mission_lead_time: ONE_HOUR,
            roster_dir: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn is_strict(&self) -> bool {
        self.requirement_policy == RequirementPolicy::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.fighter_downtime, 36_000);
        assert_eq!(config.starship_downtime, 72_000);
        assert_eq!(config.autosave_slot, "AutoSave");
        assert!(config.is_strict());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            requirement_policy = "lenient"
            max_live_missions = 5

            [planner_intervals]
            strategic = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.requirement_policy, RequirementPolicy::Lenient);
        assert_eq!(config.max_live_missions, 5);
        assert_eq!(config.planner_intervals.strategic, 600);
        assert_eq!(config.planner_intervals.event, 20);
        assert_eq!(config.fighter_downtime, 36_000);
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(EngineConfig::from_toml_str("max_live_missions = \"many\"").is_err());
    }
}
