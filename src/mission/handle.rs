//! Opaque mission handles and the collaborators that create and brief them
//!
//! Flying a mission is outside the campaign engine. The engine only needs
//! to create, load, start and query missions through the `Mission` trait.
//! `ScriptMission` is the stock implementation backed by a TOML script.

use std::path::Path;

use serde::Deserialize;

use crate::campaign::Campaign;
use crate::core::error::{ConfigError, Result};
use crate::core::types::MissionId;

/// Situation text a freshly generated mission carries until briefed
pub const SITUATION_PLACEHOLDER: &str = "Unknown";

pub trait Mission: std::fmt::Debug {
    fn identity(&self) -> MissionId;
    fn name(&self) -> &str;
    /// Load the mission from its script file
    fn load(&mut self, script: &Path) -> Result<()>;
    /// Load the mission from script text
    fn parse_mission(&mut self, text: &str) -> Result<()>;
    fn is_active(&self) -> bool;
    fn is_complete(&self) -> bool;
    fn set_active(&mut self, active: bool);
    fn set_complete(&mut self, complete: bool);
    fn start(&mut self) -> Result<()>;
    fn validate(&self) -> bool;
    fn situation(&self) -> &str;
    fn set_situation(&mut self, text: String);
}

/// Creates empty missions for the campaign to load
pub trait MissionFactory: std::fmt::Debug {
    fn create(&self, id: MissionId) -> Box<dyn Mission>;
}

/// Writes a mission's situation briefing from the campaign state
pub trait SituationReporter: std::fmt::Debug {
    fn generate(&self, campaign: &Campaign, mission: &mut dyn Mission);
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScriptFile {
    name: String,
    situation: Option<String>,
    objective: String,
}

/// Mission loaded from a TOML script
#[derive(Debug, Clone)]
pub struct ScriptMission {
    id: MissionId,
    name: String,
    situation: String,
    objective: String,
    active: bool,
    complete: bool,
}

impl ScriptMission {
    pub fn new(id: MissionId) -> Self {
        Self {
            id,
            name: String::new(),
            situation: SITUATION_PLACEHOLDER.to_string(),
            objective: String::new(),
            active: false,
            complete: false,
        }
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }
}

impl Mission for ScriptMission {
    fn identity(&self) -> MissionId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self, script: &Path) -> Result<()> {
        if !script.exists() {
            return Err(ConfigError::MissingFile(script.to_path_buf()).into());
        }
        let text = std::fs::read_to_string(script)?;
        self.parse_mission(&text)
    }

    fn parse_mission(&mut self, text: &str) -> Result<()> {
        let file: ScriptFile = toml::from_str(text)?;
        self.name = file.name;
        self.situation = file
            .situation
            .unwrap_or_else(|| SITUATION_PLACEHOLDER.to_string());
        self.objective = file.objective;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
        if complete {
            self.active = false;
        }
    }

    fn start(&mut self) -> Result<()> {
        self.active = true;
        Ok(())
    }

    fn validate(&self) -> bool {
        !self.name.is_empty()
    }

    fn situation(&self) -> &str {
        &self.situation
    }

    fn set_situation(&mut self, text: String) {
        self.situation = text;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptMissionFactory;

impl MissionFactory for ScriptMissionFactory {
    fn create(&self, id: MissionId) -> Box<dyn Mission> {
        Box::new(ScriptMission::new(id))
    }
}

/// Briefing built from the campaign situation and the player's group
#[derive(Debug, Clone, Copy, Default)]
pub struct SummarySitrep;

impl SituationReporter for SummarySitrep {
    fn generate(&self, campaign: &Campaign, mission: &mut dyn Mission) {
        let mut report = String::new();
        if !campaign.situation().is_empty() {
            report.push_str(campaign.situation());
            report.push_str("\n\n");
        }
        if let Some(group) = campaign.player_group_info() {
            report.push_str(&format!(
                "{} is operating in the {} sector.",
                group.description(),
                if group.region.is_empty() { "assigned" } else { group.region.as_str() }
            ));
        }
        let score = campaign.player_team_score();
        report.push_str(match score {
            s if s > 0 => " Our forces hold the advantage.",
            s if s < 0 => " The enemy holds the advantage.",
            _ => " The front is stable.",
        });
        mission.set_situation(report.trim().to_string());
    }
}
