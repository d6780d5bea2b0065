//! Mission metadata plus the lazily loaded mission

use serde::{Deserialize, Serialize};

use crate::action::kind::ActionStatus;
use crate::core::types::{ActionId, MissionId, Seconds, TIME_NEVER};
use crate::mission::handle::Mission;
use crate::mission::mission_type::MissionType;

#[derive(Debug, Serialize, Deserialize)]
pub struct MissionInfo {
    pub id: MissionId,
    pub name: String,
    pub description: String,
    pub system: String,
    pub region: String,
    pub script: String,
    /// Scheduled campaign start time
    pub start: Seconds,
    pub mission_type: MissionType,
    /// Gating action; the mission is offered only while that action has
    /// `action_status`
    pub action_id: Option<ActionId>,
    pub action_status: ActionStatus,
    /// 0 repeatable, >0 once, <0 already used
    pub exec_once: i32,
    /// Rank bounds; 0 means unbounded
    pub min_rank: i32,
    pub max_rank: i32,
    pub start_after: Seconds,
    pub start_before: Seconds,
    /// Flight state of the mission as of the last copy or save. The loaded
    /// mission is authoritative while present.
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub complete: bool,
    #[serde(skip)]
    pub mission: Option<Box<dyn Mission>>,
}

impl MissionInfo {
    pub fn new(id: MissionId, name: impl Into<String>, mission_type: MissionType) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            system: String::new(),
            region: String::new(),
            script: String::new(),
            start: 0,
            mission_type,
            action_id: None,
            action_status: ActionStatus::Pending,
            exec_once: 0,
            min_rank: 0,
            max_rank: 0,
            start_after: 0,
            start_before: TIME_NEVER,
            active: false,
            complete: false,
            mission: None,
        }
    }

    /// Whether this candidate may be offered now
    pub fn is_available(&self, now: Seconds, player_rank: i32, player_region: &str) -> bool {
        if now < self.start_after || now >= self.start_before {
            return false;
        }

        if !self.region.is_empty() && !self.region.eq_ignore_ascii_case(player_region) {
            return false;
        }

        if self.min_rank != 0 && player_rank < self.min_rank {
            return false;
        }

        if self.max_rank != 0 && player_rank > self.max_rank {
            return false;
        }

        self.exec_once >= 0
    }

    /// Mark a one-shot template as used
    pub fn consume(&mut self) {
        if self.exec_once > 0 {
            self.exec_once = -1;
        }
    }

    /// Fresh live mission built from this template
    pub fn instantiate(&self, id: MissionId, start: Seconds) -> MissionInfo {
        MissionInfo {
            id,
            start,
            action_id: None,
            exec_once: 0,
            start_after: 0,
            start_before: TIME_NEVER,
            active: false,
            complete: false,
            ..self.clone()
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.mission.is_some()
    }

    pub fn is_complete(&self) -> bool {
        match &self.mission {
            Some(m) => m.is_complete(),
            None => self.complete,
        }
    }

    pub fn is_active(&self) -> bool {
        match &self.mission {
            Some(m) => m.is_active(),
            None => self.active,
        }
    }

    /// Attach a freshly loaded mission and carry the recorded flight state
    /// over to it
    pub fn attach(&mut self, mut mission: Box<dyn Mission>) {
        if self.active {
            mission.set_active(true);
        }
        if self.complete {
            mission.set_complete(true);
        }
        self.mission = Some(mission);
    }
}

/// Cloning copies the metadata and flight state; the mission reloads on
/// demand
impl Clone for MissionInfo {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            system: self.system.clone(),
            region: self.region.clone(),
            script: self.script.clone(),
            start: self.start,
            mission_type: self.mission_type,
            action_id: self.action_id,
            action_status: self.action_status,
            exec_once: self.exec_once,
            min_rank: self.min_rank,
            max_rank: self.max_rank,
            start_after: self.start_after,
            start_before: self.start_before,
            active: self.is_active(),
            complete: self.is_complete(),
            mission: None,
        }
    }
}
