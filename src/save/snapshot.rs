//! Serializable campaign state

use std::path::PathBuf;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::action::CombatAction;
use crate::campaign::CampaignStatus;
use crate::combat::{CombatEvent, CombatZone, Combatant, GroupRef, UnitRef};
use crate::core::context::PlayerContext;
use crate::core::types::{CampaignId, MissionId, Seconds};
use crate::mission::{MissionInfo, TemplateCatalog};
use crate::plan::{PlanClock, PlanKind};

/// Current save game format
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to resume a campaign on the same tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    pub id: CampaignId,
    pub name: String,
    pub description: String,
    pub situation: String,
    pub orders: String,
    pub path: PathBuf,
    pub scripted: bool,
    pub sequential: bool,
    pub status: CampaignStatus,

    pub time: Seconds,
    pub lockout: Seconds,

    pub combatants: Vec<Combatant>,
    pub zones: Vec<CombatZone>,
    pub actions: Vec<CombatAction>,
    pub events: Vec<CombatEvent>,
    pub missions: Vec<MissionInfo>,
    pub templates: TemplateCatalog,
    pub mission_id: Option<MissionId>,
    pub next_mission_id: i32,

    pub player: PlayerContext,
    pub player_group: Option<GroupRef>,
    pub player_unit: Option<UnitRef>,

    /// Planner throttles and rotation cursors; `None` when the campaign
    /// had no pipeline
    pub planners: Option<Vec<(PlanKind, PlanClock)>>,
    pub rng: ChaCha8Rng,
}

/// On-disk wrapper of one save slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub campaign: CampaignSnapshot,
}

impl SaveFile {
    pub fn new(campaign: CampaignSnapshot) -> Self {
        Self {
            version: SAVE_VERSION,
            campaign,
        }
    }
}
