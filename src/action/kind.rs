//! What firing an action does, decoded once at load time

use serde::{Deserialize, Serialize};

use crate::combat::event::{EventKind, EventSource};
use crate::combat::group::IntelLevel;
use crate::core::error::ConfigError;
use crate::mission::MissionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionStatus {
    #[default]
    Pending,
    Active,
    Skipped,
    Failed,
    Complete,
}

impl ActionStatus {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "ACTIVE" => Some(Self::Active),
            "SKIPPED" => Some(Self::Skipped),
            "FAILED" => Some(Self::Failed),
            "COMPLETE" => Some(Self::Complete),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Skipped => "SKIPPED",
            Self::Failed => "FAILED",
            Self::Complete => "COMPLETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// No effect beyond its own status; used as a story flag
    Marker,
    StrategicDirective,
    ZoneAssignment,
    SystemAssignment,
    MissionTemplate {
        mission_type: MissionType,
        opposing: Option<MissionType>,
    },
    CombatEvent {
        event: EventKind,
        source: EventSource,
    },
    IntelEvent {
        intel: IntelLevel,
    },
    CampaignSituation,
    CampaignOrders,
}

impl ActionKind {
    /// Decode the `type`/`subtype`/`opp_type`/`source` names of an action
    pub fn decode(
        type_name: &str,
        subtype: Option<&str>,
        opp_type: Option<&str>,
        source: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let unknown = |field: &'static str, value: &str| ConfigError::UnknownName {
            field,
            value: value.to_string(),
        };

        let kind = match type_name.trim().to_ascii_uppercase().as_str() {
            "" | "NO_ACTION" | "MARKER" => Self::Marker,
            "STRATEGIC_DIRECTIVE" | "STRATEGIC" => Self::StrategicDirective,
            "ZONE_ASSIGNMENT" | "ZONE" => Self::ZoneAssignment,
            "SYSTEM_ASSIGNMENT" | "SYSTEM" => Self::SystemAssignment,
            "MISSION_TEMPLATE" | "MISSION" => {
                let sub = subtype.unwrap_or("patrol");
                let mission_type =
                    MissionType::from_name(sub).ok_or_else(|| unknown("mission type", sub))?;
                let opposing = match opp_type {
                    Some(o) => Some(MissionType::from_name(o).ok_or_else(|| unknown("mission type", o))?),
                    None => None,
                };
                Self::MissionTemplate {
                    mission_type,
                    opposing,
                }
            }
            "COMBAT_EVENT" | "EVENT" => {
                let sub = subtype.unwrap_or("story");
                let event = EventKind::from_name(sub).ok_or_else(|| unknown("event type", sub))?;
                let source = match source {
                    Some(s) => EventSource::from_name(s).ok_or_else(|| unknown("event source", s))?,
                    None => EventSource::default(),
                };
                Self::CombatEvent { event, source }
            }
            "INTEL_EVENT" | "INTEL" => {
                let sub = subtype.unwrap_or("known");
                let intel = IntelLevel::from_name(sub).ok_or_else(|| unknown("intel level", sub))?;
                Self::IntelEvent { intel }
            }
            "CAMPAIGN_SITUATION" | "SITREP" => Self::CampaignSituation,
            "CAMPAIGN_ORDERS" | "ORDERS" => Self::CampaignOrders,
            _ => return Err(unknown("action type", type_name)),
        };
        Ok(kind)
    }

    /// Handled by the event planner rather than the mission planner
    pub fn is_scripted_event(&self) -> bool {
        !matches!(self, Self::MissionTemplate { .. })
    }
}
