//! Narrative events posted to the campaign log

use serde::{Deserialize, Serialize};

use crate::core::types::{Iff, Seconds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Attack,
    Defend,
    MoveTo,
    Capture,
    Strategy,
    CampaignStart,
    Story,
    CampaignEnd,
    CampaignFail,
}

impl EventKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "ATTACK" => Some(Self::Attack),
            "DEFEND" => Some(Self::Defend),
            "MOVE_TO" => Some(Self::MoveTo),
            "CAPTURE" => Some(Self::Capture),
            "STRATEGY" => Some(Self::Strategy),
            "CAMPAIGN_START" => Some(Self::CampaignStart),
            "STORY" => Some(Self::Story),
            "CAMPAIGN_END" => Some(Self::CampaignEnd),
            "CAMPAIGN_FAIL" => Some(Self::CampaignFail),
            _ => None,
        }
    }
}

/// Channel the event reaches the player through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventSource {
    #[default]
    Forcom,
    Tacnet,
    Intel,
    Mail,
    News,
}

impl EventSource {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "FORCOM" => Some(Self::Forcom),
            "TACNET" => Some(Self::Tacnet),
            "INTEL" => Some(Self::Intel),
            "MAIL" => Some(Self::Mail),
            "NEWS" => Some(Self::News),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub time: Seconds,
    pub kind: EventKind,
    pub source: EventSource,
    pub iff: Iff,
    pub region: String,
    pub title: String,
    pub info: String,
    pub image: String,
    pub scene: String,
    pub visited: bool,
}

impl CombatEvent {
    pub fn new(time: Seconds, kind: EventKind, source: EventSource, iff: Iff) -> Self {
        Self {
            time,
            kind,
            source,
            iff,
            region: String::new(),
            title: String::new(),
            info: String::new(),
            image: String::new(),
            scene: String::new(),
            visited: false,
        }
    }
}
