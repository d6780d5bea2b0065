//! Order-of-battle group nodes
//!
//! A `CombatGroup` is one node of a combatant's force tree: a wing, a
//! squadron, a fleet, a starbase. Nodes live in a `Force` arena and refer
//! to each other through `GroupKey` handles.

use serde::{Deserialize, Serialize};

use crate::combat::unit::CombatUnit;
use crate::core::types::Iff;

/// Handle of a group inside its `Force` arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey(pub u32);

impl GroupKey {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kinds of force elements, ordered as the definition files number them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupType {
    None,
    Force,
    Wing,
    InterceptSquadron,
    FighterSquadron,
    AttackSquadron,
    LcaSquadron,
    Fleet,
    DestroyerSquadron,
    BattleGroup,
    CarrierGroup,
    Battalion,
    Minefield,
    Battery,
    Missile,
    Station,
    Starbase,
    C3i,
    CommRelay,
    EarlyWarning,
    FwdControlCtr,
    Ecm,
    Support,
    Courier,
    Medical,
    Supply,
    Repair,
    Civilian,
    WarProduction,
    Factory,
    Refinery,
    Resource,
    Infrastructure,
    Transport,
    Network,
    Habitat,
    Storage,
    NonCom,
    Freight,
    Passenger,
    Private,
}

const GROUP_NAMES: [(GroupType, &str); 40] = [
    (GroupType::Force, "force"),
    (GroupType::Wing, "wing"),
    (GroupType::InterceptSquadron, "intercept_squadron"),
    (GroupType::FighterSquadron, "fighter_squadron"),
    (GroupType::AttackSquadron, "attack_squadron"),
    (GroupType::LcaSquadron, "lca_squadron"),
    (GroupType::Fleet, "fleet"),
    (GroupType::DestroyerSquadron, "destroyer_squadron"),
    (GroupType::BattleGroup, "battle_group"),
    (GroupType::CarrierGroup, "carrier_group"),
    (GroupType::Battalion, "battalion"),
    (GroupType::Minefield, "minefield"),
    (GroupType::Battery, "battery"),
    (GroupType::Missile, "missile"),
    (GroupType::Station, "station"),
    (GroupType::Starbase, "starbase"),
    (GroupType::C3i, "c3i"),
    (GroupType::CommRelay, "comm_relay"),
    (GroupType::EarlyWarning, "early_warning"),
    (GroupType::FwdControlCtr, "fwd_control_ctr"),
    (GroupType::Ecm, "ecm"),
    (GroupType::Support, "support"),
    (GroupType::Courier, "courier"),
    (GroupType::Medical, "medical"),
    (GroupType::Supply, "supply"),
    (GroupType::Repair, "repair"),
    (GroupType::Civilian, "civilian"),
    (GroupType::WarProduction, "war_production"),
    (GroupType::Factory, "factory"),
    (GroupType::Refinery, "refinery"),
    (GroupType::Resource, "resource"),
    (GroupType::Infrastructure, "infrastructure"),
    (GroupType::Transport, "transport"),
    (GroupType::Network, "network"),
    (GroupType::Habitat, "habitat"),
    (GroupType::Storage, "storage"),
    (GroupType::NonCom, "non_com"),
    (GroupType::Freight, "freight"),
    (GroupType::Passenger, "passenger"),
    (GroupType::Private, "private"),
];

impl GroupType {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        GROUP_NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(t, _)| *t)
    }

    pub fn name(self) -> &'static str {
        GROUP_NAMES
            .iter()
            .find(|(t, _)| *t == self)
            .map(|(_, n)| *n)
            .unwrap_or("none")
    }

    pub fn is_fighter_group(self) -> bool {
        matches!(
            self,
            Self::Wing | Self::InterceptSquadron | Self::FighterSquadron | Self::AttackSquadron
        )
    }

    pub fn is_starship_group(self) -> bool {
        matches!(
            self,
            Self::DestroyerSquadron | Self::BattleGroup | Self::CarrierGroup
        )
    }

    /// Groups the assignment planner may task
    pub fn is_assignable(self) -> bool {
        matches!(
            self,
            Self::CarrierGroup
                | Self::BattleGroup
                | Self::DestroyerSquadron
                | Self::AttackSquadron
                | Self::FighterSquadron
                | Self::InterceptSquadron
                | Self::LcaSquadron
        )
    }

    pub fn is_movable(self) -> bool {
        self.is_assignable()
            || matches!(
                self,
                Self::Courier
                    | Self::Medical
                    | Self::Supply
                    | Self::Repair
                    | Self::Freight
                    | Self::Passenger
                    | Self::Private
            )
    }

    pub fn is_strike_target(self) -> bool {
        self >= Self::Battalion
            && !matches!(
                self,
                Self::Minefield | Self::Passenger | Self::Private | Self::Medical | Self::Habitat
            )
    }
}

/// How much the enemy knows about a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum IntelLevel {
    Unknown,
    /// Out-of-system reserve; not present in the theater
    Reserve,
    #[default]
    Secret,
    Known,
    Located,
    Tracked,
}

impl IntelLevel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "reserve" => Some(Self::Reserve),
            "secret" => Some(Self::Secret),
            "known" => Some(Self::Known),
            "located" => Some(Self::Located),
            "tracked" => Some(Self::Tracked),
            _ => None,
        }
    }

    /// Numeric level used by requirement thresholds
    pub fn level(self) -> i32 {
        self as i32
    }
}

/// A node in the order-of-battle tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatGroup {
    pub group_type: GroupType,
    pub id: i32,
    pub name: String,
    pub iff: Iff,
    pub intel: IntelLevel,
    pub region: String,
    pub parent: Option<GroupKey>,
    pub components: Vec<GroupKey>,
    pub units: Vec<CombatUnit>,
    pub assigned_system: String,
    pub current_zone: Option<String>,
    pub assigned_zone: Option<String>,
    pub zone_lock: bool,
    pub strategic_direction: String,
    pub sorties: i32,
    pub kills: i32,
    pub points: i32,
}

impl CombatGroup {
    pub fn new(group_type: GroupType, id: i32, name: impl Into<String>, iff: Iff) -> Self {
        Self {
            group_type,
            id,
            name: name.into(),
            iff,
            intel: IntelLevel::default(),
            region: String::new(),
            parent: None,
            components: Vec::new(),
            units: Vec::new(),
            assigned_system: String::new(),
            current_zone: None,
            assigned_zone: None,
            zone_lock: false,
            strategic_direction: String::new(),
            sorties: 0,
            kills: 0,
            points: 0,
        }
    }

    /// Copy of this node without its tree links. Units are copied.
    pub fn detached(&self) -> Self {
        Self {
            parent: None,
            components: Vec::new(),
            ..self.clone()
        }
    }

    pub fn matches(&self, group_type: GroupType, id: Option<i32>) -> bool {
        self.group_type == group_type && id.map_or(true, |n| n == self.id)
    }

    /// Value of this node's own units, not counting components
    pub fn unit_value(&self) -> i32 {
        self.units.iter().map(|u| u.value()).sum()
    }

    pub fn is_fighter_group(&self) -> bool {
        self.group_type.is_fighter_group()
    }

    pub fn is_zone_locked(&self) -> bool {
        self.assigned_zone.is_some() && self.zone_lock
    }

    pub fn description(&self) -> String {
        if self.name.is_empty() {
            format!("{} {}", self.group_type.name(), self.id)
        } else {
            self.name.clone()
        }
    }
}
