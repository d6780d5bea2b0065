//! Mission categories

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum MissionType {
    #[default]
    Patrol,
    Sweep,
    Intercept,
    AirPatrol,
    AirSweep,
    AirIntercept,
    Strike,
    Assault,
    Defend,
    Escort,
    EscortFreight,
    EscortShuttle,
    EscortStrike,
    Intel,
    Scout,
    Recon,
    Blockade,
    Fleet,
    Bombardment,
    FlightOps,
    Transport,
    Cargo,
    Training,
    Other,
}

const MISSION_NAMES: [(MissionType, &str); 24] = [
    (MissionType::Patrol, "patrol"),
    (MissionType::Sweep, "sweep"),
    (MissionType::Intercept, "intercept"),
    (MissionType::AirPatrol, "air_patrol"),
    (MissionType::AirSweep, "air_sweep"),
    (MissionType::AirIntercept, "air_intercept"),
    (MissionType::Strike, "strike"),
    (MissionType::Assault, "assault"),
    (MissionType::Defend, "defend"),
    (MissionType::Escort, "escort"),
    (MissionType::EscortFreight, "escort_freight"),
    (MissionType::EscortShuttle, "escort_shuttle"),
    (MissionType::EscortStrike, "escort_strike"),
    (MissionType::Intel, "intel"),
    (MissionType::Scout, "scout"),
    (MissionType::Recon, "recon"),
    (MissionType::Blockade, "blockade"),
    (MissionType::Fleet, "fleet"),
    (MissionType::Bombardment, "bombardment"),
    (MissionType::FlightOps, "flight_ops"),
    (MissionType::Transport, "transport"),
    (MissionType::Cargo, "cargo"),
    (MissionType::Training, "training"),
    (MissionType::Other, "other"),
];

impl MissionType {
    /// Missions the planner offers a fighter group, in rotation order
    pub const FIGHTER_ROTATION: [MissionType; 6] = [
        MissionType::Patrol,
        MissionType::Sweep,
        MissionType::Intercept,
        MissionType::Escort,
        MissionType::EscortFreight,
        MissionType::Strike,
    ];

    /// Missions the planner offers a starship group, in rotation order
    pub const STARSHIP_ROTATION: [MissionType; 5] = [
        MissionType::Patrol,
        MissionType::Sweep,
        MissionType::Defend,
        MissionType::Assault,
        MissionType::Escort,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let key = match key.as_str() {
            "airborne_patrol" => "air_patrol",
            "airborne_sweep" => "air_sweep",
            "airborne_intercept" => "air_intercept",
            "freight_escort" => "escort_freight",
            "shuttle_escort" => "escort_shuttle",
            "strike_escort" => "escort_strike",
            "attack" => "bombardment",
            "misc" => "other",
            other => other,
        };
        MISSION_NAMES
            .iter()
            .find(|(_, n)| *n == key)
            .map(|(t, _)| *t)
    }

    pub fn name(self) -> &'static str {
        MISSION_NAMES
            .iter()
            .find(|(t, _)| *t == self)
            .map(|(_, n)| *n)
            .unwrap_or("other")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_aliases() {
        for (t, n) in MISSION_NAMES {
            assert_eq!(MissionType::from_name(n), Some(t));
        }
        assert_eq!(MissionType::from_name("Freight Escort"), Some(MissionType::EscortFreight));
        assert_eq!(MissionType::from_name("airborne-patrol"), Some(MissionType::AirPatrol));
        assert_eq!(MissionType::from_name("ATTACK"), Some(MissionType::Bombardment));
        assert_eq!(MissionType::from_name("picnic"), None);
    }
}
