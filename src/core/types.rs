//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Campaign-relative time in seconds
pub type Seconds = i64;

/// Absolute simulation time (seconds on the universe clock)
pub type Stardate = f64;

/// Upper bound meaning "no deadline" for start windows
pub const TIME_NEVER: Seconds = 1_000_000_000;

pub const ONE_HOUR: Seconds = 60 * 60;
pub const ONE_DAY: Seconds = 24 * ONE_HOUR;

/// Highest rank number a window accepts by default
pub const MAX_RANK: i32 = 100;

/// Campaign identifier. Reserved ranges select the campaign kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampaignId(pub i32);

impl CampaignId {
    pub const TRAINING: CampaignId = CampaignId(1);
    pub const DYNAMIC: CampaignId = CampaignId(2);
    pub const SINGLE_MISSIONS: CampaignId = CampaignId(1000);
    pub const MULTIPLAYER_MISSIONS: CampaignId = CampaignId(1001);
    pub const CUSTOM_MISSIONS: CampaignId = CampaignId(1002);

    pub fn kind(self) -> CampaignKind {
        match self.0 {
            1 => CampaignKind::Training,
            n if n >= Self::DYNAMIC.0 && n < Self::SINGLE_MISSIONS.0 => CampaignKind::Dynamic,
            1000 => CampaignKind::SingleMissions,
            1001 => CampaignKind::Multiplayer,
            n if n >= Self::CUSTOM_MISSIONS.0 => CampaignKind::Custom,
            _ => CampaignKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignKind {
    Unknown,
    Training,
    Dynamic,
    SingleMissions,
    Multiplayer,
    Custom,
}

/// Identifier of a combat action as written in campaign definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub i32);

/// Identifier of a mission (live or template)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissionId(pub i32);

/// Identification-friend-or-foe team number. 0 is neutral, 100+ non-combatant.
pub type Iff = i32;

/// True for a team that takes part in the war
pub fn is_combatant_iff(iff: Iff) -> bool {
    iff > 0 && iff < 100
}

const RANK_NAMES: [(&str, &str, i32); 8] = [
    ("ensign", "ens", 0),
    ("lieutenant jg", "ltjg", 1),
    ("lieutenant", "lt", 2),
    ("lieutenant commander", "lcdr", 3),
    ("commander", "cdr", 4),
    ("captain", "capt", 5),
    ("commodore", "com", 6),
    ("admiral", "adm", 7),
];

/// Resolve a rank name or abbreviation (case-insensitive, `_` treated as space)
pub fn rank_from_name(name: &str) -> Option<i32> {
    let wanted = name.trim().replace('_', " ").to_ascii_lowercase();
    RANK_NAMES
        .iter()
        .find(|(full, abbrev, _)| *full == wanted || *abbrev == wanted)
        .map(|(_, _, rank)| *rank)
}

/// Parse clock text `"d/hh:mm:ss"` or `"hh:mm:ss"` into seconds
pub fn parse_clock(text: &str) -> Option<Seconds> {
    let text = text.trim();
    let (days, clock) = match text.split_once('/') {
        Some((d, rest)) => (d.trim().parse::<Seconds>().ok()?, rest),
        None => (0, text),
    };

    let mut parts = clock.split(':').map(|p| p.trim().parse::<Seconds>());
    let hours = parts.next()?.ok()?;
    let minutes = parts.next().transpose().ok()?.unwrap_or(0);
    let seconds = parts.next().transpose().ok()?.unwrap_or(0);
    if parts.next().is_some() {
        return None;
    }

    Some(days * ONE_DAY + hours * ONE_HOUR + minutes * 60 + seconds)
}

/// Format campaign seconds as `d/hh:mm:ss`
pub fn format_clock(seconds: Seconds) -> String {
    let days = seconds / ONE_DAY;
    let rem = seconds % ONE_DAY;
    format!(
        "{}/{:02}:{:02}:{:02}",
        days,
        rem / ONE_HOUR,
        (rem % ONE_HOUR) / 60,
        rem % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_kind_ranges() {
        assert_eq!(CampaignId(1).kind(), CampaignKind::Training);
        assert_eq!(CampaignId(2).kind(), CampaignKind::Dynamic);
        assert_eq!(CampaignId(999).kind(), CampaignKind::Dynamic);
        assert_eq!(CampaignId(1000).kind(), CampaignKind::SingleMissions);
        assert_eq!(CampaignId(1001).kind(), CampaignKind::Multiplayer);
        assert_eq!(CampaignId(1002).kind(), CampaignKind::Custom);
        assert_eq!(CampaignId(1050).kind(), CampaignKind::Custom);
        assert_eq!(CampaignId(0).kind(), CampaignKind::Unknown);
    }

    #[test]
    fn test_parse_clock_with_days() {
        assert_eq!(parse_clock("1/00:00:00"), Some(ONE_DAY));
        assert_eq!(parse_clock("2/01:30:15"), Some(2 * ONE_DAY + ONE_HOUR + 30 * 60 + 15));
    }

    #[test]
    fn test_parse_clock_without_days() {
        assert_eq!(parse_clock("12:00:00"), Some(12 * ONE_HOUR));
        assert_eq!(parse_clock("06:30"), Some(6 * ONE_HOUR + 30 * 60));
        assert_eq!(parse_clock("garbage"), None);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(ONE_DAY + 3 * ONE_HOUR + 5), "1/03:00:05");
    }

    #[test]
    fn test_rank_names() {
        assert_eq!(rank_from_name("Lieutenant"), Some(2));
        assert_eq!(rank_from_name("LT_COMMANDER"), None);
        assert_eq!(rank_from_name("lieutenant_commander"), Some(3));
        assert_eq!(rank_from_name("cdr"), Some(4));
    }
}
