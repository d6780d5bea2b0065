//! Preconditions attached to combat actions

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::action::kind::ActionStatus;
use crate::combat::combatant::Combatant;
use crate::combat::group::{GroupType, IntelLevel};
use crate::core::types::{ActionId, Seconds};

/// Comparison operator. The `Rel*` forms compare the difference between
/// two combatants' scores instead of one combatant's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Comparator {
    #[default]
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    RelLt,
    RelLe,
    RelGt,
    RelGe,
    RelEq,
}

impl Comparator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "LT" => Some(Self::Lt),
            "LE" => Some(Self::Le),
            "GT" => Some(Self::Gt),
            "GE" => Some(Self::Ge),
            "EQ" => Some(Self::Eq),
            "RLT" => Some(Self::RelLt),
            "RLE" => Some(Self::RelLe),
            "RGT" => Some(Self::RelGt),
            "RGE" => Some(Self::RelGe),
            "REQ" => Some(Self::RelEq),
            _ => None,
        }
    }

    pub fn is_relative(self) -> bool {
        matches!(
            self,
            Self::RelLt | Self::RelLe | Self::RelGt | Self::RelGe | Self::RelEq
        )
    }

    pub fn test(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Self::Lt | Self::RelLt => lhs < rhs,
            Self::Le | Self::RelLe => lhs <= rhs,
            Self::Gt | Self::RelGt => lhs > rhs,
            Self::Ge | Self::RelGe => lhs >= rhs,
            Self::Eq | Self::RelEq => lhs == rhs,
        }
    }
}

/// State an action's requirements are checked against
pub struct ActionEnv<'a> {
    pub now: Seconds,
    pub player_rank: i32,
    pub statuses: &'a AHashMap<ActionId, ActionStatus>,
    pub combatants: &'a [Combatant],
}

/// Combatants are held by index into the campaign's combatant list. An
/// unresolved combatant (`None`) only survives a lenient load: a score test
/// on it is false and a group test on it is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Requirement {
    /// Another action must (or must not) have a given status
    Action {
        action: ActionId,
        status: ActionStatus,
        negate: bool,
    },
    /// Score of `c1`, or `c1 - c2` for relative comparators
    Score {
        c1: Option<usize>,
        c2: Option<usize>,
        comp: Comparator,
        score: i32,
    },
    /// Strength or enemy intel of one group
    Group {
        combatant: Option<usize>,
        group_type: GroupType,
        group_id: i32,
        comp: Comparator,
        score: i32,
        intel: Option<IntelLevel>,
    },
    /// Kept by a lenient load for a requirement naming an unknown status,
    /// comparator, group type or intel level. Never holds.
    Unresolved,
}

impl Requirement {
    pub fn holds(&self, env: &ActionEnv<'_>) -> bool {
        match self {
            Self::Action {
                action,
                status,
                negate,
            } => match env.statuses.get(action) {
                Some(current) => (current == status) != *negate,
                None => true,
            },

            Self::Score { c1, c2, comp, score } => {
                let Some(first) = c1.and_then(|i| env.combatants.get(i)) else {
                    return false;
                };
                if comp.is_relative() {
                    match c2.and_then(|i| env.combatants.get(i)) {
                        Some(second) => comp.test(first.score - second.score, *score),
                        None => false,
                    }
                } else {
                    comp.test(first.score, *score)
                }
            }

            Self::Group {
                combatant,
                group_type,
                group_id,
                comp,
                score,
                intel,
            } => {
                let Some(c) = combatant.and_then(|i| env.combatants.get(i)) else {
                    return true;
                };
                let Some(key) = c.find_group(*group_type, Some(*group_id)) else {
                    return true;
                };
                match intel {
                    Some(level) => {
                        let current = c.force.get(key).map(|g| g.intel).unwrap_or_default();
                        comp.test(current.level(), level.level())
                    }
                    None => comp.test(c.force.calc_value(key), *score),
                }
            }

            Self::Unresolved => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::force::Force;
    use crate::combat::group::CombatGroup;
    use crate::combat::unit::CombatUnit;

    fn combatants() -> Vec<Combatant> {
        let mut force = Force::new("Alliance", 1);
        let root = force.root();
        let mut wing = CombatGroup::new(GroupType::Wing, 12, "Viper Wing", 1);
        wing.units.push(CombatUnit::new("Viper", "viper", 4, 10));
        wing.intel = IntelLevel::Known;
        force.add_component(root, wing);

        let mut alliance = Combatant::new("Alliance", 1, force);
        alliance.score = 50;
        let mut hegemony = Combatant::new("Hegemony", 2, Force::new("Hegemony", 2));
        hegemony.score = 20;
        vec![alliance, hegemony]
    }

    #[test]
    fn test_action_requirement() {
        let mut statuses = AHashMap::new();
        statuses.insert(ActionId(1), ActionStatus::Complete);
        let c = combatants();
        let env = ActionEnv {
            now: 0,
            player_rank: 0,
            statuses: &statuses,
            combatants: &c,
        };

        let done = Requirement::Action {
            action: ActionId(1),
            status: ActionStatus::Complete,
            negate: false,
        };
        let not_done = Requirement::Action {
            action: ActionId(1),
            status: ActionStatus::Complete,
            negate: true,
        };
        assert!(done.holds(&env));
        assert!(!not_done.holds(&env));
    }

    #[test]
    fn test_score_requirement() {
        let statuses = AHashMap::new();
        let c = combatants();
        let env = ActionEnv {
            now: 0,
            player_rank: 0,
            statuses: &statuses,
            combatants: &c,
        };

        let absolute = Requirement::Score {
            c1: Some(0),
            c2: None,
            comp: Comparator::Ge,
            score: 50,
        };
        let relative = Requirement::Score {
            c1: Some(0),
            c2: Some(1),
            comp: Comparator::RelGt,
            score: 25,
        };
        let missing = Requirement::Score {
            c1: None,
            c2: None,
            comp: Comparator::Ge,
            score: 0,
        };
        assert!(absolute.holds(&env));
        assert!(relative.holds(&env));
        assert!(!missing.holds(&env));
    }

    #[test]
    fn test_group_requirement() {
        let statuses = AHashMap::new();
        let c = combatants();
        let env = ActionEnv {
            now: 0,
            player_rank: 0,
            statuses: &statuses,
            combatants: &c,
        };

        let strength = Requirement::Group {
            combatant: Some(0),
            group_type: GroupType::Wing,
            group_id: 12,
            comp: Comparator::Lt,
            score: 40,
            intel: None,
        };
        let intel = Requirement::Group {
            combatant: Some(0),
            group_type: GroupType::Wing,
            group_id: 12,
            comp: Comparator::Ge,
            score: 0,
            intel: Some(IntelLevel::Known),
        };
        assert!(!strength.holds(&env));
        assert!(intel.holds(&env));
    }

    #[test]
    fn test_unresolved_never_holds() {
        let statuses = AHashMap::new();
        let c = combatants();
        let env = ActionEnv {
            now: 0,
            player_rank: 0,
            statuses: &statuses,
            combatants: &c,
        };
        assert!(!Requirement::Unresolved.holds(&env));
    }

    #[test]
    fn test_comparators() {
        assert_eq!(Comparator::from_name("rge"), Some(Comparator::RelGe));
        assert!(Comparator::RelEq.is_relative());
        assert!(!Comparator::Eq.is_relative());
        assert!(Comparator::Le.test(3, 3));
        assert!(!Comparator::Lt.test(3, 3));
    }
}
