//! A side in the conflict and its order of battle

use serde::{Deserialize, Serialize};

use crate::combat::force::Force;
use crate::combat::group::{CombatGroup, GroupKey, GroupType};
use crate::core::types::Iff;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub iff: Iff,
    pub score: i32,
    pub force: Force,
}

impl Combatant {
    pub fn new(name: impl Into<String>, iff: Iff, force: Force) -> Self {
        Self {
            name: name.into(),
            iff,
            score: 0,
            force,
        }
    }

    pub fn find_group(&self, group_type: GroupType, id: Option<i32>) -> Option<GroupKey> {
        self.force.find_group(group_type, id)
    }

    pub fn group(&self, key: GroupKey) -> Option<&CombatGroup> {
        self.force.get(key)
    }

    pub fn group_mut(&mut self, key: GroupKey) -> Option<&mut CombatGroup> {
        self.force.get_mut(key)
    }

    pub fn add_score(&mut self, points: i32) {
        self.score += points;
    }
}

/// Stable reference to a group anywhere in the campaign: the combatant's
/// position in the campaign's combatant list plus the group handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupRef {
    pub combatant: usize,
    pub group: GroupKey,
}

impl GroupRef {
    pub fn new(combatant: usize, group: GroupKey) -> Self {
        Self { combatant, group }
    }

    pub fn resolve<'a>(&self, combatants: &'a [Combatant]) -> Option<&'a CombatGroup> {
        combatants.get(self.combatant)?.group(self.group)
    }

    pub fn resolve_mut<'a>(&self, combatants: &'a mut [Combatant]) -> Option<&'a mut CombatGroup> {
        combatants.get_mut(self.combatant)?.group_mut(self.group)
    }
}

/// Reference to one unit batch inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitRef {
    pub group: GroupRef,
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_ref_resolves() {
        let mut force = Force::new("Hegemony", 2);
        let root = force.root();
        let key = force
            .add_component(root, CombatGroup::new(GroupType::Wing, 3, "Zolon Wing", 2))
            .unwrap();
        let mut combatants = vec![Combatant::new("Hegemony", 2, force)];

        let r = GroupRef::new(0, key);
        assert_eq!(r.resolve(&combatants).unwrap().name, "Zolon Wing");

        r.resolve_mut(&mut combatants).unwrap().sorties += 1;
        assert_eq!(r.resolve(&combatants).unwrap().sorties, 1);

        assert!(GroupRef::new(4, key).resolve(&combatants).is_none());
    }
}
