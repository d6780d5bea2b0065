//! The player's group and unit within the order of battle

use tracing::{debug, info};

use crate::campaign::Campaign;
use crate::combat::{CombatGroup, GroupKey, GroupRef, GroupType, UnitRef};
use crate::core::types::Iff;

/// Group types tried, in order, when the player needs a default assignment
const DEFAULT_GROUP_TYPES: [GroupType; 2] = [GroupType::Wing, GroupType::DestroyerSquadron];

impl Campaign {
    pub fn player_group(&self) -> Option<GroupRef> {
        self.player_group
    }

    pub fn player_group_info(&self) -> Option<&CombatGroup> {
        self.player_group?.resolve(&self.combatants)
    }

    /// Assign the player to a group. Dynamic campaigns discard their live
    /// missions when the assignment changes.
    pub fn set_player_group(&mut self, group: Option<GroupRef>) {
        if self.player_group == group {
            return;
        }

        if let Some(g) = group.and_then(|g| g.resolve(&self.combatants)) {
            info!("Player assigned to {}", g.description());
        }

        self.player_group = group;
        self.player_unit = None;

        if self.is_dynamic() {
            self.missions.clear();
        }
    }

    pub fn player_unit(&self) -> Option<UnitRef> {
        self.player_unit
    }

    /// Assign the player to a unit. The unit's group becomes the player
    /// group.
    pub fn set_player_unit(&mut self, unit: Option<UnitRef>) {
        if self.player_unit == unit {
            return;
        }

        if let Some(u) = unit {
            self.set_player_group(Some(u.group));
        } else if self.is_dynamic() {
            self.missions.clear();
        }
        self.player_unit = unit;
    }

    /// Team of the player. Falls back to the player context when no group
    /// is assigned.
    pub fn player_iff(&self) -> Iff {
        self.player_group_info()
            .map(|g| g.iff)
            .unwrap_or(self.player.iff)
    }

    /// Score of the player's side
    pub fn player_team_score(&self) -> i32 {
        let iff = self.player_iff();
        self.combatants
            .iter()
            .find(|c| c.iff == iff)
            .map(|c| c.score)
            .unwrap_or(0)
    }

    /// Re-derive the player's assignment when the current group is gone,
    /// held in reserve, or worth nothing. Drops a unit whose value has
    /// collapsed.
    pub fn check_player_group(&mut self) {
        if !self.player_group_is_usable() {
            let fallback = self.select_default_player_group();
            if fallback != self.player_group {
                match fallback {
                    Some(g) => debug!("Player group reassigned to {:?}", g),
                    None => debug!("No usable player group"),
                }
                self.player_group = fallback;
                self.player_unit = None;
            }
        }

        if let Some(unit) = self.player_unit {
            let value = unit
                .group
                .resolve(&self.combatants)
                .and_then(|g| g.units.get(unit.index))
                .map(|u| u.value())
                .unwrap_or(0);
            if value < 1 {
                debug!("Player unit {:?} demoted", unit);
                self.player_unit = None;
            }
        }
    }

    fn player_group_is_usable(&self) -> bool {
        let Some(group) = self.player_group else {
            return false;
        };
        let Some(combatant) = self.combatants.get(group.combatant) else {
            return false;
        };
        if combatant.group(group.group).is_none() || combatant.force.is_reserve(group.group) {
            return false;
        }
        combatant.force.calc_value(group.group) > 0
    }

    /// First non-reserve group with positive value in the player's force,
    /// preferring wings over destroyer squadrons
    fn select_default_player_group(&self) -> Option<GroupRef> {
        let iff = self.player_group_info().map(|g| g.iff).unwrap_or(self.player.iff);
        let index = self.combatants.iter().position(|c| c.iff == iff)?;
        let force = &self.combatants[index].force;

        let usable = |k: &GroupKey| !force.is_reserve(*k) && force.calc_value(*k) > 0;

        DEFAULT_GROUP_TYPES.iter().find_map(|&group_type| {
            force
                .walk(force.root())
                .into_iter()
                .filter(|k| force.get(*k).is_some_and(|g| g.group_type == group_type))
                .find(usable)
                .map(|k| GroupRef::new(index, k))
        })
    }
}
