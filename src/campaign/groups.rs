//! Order-of-battle and action queries used by the planners

use ahash::AHashMap;
use tracing::debug;

use crate::action::{ActionEnv, ActionStatus, CombatAction};
use crate::campaign::Campaign;
use crate::combat::{CombatGroup, CombatUnit, CombatZone, Combatant, GroupRef, GroupType, IntelLevel};
use crate::core::error::Result;
use crate::core::types::{is_combatant_iff, ActionId, Iff};

impl Campaign {
    // === COMBATANTS AND GROUPS ===

    pub fn get_combatant(&self, name: &str) -> Option<&Combatant> {
        self.combatants
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn combatant_index(&self, name: &str) -> Option<usize> {
        self.combatants
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn get_zone(&self, region: &str) -> Option<&CombatZone> {
        crate::combat::zone::zone_for_region(&self.zones, region)
    }

    pub fn group(&self, group: GroupRef) -> Option<&CombatGroup> {
        group.resolve(&self.combatants)
    }

    pub fn group_mut(&mut self, group: GroupRef) -> Option<&mut CombatGroup> {
        group.resolve_mut(&mut self.combatants)
    }

    /// Depth-first search of every force on team `iff`
    pub fn find_group(&self, iff: Iff, group_type: GroupType, id: Option<i32>) -> Option<GroupRef> {
        self.combatants
            .iter()
            .enumerate()
            .filter(|(_, c)| c.iff == iff)
            .find_map(|(i, c)| c.find_group(group_type, id).map(|k| GroupRef::new(i, k)))
    }

    /// Like `find_group`, limited to groups sharing the assigned zone of
    /// `near` and skipping reserves
    pub fn find_group_near(&self, iff: Iff, group_type: GroupType, near: GroupRef) -> Option<GroupRef> {
        let zone = self.group(near)?.assigned_zone.clone();
        self.combatants
            .iter()
            .enumerate()
            .filter(|(_, c)| c.iff == iff)
            .find_map(|(i, c)| {
                c.force
                    .find_group_near(group_type, zone.as_deref())
                    .map(|k| GroupRef::new(i, k))
            })
    }

    /// An enemy strike target for `striker`, preferring one in the
    /// striker's zone. Targets must be at least KNOWN, outside reserve and
    /// still worth something.
    pub fn find_strike_target(&self, iff: Iff, striker: GroupRef) -> Option<GroupRef> {
        let striker = self.group(striker)?;
        let zone = striker
            .assigned_zone
            .as_deref()
            .or(striker.current_zone.as_deref());

        let mut fallback = None;
        for (i, c) in self.combatants.iter().enumerate() {
            if c.iff == iff || !is_combatant_iff(c.iff) {
                continue;
            }
            let force = &c.force;
            for key in force.walk(force.root()) {
                let Some(g) = force.get(key) else {
                    continue;
                };
                if !g.group_type.is_strike_target()
                    || g.intel < IntelLevel::Known
                    || force.is_reserve(key)
                    || force.calc_value(key) < 1
                {
                    continue;
                }

                let candidate = GroupRef::new(i, key);
                if zone.is_some() && g.current_zone.as_deref() == zone {
                    return Some(candidate);
                }
                fallback.get_or_insert(candidate);
            }
        }
        fallback
    }

    /// Every unit fielded by team `iff`. A negative `iff` selects all teams.
    pub fn all_combat_units(&self, iff: Iff) -> Vec<&CombatUnit> {
        self.combatants
            .iter()
            .filter(|c| iff < 0 || c.iff == iff)
            .flat_map(|c| c.force.all_units())
            .collect()
    }

    /// Set what the enemy knows about a group
    pub fn set_group_intel(&mut self, group: GroupRef, level: IntelLevel) -> bool {
        match self.combatants.get_mut(group.combatant) {
            Some(c) if c.group(group.group).is_some() => {
                c.force.set_intel_level(group.group, level);
                true
            }
            _ => false,
        }
    }

    // === ACTIONS ===

    pub fn find_action(&self, id: ActionId) -> Option<&CombatAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn find_action_mut(&mut self, id: ActionId) -> Option<&mut CombatAction> {
        self.actions.iter_mut().find(|a| a.id == id)
    }

    pub(crate) fn action_index(&self, id: ActionId) -> Option<usize> {
        self.actions.iter().position(|a| a.id == id)
    }

    /// Snapshot of every action's status, for requirement checks
    pub fn action_statuses(&self) -> AHashMap<ActionId, ActionStatus> {
        self.actions.iter().map(|a| (a.id, a.status)).collect()
    }

    /// Run the eligibility gates of the action at `index`. May advance the
    /// action's own state (delay, cached roll, FAILED or SKIPPED).
    pub fn action_available(&mut self, index: usize) -> bool {
        let statuses = self.action_statuses();
        let Self {
            actions,
            combatants,
            rng,
            time,
            player,
            ..
        } = self;

        let Some(action) = actions.get_mut(index) else {
            return false;
        };
        let env = ActionEnv {
            now: *time,
            player_rank: player.rank,
            statuses: &statuses,
            combatants: combatants.as_slice(),
        };
        action.is_available(&env, rng)
    }

    pub fn fire_action(&mut self, index: usize) -> Result<()> {
        let now = self.time;
        if let Some(action) = self.actions.get_mut(index) {
            action.fire(now)?;
            debug!("Action {} fired, status {}", action.id.0, action.status.name());
        }
        Ok(())
    }

    pub fn fail_action(&mut self, index: usize) {
        let now = self.time;
        if let Some(action) = self.actions.get_mut(index) {
            action.fail(now);
            debug!("Action {} failed", action.id.0);
        }
    }

    /// Mark every currently available action complete without running its
    /// effect
    pub fn commit_expired_actions(&mut self) {
        for index in 0..self.actions.len() {
            if self.action_available(index) {
                self.actions[index].status = ActionStatus::Complete;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, Comparator, Requirement};
    use crate::campaign::CampaignServices;
    use crate::combat::{Force, GroupKey};
    use crate::core::config::EngineConfig;
    use crate::core::types::CampaignId;

    fn campaign() -> Campaign {
        let mut c = Campaign::new(
            CampaignId(2),
            "/nonexistent",
            EngineConfig::default(),
            CampaignServices::default(),
        );

        let mut alliance = Force::new("Alliance", 1);
        let root = alliance.root();
        let mut wing = CombatGroup::new(GroupType::Wing, 10, "Blue Wing", 1);
        wing.assigned_zone = Some("Ostara".into());
        wing.units.push(CombatUnit::new("Viper", "viper", 4, 5));
        alliance.add_component(root, wing).unwrap();

        let mut hegemony = Force::new("Hegemony", 2);
        let root = hegemony.root();
        let mut station = CombatGroup::new(GroupType::Station, 5, "Korius Station", 2);
        station.intel = IntelLevel::Known;
        station.current_zone = Some("Korius".into());
        station.units.push(CombatUnit::new("Station", "station", 1, 50));
        hegemony.add_component(root, station).unwrap();
        let mut hidden = CombatGroup::new(GroupType::Station, 6, "Hidden Station", 2);
        hidden.units.push(CombatUnit::new("Station", "station", 1, 50));
        hegemony.add_component(root, hidden).unwrap();
        let mut base = CombatGroup::new(GroupType::Starbase, 7, "Ostara Base", 2);
        base.intel = IntelLevel::Located;
        base.current_zone = Some("Ostara".into());
        base.units.push(CombatUnit::new("Base", "starbase", 1, 80));
        hegemony.add_component(root, base).unwrap();

        c.combatants.push(Combatant::new("Alliance", 1, alliance));
        c.combatants.push(Combatant::new("Hegemony", 2, hegemony));
        c
    }

    #[test]
    fn test_find_group_by_team() {
        let c = campaign();
        let wing = c.find_group(1, GroupType::Wing, Some(10)).unwrap();
        assert_eq!(c.group(wing).unwrap().name, "Blue Wing");
        assert!(c.find_group(2, GroupType::Wing, Some(10)).is_none());
        assert!(c.get_combatant("hegemony").is_some());
        assert_eq!(c.combatant_index("HEGEMONY"), Some(1));
    }

    #[test]
    fn test_strike_target_prefers_same_zone() {
        let c = campaign();
        let wing = c.find_group(1, GroupType::Wing, None).unwrap();
        let target = c.find_strike_target(1, wing).unwrap();
        assert_eq!(c.group(target).unwrap().name, "Ostara Base");
    }

    #[test]
    fn test_strike_target_needs_intel() {
        let mut c = campaign();
        let wing = c.find_group(1, GroupType::Wing, None).unwrap();
        for id in [5, 7] {
            let g = c.find_group(2, GroupType::Station, Some(id))
                .or_else(|| c.find_group(2, GroupType::Starbase, Some(id)))
                .unwrap();
            c.group_mut(g).unwrap().intel = IntelLevel::Secret;
        }
        assert!(c.find_strike_target(1, wing).is_none());
    }

    #[test]
    fn test_set_group_intel_exposes_chain() {
        let mut c = campaign();
        let hidden = c.find_group(2, GroupType::Station, Some(6)).unwrap();
        assert!(c.set_group_intel(hidden, IntelLevel::Located));
        let root = GroupRef::new(1, GroupKey(0));
        assert_eq!(c.group(root).unwrap().intel, IntelLevel::Known);
        assert!(!c.set_group_intel(GroupRef::new(5, GroupKey(0)), IntelLevel::Known));
    }

    #[test]
    fn test_all_units() {
        let c = campaign();
        assert_eq!(c.all_combat_units(1).len(), 1);
        assert_eq!(c.all_combat_units(2).len(), 3);
        assert_eq!(c.all_combat_units(-1).len(), 4);
    }

    #[test]
    fn test_action_gates_use_campaign_state() {
        let mut c = campaign();
        let mut action = CombatAction::new(ActionId(1), ActionKind::Marker, 1);
        action.requirements.push(Requirement::Score {
            c1: Some(0),
            c2: None,
            comp: Comparator::Ge,
            score: 10,
        });
        c.actions.push(action);

        assert!(!c.action_available(0));
        c.combatants[0].add_score(10);
        assert!(c.action_available(0));

        c.fire_action(0).unwrap();
        assert_eq!(c.find_action(ActionId(1)).unwrap().status, ActionStatus::Complete);
        assert!(c.fire_action(0).is_err());
    }

    #[test]
    fn test_commit_expired_actions() {
        let mut c = campaign();
        c.actions.push(CombatAction::new(ActionId(1), ActionKind::Marker, 1));
        let mut later = CombatAction::new(ActionId(2), ActionKind::Marker, 1);
        later.start_after = 500;
        c.actions.push(later);

        c.commit_expired_actions();
        assert_eq!(c.actions[0].status, ActionStatus::Complete);
        assert_eq!(c.actions[1].status, ActionStatus::Pending);
    }
}
