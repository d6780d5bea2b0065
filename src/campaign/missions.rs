//! Mission retrieval, live mission bookkeeping and template selection

use tracing::{debug, info, warn};

use crate::campaign::Campaign;
use crate::combat::{GroupRef, GroupType};
use crate::core::error::Result;
use crate::core::types::MissionId;
use crate::mission::{Mission, MissionInfo, MissionType, TemplateList, SITUATION_PLACEHOLDER};

impl Campaign {
    pub fn get_mission_info(&self, id: MissionId) -> Option<&MissionInfo> {
        self.missions.iter().find(|m| m.id == id)
    }

    /// The mission with `id`, loading it from its script on first use.
    /// Dynamic campaigns brief a mission whose situation is still the
    /// placeholder before handing it out.
    pub fn get_mission(&mut self, id: MissionId) -> Option<&mut (dyn Mission + 'static)> {
        let index = self.missions.iter().position(|m| m.id == id)?;
        self.ensure_loaded(index)?;

        if self.is_dynamic() {
            self.brief_mission(index);
        }

        self.missions[index].mission.as_deref_mut()
    }

    /// Same as `get_mission`, looked up by script reference
    pub fn get_mission_by_file(&mut self, script: &str) -> Option<&mut (dyn Mission + 'static)> {
        let id = self.missions.iter().find(|m| m.script == script)?.id;
        self.get_mission(id)
    }

    fn ensure_loaded(&mut self, index: usize) -> Option<()> {
        if self.missions[index].mission.is_some() {
            return Some(());
        }

        let info = &self.missions[index];
        let mut mission = self.services.missions.create(info.id);
        if !info.script.is_empty() {
            let path = self.resolve_path(&info.script);
            if let Err(e) = mission.load(&path) {
                warn!("Could not load mission {} from {}: {}", info.id.0, path.display(), e);
                return None;
            }
        }
        self.missions[index].attach(mission);
        Some(())
    }

    fn brief_mission(&mut self, index: usize) {
        let Some(mut mission) = self.missions[index].mission.take() else {
            return;
        };
        if mission.situation() == SITUATION_PLACEHOLDER {
            self.services.sitrep.generate(self, mission.as_mut());
        }
        self.missions[index].mission = Some(mission);
    }

    /// Add a live mission and return its id
    pub fn add_mission(&mut self, mut info: MissionInfo) -> MissionId {
        if info.id.0 <= 0 || self.get_mission_info(info.id).is_some() {
            info.id = self.next_mission_id();
        } else {
            self.next_mission_id = self.next_mission_id.max(info.id.0 + 1);
        }
        let id = info.id;
        debug!("Added mission {} '{}' starting at {}", id.0, info.name, info.start);
        self.missions.push(info);
        id
    }

    pub fn next_mission_id(&mut self) -> MissionId {
        let id = MissionId(self.next_mission_id);
        self.next_mission_id += 1;
        id
    }

    /// Blank custom mission with a script slot under `missions/`
    pub fn create_new_mission(&mut self) -> Result<MissionId> {
        let id = self.next_mission_id();
        let mut info = MissionInfo::new(id, "New Custom Mission", MissionType::Patrol);
        info.script = format!("missions/custom{:03}.toml", id.0);

        let mut mission = self.services.missions.create(id);
        mission.parse_mission(&format!("name = {:?}", info.name))?;
        info.mission = Some(mission);

        self.missions.push(info);
        info!("Created custom mission {}", id.0);
        Ok(id)
    }

    /// Remove a mission. Custom campaigns also delete its script file.
    pub fn delete_mission(&mut self, id: MissionId) -> Result<bool> {
        let Some(index) = self.missions.iter().position(|m| m.id == id) else {
            return Ok(false);
        };
        let info = self.missions.remove(index);

        if self.kind() == crate::core::types::CampaignKind::Custom && !info.script.is_empty() {
            let path = self.resolve_path(&info.script);
            if path.is_file() {
                std::fs::remove_file(&path)?;
            }
        }
        if self.mission_id == Some(id) {
            self.mission_id = None;
        }
        info!("Deleted mission {} '{}'", id.0, info.name);
        Ok(true)
    }

    /// Drop the loaded mission so the next lookup reads its script again
    pub fn reload_mission(&mut self, id: MissionId) -> Option<&mut (dyn Mission + 'static)> {
        let info = self.missions.iter_mut().find(|m| m.id == id)?;
        info.mission = None;
        self.get_mission(id)
    }

    pub fn mission_id(&self) -> Option<MissionId> {
        self.mission_id
    }

    /// Select the mission the player will fly next
    pub fn set_mission_id(&mut self, id: MissionId) -> bool {
        if self.get_mission_info(id).is_some() {
            self.mission_id = Some(id);
            true
        } else {
            false
        }
    }

    pub fn current_mission(&mut self) -> Option<&mut (dyn Mission + 'static)> {
        let id = self.mission_id?;
        self.get_mission(id)
    }

    /// Start the selected mission. False when none is selected or it
    /// cannot be loaded.
    pub fn start_mission(&mut self) -> Result<bool> {
        let Some(mission) = self.current_mission() else {
            return Ok(false);
        };
        mission.start()?;
        let (id, name) = (mission.identity(), mission.name().to_string());
        info!("Campaign start mission {} '{}' at {}", id.0, name, self.time);
        Ok(true)
    }

    /// Return the selected mission to its unflown state
    pub fn rollback_mission(&mut self) -> bool {
        match self.current_mission() {
            Some(mission) => {
                mission.set_active(false);
                mission.set_complete(false);
                true
            }
            None => false,
        }
    }

    pub fn get_template_list(
        &self,
        mission_type: MissionType,
        group_type: GroupType,
    ) -> Option<&TemplateList> {
        self.templates.get(mission_type, group_type)
    }

    /// Next eligible template for the player group's pool, in rotation.
    /// A candidate gated on an action is eligible only while that action
    /// has the required status; a missing gating action makes it
    /// ineligible. Selection alone does not use up a one-shot template.
    pub fn find_mission_template(
        &mut self,
        mission_type: MissionType,
        player_group: GroupRef,
    ) -> Option<&MissionInfo> {
        let group = player_group.resolve(&self.combatants)?;
        let group_type = group.group_type;
        let region = group.region.clone();

        let statuses = self.action_statuses();
        let now = self.time;
        let rank = self.player.rank;

        let list = self.templates.get_mut(mission_type, group_type)?;
        let pick = list.rotate(|info| {
            if let Some(action) = info.action_id {
                if statuses.get(&action) != Some(&info.action_status) {
                    return false;
                }
            }
            info.is_available(now, rank, &region)
        });

        match pick {
            Some(i) => {
                debug!(
                    "Template {} '{}' selected for {:?}/{:?}",
                    list.missions[i].id.0,
                    list.missions[i].name,
                    mission_type,
                    group_type
                );
                Some(&list.missions[i])
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionStatus, CombatAction};
    use crate::campaign::CampaignServices;
    use crate::combat::{CombatGroup, CombatUnit, Combatant, Force};
    use crate::core::config::EngineConfig;
    use crate::core::types::{ActionId, CampaignId};
    use crate::mission::ScriptMission;

    fn campaign() -> (Campaign, GroupRef) {
        let mut c = Campaign::new(CampaignId(2), "/nonexistent", EngineConfig::default(), CampaignServices::default());
        let mut force = Force::new("Alliance", 1);
        let root = force.root();
        let mut wing = CombatGroup::new(GroupType::Wing, 12, "Viper Wing", 1);
        wing.units.push(CombatUnit::new("Viper", "viper", 8, 5));
        let wing = force.add_component(root, wing).unwrap();
        c.combatants.push(Combatant::new("Alliance", 1, force));
        (c, GroupRef::new(0, wing))
    }

    fn add_template(c: &mut Campaign, id: i32) {
        c.templates.add(
            GroupType::Wing,
            MissionInfo::new(MissionId(id), format!("t{}", id), MissionType::Patrol),
        );
    }

    #[test]
    fn test_template_rotation() {
        let (mut c, wing) = campaign();
        for id in 1..=3 {
            add_template(&mut c, id);
        }

        let picks: Vec<i32> = (0..4)
            .map(|_| c.find_mission_template(MissionType::Patrol, wing).unwrap().id.0)
            .collect();
        assert_eq!(picks, vec![1, 2, 3, 1]);
        assert!(c.find_mission_template(MissionType::Sweep, wing).is_none());
    }

    #[test]
    fn test_gated_template() {
        let (mut c, wing) = campaign();
        let mut gated = MissionInfo::new(MissionId(1), "gated", MissionType::Patrol);
        gated.action_id = Some(ActionId(7));
        gated.action_status = ActionStatus::Complete;
        c.templates.add(GroupType::Wing, gated);

        assert!(c.find_mission_template(MissionType::Patrol, wing).is_none());

        c.actions.push(CombatAction::new(ActionId(7), ActionKind::Marker, 1));
        assert!(c.find_mission_template(MissionType::Patrol, wing).is_none());

        c.actions[0].status = ActionStatus::Complete;
        assert_eq!(
            c.find_mission_template(MissionType::Patrol, wing).map(|m| m.id),
            Some(MissionId(1))
        );
    }

    #[test]
    fn test_selection_does_not_use_up_one_shot() {
        let (mut c, wing) = campaign();
        let mut once = MissionInfo::new(MissionId(1), "once", MissionType::Patrol);
        once.exec_once = 1;
        c.templates.add(GroupType::Wing, once);

        assert!(c.find_mission_template(MissionType::Patrol, wing).is_some());
        assert!(c.find_mission_template(MissionType::Patrol, wing).is_some());
    }

    #[test]
    fn test_reload_keeps_flight_state() {
        let (mut c, _) = campaign();
        let mut info = MissionInfo::new(MissionId(5), "Patrol", MissionType::Patrol);
        info.active = true;
        c.add_mission(info);

        assert!(c.get_mission(MissionId(5)).unwrap().is_active());
    }

    #[test]
    fn test_unknown_mission_is_none() {
        let (mut c, _) = campaign();
        assert!(c.get_mission(MissionId(99)).is_none());
        assert!(!c.set_mission_id(MissionId(99)));
    }

    #[test]
    fn test_placeholder_situation_is_briefed() {
        let (mut c, wing) = campaign();
        c.player_group = Some(wing);
        let mut info = MissionInfo::new(MissionId(5), "Patrol", MissionType::Patrol);
        info.mission = Some(Box::new(ScriptMission::new(MissionId(5))));
        c.add_mission(info);

        let mission = c.get_mission(MissionId(5)).unwrap();
        assert_ne!(mission.situation(), SITUATION_PLACEHOLDER);
        assert!(mission.situation().contains("Viper Wing"));
    }

    #[test]
    fn test_create_select_start_rollback() {
        let (mut c, _) = campaign();
        let id = c.create_new_mission().unwrap();
        assert!(c.set_mission_id(id));
        assert!(c.start_mission().unwrap());
        assert!(c.current_mission().unwrap().is_active());
        assert!(c.rollback_mission());
        assert!(!c.current_mission().unwrap().is_active());

        assert!(c.delete_mission(id).unwrap());
        assert_eq!(c.mission_id(), None);
        assert!(!c.delete_mission(id).unwrap());
    }

    #[test]
    fn test_add_mission_assigns_fresh_ids() {
        let (mut c, _) = campaign();
        let a = c.add_mission(MissionInfo::new(MissionId(4), "a", MissionType::Patrol));
        let b = c.add_mission(MissionInfo::new(MissionId(4), "b", MissionType::Patrol));
        assert_eq!(a, MissionId(4));
        assert_eq!(b, MissionId(5));
    }
}
