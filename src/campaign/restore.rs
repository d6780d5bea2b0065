//! Conversion between a live campaign and its save game snapshot

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::campaign::{Campaign, CampaignServices, CampaignStatus};
use crate::core::config::EngineConfig;
use crate::plan::PlanPipeline;
use crate::save::CampaignSnapshot;

impl Campaign {
    pub fn snapshot(&self) -> CampaignSnapshot {
        CampaignSnapshot {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            situation: self.situation.clone(),
            orders: self.orders.clone(),
            path: self.path.clone(),
            scripted: self.scripted,
            sequential: self.sequential,
            status: self.status,
            time: self.time,
            lockout: self.lockout,
            combatants: self.combatants.clone(),
            zones: self.zones.clone(),
            actions: self.actions.clone(),
            events: self.events.clone(),
            missions: self.missions.clone(),
            templates: self.templates.clone(),
            mission_id: self.mission_id,
            next_mission_id: self.next_mission_id,
            player: self.player,
            player_group: self.player_group,
            player_unit: self.player_unit,
            planners: self.planners.as_ref().map(|p| p.clocks()),
            rng: self.rng.clone(),
        }
    }

    /// Rebuild a campaign from a snapshot. The clock re-anchors on the next
    /// frame and queued scripted events replay once. An ACTIVE campaign
    /// gets a fresh pipeline carrying the saved planner state.
    pub fn from_snapshot(
        snapshot: CampaignSnapshot,
        config: EngineConfig,
        services: CampaignServices,
    ) -> Self {
        let mut campaign = Campaign::new(snapshot.id, snapshot.path, config, services);
        campaign.name = snapshot.name;
        campaign.description = snapshot.description;
        campaign.situation = snapshot.situation;
        campaign.orders = snapshot.orders;
        campaign.scripted = snapshot.scripted;
        campaign.sequential = snapshot.sequential;
        campaign.status = snapshot.status;
        campaign.loaded_from_savegame = true;

        campaign.time = snapshot.time;
        campaign.start_time = None;
        campaign.load_time = None;
        campaign.lockout = snapshot.lockout;

        campaign.combatants = snapshot.combatants;
        campaign.zones = snapshot.zones;
        campaign.actions = snapshot.actions;
        campaign.events = snapshot.events;
        campaign.missions = snapshot.missions;
        campaign.templates = snapshot.templates;
        campaign.mission_id = snapshot.mission_id;
        campaign.next_mission_id = snapshot.next_mission_id;

        campaign.player = snapshot.player;
        campaign.player_group = snapshot.player_group;
        campaign.player_unit = snapshot.player_unit;
        campaign.rng = snapshot.rng;

        if campaign.status == CampaignStatus::Active {
            let mut planners = PlanPipeline::standard(&campaign.config);
            if let Some(clocks) = &snapshot.planners {
                planners.restore_clocks(clocks);
            }
            campaign.planners = Some(planners);
        }
        campaign
    }

    /// Reseed probability rolls
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionStatus, CombatAction};
    use crate::combat::{CombatGroup, CombatUnit, Combatant, Force, GroupRef, GroupType};
    use crate::core::context::FrameContext;
    use crate::core::types::{ActionId, CampaignId, MissionId};
    use crate::mission::{MissionInfo, MissionType};

    fn active_campaign() -> Campaign {
        let mut c = Campaign::new(
            CampaignId(2),
            "/nonexistent",
            EngineConfig::default(),
            CampaignServices::default(),
        );
        let mut force = Force::new("Alliance", 1);
        let root = force.root();
        let mut wing = CombatGroup::new(GroupType::Wing, 3, "Wing", 1);
        wing.units.push(CombatUnit::new("Viper", "viper", 8, 5));
        let wing = force.add_component(root, wing).unwrap();
        c.add_combatant(Combatant::new("Alliance", 1, force));
        c.player_group = Some(GroupRef::new(0, wing));
        for id in 1..=3 {
            c.templates.add(
                GroupType::Wing,
                MissionInfo::new(MissionId(id), format!("t{}", id), MissionType::Patrol),
            );
        }
        c.add_action(CombatAction::new(ActionId(9), ActionKind::Marker, 1));
        c.planners = Some(PlanPipeline::standard(&c.config));
        c.set_status(CampaignStatus::Active);
        c
    }

    #[test]
    fn test_round_trip_keeps_state() {
        let mut c = active_campaign();
        c.exec_frame(FrameContext::at(1000.0));
        c.exec_frame(FrameContext::at(1750.0));
        let wing = c.player_group().unwrap();
        c.find_mission_template(MissionType::Patrol, wing);
        c.actions[0].status = ActionStatus::Complete;

        let snapshot = c.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = Campaign::from_snapshot(
            serde_json::from_str(&json).unwrap(),
            EngineConfig::default(),
            CampaignServices::default(),
        );

        assert_eq!(restored.time(), 750);
        assert_eq!(restored.start_time(), None);
        assert!(restored.loaded_from_savegame());
        assert_eq!(restored.actions()[0].status, ActionStatus::Complete);
        assert_eq!(restored.combatants(), c.combatants());
        assert_eq!(
            restored.templates().lists()[0].index,
            c.templates().lists()[0].index
        );
        assert_eq!(
            restored.planners().map(|p| p.clocks()),
            c.planners().map(|p| p.clocks())
        );
    }

    #[test]
    fn test_restored_clock_resumes_from_saved_time() {
        let mut c = active_campaign();
        c.exec_frame(FrameContext::at(0.0));
        c.exec_frame(FrameContext::at(500.0));

        let mut restored = Campaign::from_snapshot(
            c.snapshot(),
            EngineConfig::default(),
            CampaignServices::default(),
        );
        restored.exec_frame(FrameContext::at(90_000.0));
        assert_eq!(restored.time(), 500);
        restored.exec_frame(FrameContext::at(90_060.0));
        assert_eq!(restored.time(), 560);
        assert!(!restored.loaded_from_savegame());
    }
}
