//! Places every group into the combat zone that holds its region

use tracing::debug;

use crate::campaign::Campaign;
use crate::combat::zone::zone_for_region;
use crate::core::types::Seconds;
use crate::plan::{CampaignPlan, PlanClock, PlanKind};

#[derive(Debug, Clone)]
pub struct StrategicPlanner {
    interval: Seconds,
    clock: PlanClock,
}

impl StrategicPlanner {
    pub fn new(interval: Seconds) -> Self {
        Self {
            interval,
            clock: PlanClock::default(),
        }
    }
}

impl CampaignPlan for StrategicPlanner {
    fn kind(&self) -> PlanKind {
        PlanKind::Strategic
    }

    fn exec_frame(&mut self, campaign: &mut Campaign) {
        let now = campaign.time();
        if !campaign.is_active() || !self.clock.is_due(now, self.interval) {
            return;
        }

        let zones = campaign.zones().to_vec();
        let mut placed = 0;
        for combatant in campaign.combatants_mut() {
            let keys = combatant.force.walk(combatant.force.root());
            for key in keys {
                let Some(group) = combatant.force.get_mut(key) else {
                    continue;
                };
                if group.region.is_empty() {
                    continue;
                }
                let zone = zone_for_region(&zones, &group.region).map(|z| z.name.clone());
                if zone.is_some() && group.current_zone != zone {
                    group.current_zone = zone;
                    placed += 1;
                }
            }
        }

        if placed > 0 {
            debug!("Strategic planner placed {} groups", placed);
        }
        self.clock.mark(now);
    }

    fn clock(&self) -> &PlanClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut PlanClock {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{CampaignServices, CampaignStatus};
    use crate::combat::{CombatGroup, CombatZone, Combatant, Force, GroupType};
    use crate::core::config::EngineConfig;
    use crate::core::types::CampaignId;

    #[test]
    fn test_groups_land_in_their_zone() {
        let mut c = Campaign::new(
            CampaignId(2),
            "/nonexistent",
            EngineConfig::default(),
            CampaignServices::default(),
        );
        let mut zone = CombatZone::new("Korius Zone", "Korius");
        zone.regions.push("Korius".into());
        c.add_zone(zone);

        let mut force = Force::new("Hegemony", 2);
        let root = force.root();
        let mut group = CombatGroup::new(GroupType::BattleGroup, 1, "BG 1", 2);
        group.region = "korius".into();
        force.add_component(root, group).unwrap();
        force
            .add_component(root, CombatGroup::new(GroupType::BattleGroup, 2, "BG 2", 2))
            .unwrap();
        c.add_combatant(Combatant::new("Hegemony", 2, force));

        let mut planner = StrategicPlanner::new(300);
        planner.exec_frame(&mut c);
        assert!(c.combatants()[0].force.iter().all(|(_, g)| g.current_zone.is_none()));

        c.set_status(CampaignStatus::Active);
        planner.exec_frame(&mut c);
        let placed: Vec<_> = c.combatants()[0]
            .force
            .iter()
            .filter_map(|(_, g)| g.current_zone.clone())
            .collect();
        assert_eq!(placed, vec!["Korius Zone".to_string()]);
    }
}
