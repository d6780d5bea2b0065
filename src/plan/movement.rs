//! Moves groups toward their assigned zones between missions

use tracing::debug;

use crate::campaign::Campaign;
use crate::combat::IntelLevel;
use crate::core::types::Seconds;
use crate::plan::{CampaignPlan, PlanClock, PlanKind};

#[derive(Debug, Clone)]
pub struct MovementPlanner {
    interval: Seconds,
    clock: PlanClock,
}

impl MovementPlanner {
    pub fn new(interval: Seconds) -> Self {
        Self {
            interval,
            clock: PlanClock::default(),
        }
    }
}

impl CampaignPlan for MovementPlanner {
    fn kind(&self) -> PlanKind {
        PlanKind::Movement
    }

    /// A group that moves is no longer tracked: intel above KNOWN drops
    /// back to KNOWN.
    fn exec_frame(&mut self, campaign: &mut Campaign) {
        let now = campaign.time();
        if !campaign.is_active() || !self.clock.is_due(now, self.interval) {
            return;
        }

        let zones = campaign.zones().to_vec();
        for combatant in campaign.combatants_mut() {
            let keys = combatant.force.walk(combatant.force.root());
            for key in keys {
                let Some(group) = combatant.force.get_mut(key) else {
                    continue;
                };
                if !group.group_type.is_movable() {
                    continue;
                }
                let Some(target) = group.assigned_zone.clone() else {
                    continue;
                };
                if group.current_zone.as_deref() == Some(target.as_str()) {
                    continue;
                }
                let Some(zone) = zones.iter().find(|z| z.name == target) else {
                    continue;
                };

                if let Some(region) = zone.first_region() {
                    group.region = region.to_string();
                }
                group.current_zone = Some(target);
                if group.intel > IntelLevel::Known {
                    group.intel = IntelLevel::Known;
                }
                debug!("{} moved to {}", group.description(), zone.name);
            }
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
