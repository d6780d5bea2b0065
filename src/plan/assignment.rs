//! Tasks unlocked assignable groups to the zone they occupy

use tracing::debug;

use crate::campaign::Campaign;
use crate::core::types::Seconds;
use crate::plan::{CampaignPlan, PlanClock, PlanKind};

#[derive(Debug, Clone)]
pub struct AssignmentPlanner {
    interval: Seconds,
    clock: PlanClock,
}

impl AssignmentPlanner {
    pub fn new(interval: Seconds) -> Self {
        Self {
            interval,
            clock: PlanClock::default(),
        }
    }
}

impl CampaignPlan for AssignmentPlanner {
    fn kind(&self) -> PlanKind {
        PlanKind::Assignment
    }

    fn exec_frame(&mut self, campaign: &mut Campaign) {
        let now = campaign.time();
        if !campaign.is_active() || !self.clock.is_due(now, self.interval) {
            return;
        }

        for combatant in campaign.combatants_mut() {
            let keys = combatant.force.walk(combatant.force.root());
            for key in keys {
                let Some(group) = combatant.force.get_mut(key) else {
                    continue;
                };
                if !group.group_type.is_assignable() || group.zone_lock {
                    continue;
                }
                if group.assigned_zone.is_none() && group.current_zone.is_some() {
                    group.assigned_zone = group.current_zone.clone();
                    debug!("{} assigned to {:?}", group.description(), group.assigned_zone);
                }
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
