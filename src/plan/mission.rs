//! Generates the player's next missions
//!
//! Scripted mission actions aimed at the player's group come first. When
//! none is ready the planner walks the mission types suited to the
//! player's group and takes the first template the catalog offers.

use tracing::{debug, info};

use crate::action::ActionKind;
use crate::campaign::Campaign;
use crate::combat::GroupRef;
use crate::core::types::{Seconds, ONE_HOUR};
use crate::mission::{MissionInfo, MissionType};
use crate::plan::{CampaignPlan, PlanClock, PlanKind};

/// A repeatable mission action launches at most once per this window
const ACTION_REPEAT_WINDOW: Seconds = 2 * ONE_HOUR;

#[derive(Debug, Clone)]
pub struct MissionPlanner {
    interval: Seconds,
    max_live: usize,
    lead_time: Seconds,
    clock: PlanClock,
}

impl MissionPlanner {
    pub fn new(interval: Seconds, max_live: usize, lead_time: Seconds) -> Self {
        Self {
            interval,
            max_live,
            lead_time,
            clock: PlanClock::default(),
        }
    }

    /// Launch the first available mission action aimed at the player's
    /// group
    fn launch_action_mission(&mut self, campaign: &mut Campaign, player: GroupRef) -> bool {
        let now = campaign.time();
        let player_iff = campaign.player_iff();

        for index in 0..campaign.actions().len() {
            let action = &campaign.actions()[index];
            let ActionKind::MissionTemplate { mission_type, .. } = action.kind else {
                continue;
            };
            if action.iff != player_iff {
                continue;
            }
            if action.time > 0 && now - action.time < ACTION_REPEAT_WINDOW {
                continue;
            }
            if let Some((group_type, id)) = action.asset {
                if campaign.find_group(action.iff, group_type, Some(id)) != Some(player) {
                    continue;
                }
            }
            if !campaign.action_available(index) {
                continue;
            }

            let mission_id = campaign.next_mission_id();
            let action = &campaign.actions()[index];
            let name = if action.text.is_empty() {
                mission_type.name().to_string()
            } else {
                action.text.clone()
            };
            let mut info = MissionInfo::new(mission_id, name, mission_type);
            info.script = action.file.clone();
            info.system = action.system.clone();
            info.region = action.region.clone();
            info.start = now + self.lead_time;

            let action_id = action.id;
            let id = campaign.add_mission(info);
            if let Err(e) = campaign.fire_action(index) {
                debug!("Mission action {} not consumed: {}", action_id.0, e);
            }
            info!("Mission {} launched from action {}", id.0, action_id.0);
            return true;
        }
        false
    }

    /// Take the next template in the rotation of mission types
    fn launch_template_mission(&mut self, campaign: &mut Campaign, player: GroupRef) -> bool {
        let Some(group) = campaign.group(player) else {
            return false;
        };
        let fighter = group.is_fighter_group();
        let group_type = group.group_type;
        let region = group.region.clone();
        let system = group.assigned_system.clone();
        let rotation: &[MissionType] = if fighter {
            &MissionType::FIGHTER_ROTATION
        } else {
            &MissionType::STARSHIP_ROTATION
        };

        let now = campaign.time();
        let start = self.clock.cursor % rotation.len();
        for step in 0..rotation.len() {
            let mission_type = rotation[(start + step) % rotation.len()];
            let Some(template) = campaign.find_mission_template(mission_type, player).cloned() else {
                continue;
            };

            let mut live = template.instantiate(campaign.next_mission_id(), now + self.lead_time);
            if live.region.is_empty() {
                live.region = region.clone();
            }
            if live.system.is_empty() {
                live.system = system.clone();
            }
            let id = campaign.add_mission(live);
            campaign
                .templates_mut()
                .consume(mission_type, group_type, template.id);
            self.clock.cursor = (start + step + 1) % rotation.len();
            info!(
                "Mission {} generated from template {} ({})",
                id.0,
                template.id.0,
                mission_type.name()
            );
            return true;
        }

        self.clock.cursor = (start + 1) % rotation.len();
        false
    }
}

impl CampaignPlan for MissionPlanner {
    fn kind(&self) -> PlanKind {
        PlanKind::Mission
    }

    fn exec_frame(&mut self, campaign: &mut Campaign) {
        if !campaign.is_active() || campaign.is_scripted() {
            return;
        }

        let now = campaign.time();
        if campaign.is_locked_out() || self.clock.is_locked(now) {
            return;
        }
        let Some(player) = campaign.player_group() else {
            return;
        };
        if campaign.missions().len() >= self.max_live {
            return;
        }
        if !campaign.missions().is_empty() && !self.clock.is_due(now, self.interval) {
            return;
        }

        if !self.launch_action_mission(campaign, player) {
            self.launch_template_mission(campaign, player);
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
