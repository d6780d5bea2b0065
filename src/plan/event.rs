//! Scripted events: story flags, narrative events, intel changes and
//! force directives carried by combat actions

use tracing::{debug, info, warn};

use crate::action::{ActionKind, CombatAction};
use crate::campaign::{Campaign, CampaignStatus};
use crate::combat::{CombatEvent, EventKind};
use crate::core::types::Seconds;
use crate::plan::{CampaignPlan, PlanClock, PlanKind};

#[derive(Debug, Clone)]
pub struct EventPlanner {
    interval: Seconds,
    clock: PlanClock,
}

/// What firing an action did to the campaign
enum Outcome {
    Fired,
    Failed,
}

impl EventPlanner {
    pub fn new(interval: Seconds) -> Self {
        Self {
            interval,
            clock: PlanClock::default(),
        }
    }

    /// Fire every available action the event planner owns. Returns true if
    /// any action fired or failed.
    pub fn exec_scripted_events(&mut self, campaign: &mut Campaign) -> bool {
        let mut executed = false;

        for index in 0..campaign.actions().len() {
            if !campaign.actions()[index].kind.is_scripted_event() {
                continue;
            }
            if !campaign.action_available(index) {
                continue;
            }

            let action = campaign.actions()[index].clone();
            match apply(campaign, &action) {
                Outcome::Fired => {
                    if let Err(e) = campaign.fire_action(index) {
                        warn!("Action {} could not fire: {}", action.id.0, e);
                    }
                }
                Outcome::Failed => campaign.fail_action(index),
            }
            executed = true;
        }

        executed
    }
}

impl CampaignPlan for EventPlanner {
    fn kind(&self) -> PlanKind {
        PlanKind::Event
    }

    fn exec_frame(&mut self, campaign: &mut Campaign) {
        if !campaign.is_active() || campaign.actions().is_empty() {
            return;
        }

        let now = campaign.time();
        if campaign.is_locked_out() || self.clock.is_locked(now) {
            return;
        }
        if !self.clock.is_due(now, self.interval) {
            return;
        }

        // Keep polling every frame while events are still firing
        if self.exec_scripted_events(campaign) {
            return;
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

fn apply(campaign: &mut Campaign, action: &CombatAction) -> Outcome {
    match action.kind {
        ActionKind::Marker => Outcome::Fired,

        ActionKind::CombatEvent { event, source } => {
            let mut log = CombatEvent::new(campaign.time(), event, source, action.iff);
            log.region = action.region.clone();
            log.title = action.text.clone();
            log.info = read_event_info(campaign, action);
            log.image = action.image.clone();
            log.scene = action.scene.clone();
            info!("Campaign event at {}: {}", log.time, log.title);
            campaign.add_event(log);

            match event {
                EventKind::CampaignEnd => campaign.set_status(CampaignStatus::Success),
                EventKind::CampaignFail => campaign.set_status(CampaignStatus::Failure),
                _ => {}
            }
            Outcome::Fired
        }

        ActionKind::IntelEvent { intel } => {
            let Some(group) = asset_group(campaign, action) else {
                return Outcome::Failed;
            };
            campaign.set_group_intel(group, intel);
            debug!("Action {} set intel of {:?} to {:?}", action.id.0, group, intel);
            Outcome::Fired
        }

        ActionKind::StrategicDirective => {
            let group = asset_group(campaign, action);
            match group.and_then(|g| campaign.group_mut(g)) {
                Some(g) => {
                    g.strategic_direction = action.text.clone();
                    Outcome::Fired
                }
                None => Outcome::Failed,
            }
        }

        ActionKind::ZoneAssignment => {
            let Some(zone) = campaign.get_zone(&action.region).map(|z| z.name.clone()) else {
                warn!("Action {} names no known zone for region '{}'", action.id.0, action.region);
                return Outcome::Failed;
            };
            let group = asset_group(campaign, action);
            match group.and_then(|g| campaign.group_mut(g)) {
                Some(g) => {
                    g.assigned_zone = Some(zone);
                    g.zone_lock = true;
                    Outcome::Fired
                }
                None => Outcome::Failed,
            }
        }

        ActionKind::SystemAssignment => {
            let group = asset_group(campaign, action);
            match group.and_then(|g| campaign.group_mut(g)) {
                Some(g) => {
                    g.assigned_system = action.system.clone();
                    Outcome::Fired
                }
                None => Outcome::Failed,
            }
        }

        ActionKind::CampaignSituation => {
            campaign.set_situation(action.text.clone());
            Outcome::Fired
        }

        ActionKind::CampaignOrders => {
            campaign.set_orders(action.text.clone());
            Outcome::Fired
        }

        // Launched by the mission planner
        ActionKind::MissionTemplate { .. } => Outcome::Failed,
    }
}

fn asset_group(campaign: &Campaign, action: &CombatAction) -> Option<crate::combat::GroupRef> {
    let (group_type, id) = action.asset?;
    campaign.find_group(action.iff, group_type, Some(id))
}

fn read_event_info(campaign: &Campaign, action: &CombatAction) -> String {
    if action.file.is_empty() {
        return String::new();
    }
    let path = campaign.resolve_path(&action.file);
    match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Could not read event text {}: {}", path.display(), e);
            String::new()
        }
    }
}
