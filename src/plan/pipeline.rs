//! Ordered planner pipeline

use tracing::debug;

use crate::core::config::EngineConfig;
use crate::core::types::Seconds;
use crate::plan::{
    AssignmentPlanner, CampaignPlan, EventPlanner, MissionPlanner, MovementPlanner, PlanClock,
    PlanKind, StrategicPlanner,
};

/// Planners in execution order. The event planner is held apart from the
/// rest so it always runs first and scripted playback can reach it.
#[derive(Debug)]
pub struct PlanPipeline {
    event: EventPlanner,
    plans: Vec<Box<dyn CampaignPlan>>,
}

impl PlanPipeline {
    pub fn new(event: EventPlanner) -> Self {
        Self {
            event,
            plans: Vec::new(),
        }
    }

    /// Append a planner after those already present
    pub fn with(mut self, plan: Box<dyn CampaignPlan>) -> Self {
        debug!("Pipeline adds {} planner", plan.kind().name());
        self.plans.push(plan);
        self
    }

    /// Event, Strategic, Assignment, Movement, Mission
    pub fn standard(config: &EngineConfig) -> Self {
        let intervals = &config.planner_intervals;
        Self::new(EventPlanner::new(intervals.event))
            .with(Box::new(StrategicPlanner::new(intervals.strategic)))
            .with(Box::new(AssignmentPlanner::new(intervals.assignment)))
            .with(Box::new(MovementPlanner::new(intervals.movement)))
            .with(Box::new(MissionPlanner::new(
                intervals.mission,
                config.max_live_missions,
                config.mission_lead_time,
            )))
    }

    pub fn event(&self) -> &EventPlanner {
        &self.event
    }

    pub fn event_mut(&mut self) -> &mut EventPlanner {
        &mut self.event
    }

    /// Every planner in execution order, event planner first
    pub fn plans_mut(&mut self) -> Vec<&mut dyn CampaignPlan> {
        let mut plans: Vec<&mut dyn CampaignPlan> = Vec::with_capacity(self.plans.len() + 1);
        plans.push(&mut self.event);
        for plan in self.plans.iter_mut() {
            plans.push(plan.as_mut());
        }
        plans
    }

    pub fn kinds(&self) -> Vec<PlanKind> {
        std::iter::once(self.event.kind())
            .chain(self.plans.iter().map(|p| p.kind()))
            .collect()
    }

    pub fn set_lockout(&mut self, now: Seconds, seconds: Seconds) {
        for plan in self.plans_mut() {
            plan.set_lockout(now, seconds);
        }
    }

    /// Persistable state of every planner
    pub fn clocks(&self) -> Vec<(PlanKind, PlanClock)> {
        std::iter::once((self.event.kind(), *self.event.clock()))
            .chain(self.plans.iter().map(|p| (p.kind(), *p.clock())))
            .collect()
    }

    /// Restore planner state by kind. Kinds not in the pipeline are ignored.
    pub fn restore_clocks(&mut self, clocks: &[(PlanKind, PlanClock)]) {
        for plan in self.plans_mut() {
            if let Some((_, clock)) = clocks.iter().find(|(k, _)| *k == plan.kind()) {
                *plan.clock_mut() = *clock;
            }
        }
    }
}
