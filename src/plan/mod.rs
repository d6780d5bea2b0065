//! Campaign planners
//!
//! Architecture: Trait + Data hybrid
//! - `CampaignPlan` is the interface every planner implements
//! - `PlanClock` holds the throttle and lockout state each planner persists
//! - `PlanPipeline` owns the planners in their fixed execution order
//!
//! Planners run once per campaign frame, in order, and mutate the campaign
//! directly. Later planners observe the writes of earlier ones.

pub mod assignment;
pub mod event;
pub mod mission;
pub mod movement;
pub mod pipeline;
pub mod strategic;

pub use assignment::AssignmentPlanner;
pub use event::EventPlanner;
pub use mission::MissionPlanner;
pub use movement::MovementPlanner;
pub use pipeline::PlanPipeline;
pub use strategic::StrategicPlanner;

use serde::{Deserialize, Serialize};

use crate::campaign::Campaign;
use crate::core::types::Seconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanKind {
    Event,
    Strategic,
    Assignment,
    Movement,
    Mission,
}

impl PlanKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Strategic => "strategic",
            Self::Assignment => "assignment",
            Self::Movement => "movement",
            Self::Mission => "mission",
        }
    }
}

/// Throttle and lockout state of one planner, in campaign seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanClock {
    /// Campaign time of the last completed run
    pub exec_time: Option<Seconds>,
    /// No new content before this time
    pub lockout_until: Seconds,
    /// Planner-specific rotation position
    pub cursor: usize,
}

impl PlanClock {
    /// True once `interval` seconds have passed since the last run
    pub fn is_due(&self, now: Seconds, interval: Seconds) -> bool {
        self.exec_time.map_or(true, |t| now - t >= interval)
    }

    pub fn is_locked(&self, now: Seconds) -> bool {
        now < self.lockout_until
    }

    pub fn mark(&mut self, now: Seconds) {
        self.exec_time = Some(now);
    }
}

/// A strategy invoked once per campaign frame
pub trait CampaignPlan: std::fmt::Debug {
    fn kind(&self) -> PlanKind;

    /// Run one frame against the campaign
    fn exec_frame(&mut self, campaign: &mut Campaign);

    fn clock(&self) -> &PlanClock;

    fn clock_mut(&mut self) -> &mut PlanClock;

    /// Suppress new content for `seconds` from `now`
    fn set_lockout(&mut self, now: Seconds, seconds: Seconds) {
        self.clock_mut().lockout_until = now + seconds.max(0);
    }
}
