//! Gated units of scripted and procedural campaign work

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::kind::{ActionKind, ActionStatus};
use crate::action::requirement::{ActionEnv, Requirement};
use crate::combat::group::GroupType;
use crate::core::error::{CampaignError, Result};
use crate::core::types::{ActionId, Iff, Seconds, MAX_RANK, TIME_NEVER};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatAction {
    pub id: ActionId,
    pub kind: ActionKind,
    pub iff: Iff,
    pub status: ActionStatus,
    pub count: i32,
    pub start_after: Seconds,
    pub start_before: Seconds,
    pub min_rank: i32,
    pub max_rank: i32,
    pub delay: Seconds,
    pub probability: i32,
    /// Probability roll, drawn once when every other gate first passes
    pub roll: Option<i32>,
    /// Campaign time of the last fire or fail
    pub time: Seconds,
    pub asset: Option<(GroupType, i32)>,
    pub target: Option<(GroupType, i32)>,
    pub target_iff: Iff,
    pub asset_kills: Vec<String>,
    pub target_kills: Vec<String>,
    pub requirements: Vec<Requirement>,
    pub location: Option<[f64; 3]>,
    pub system: String,
    pub region: String,
    pub file: String,
    pub image: String,
    pub scene: String,
    pub text: String,
}

impl CombatAction {
    pub fn new(id: ActionId, kind: ActionKind, iff: Iff) -> Self {
        Self {
            id,
            kind,
            iff,
            status: ActionStatus::Pending,
            count: 1,
            start_after: 0,
            start_before: TIME_NEVER,
            min_rank: 0,
            max_rank: MAX_RANK,
            delay: 0,
            probability: 100,
            roll: None,
            time: 0,
            asset: None,
            target: None,
            target_iff: 0,
            asset_kills: Vec::new(),
            target_kills: Vec::new(),
            requirements: Vec::new(),
            location: None,
            system: String::new(),
            region: String::new(),
            file: String::new(),
            image: String::new(),
            scene: String::new(),
            text: String::new(),
        }
    }

    /// Whether the action may fire now. Gates are checked in order:
    /// status, time window, rank, remaining count, requirements, delay,
    /// then a single cached probability roll. Passing the window's upper
    /// bound marks the action FAILED; losing the roll marks it SKIPPED.
    /// A pending delay pushes the window start out and clears itself.
    pub fn is_available<R: Rng>(&mut self, env: &ActionEnv<'_>, rng: &mut R) -> bool {
        if self.status != ActionStatus::Pending {
            return false;
        }

        if env.now < self.start_after {
            return false;
        }

        if env.now >= self.start_before {
            self.status = ActionStatus::Failed;
            return false;
        }

        if env.player_rank < self.min_rank || env.player_rank > self.max_rank {
            return false;
        }

        if self.count <= 0 {
            return false;
        }

        if !self.requirements.iter().all(|r| r.holds(env)) {
            return false;
        }

        if self.delay > 0 {
            self.start_after = env.now + self.delay;
            self.delay = 0;
            return false;
        }

        let roll = *self.roll.get_or_insert_with(|| rng.gen_range(0..100));
        if roll >= self.probability {
            self.status = ActionStatus::Skipped;
            return false;
        }

        true
    }

    /// Consume one firing. The action completes when its count runs out.
    pub fn fire(&mut self, now: Seconds) -> Result<()> {
        if self.count <= 0 {
            return Err(CampaignError::ActionExhausted(self.id));
        }
        self.time = now;
        self.count -= 1;
        if self.count < 1 {
            self.status = ActionStatus::Complete;
        }
        Ok(())
    }

    pub fn fail(&mut self, now: Seconds) {
        self.time = now;
        self.count = 0;
        self.status = ActionStatus::Failed;
    }

    pub fn is_complete(&self) -> bool {
        self.status == ActionStatus::Complete
    }
}
