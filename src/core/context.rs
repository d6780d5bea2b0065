//! Explicit context handed to the campaign instead of global singletons

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{CampaignId, Iff, Stardate};

/// What the campaign needs to know about the current player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerContext {
    pub rank: i32,
    /// Team used when the player has no group yet
    pub iff: Iff,
}

impl Default for PlayerContext {
    fn default() -> Self {
        Self { rank: 0, iff: 1 }
    }
}

/// One external game tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub now: Stardate,
    pub in_cutscene: bool,
}

impl FrameContext {
    pub fn at(now: Stardate) -> Self {
        Self {
            now,
            in_cutscene: false,
        }
    }
}

/// Persistent player-progress store owned outside the engine
pub trait PlayerProgress: std::fmt::Debug {
    fn mark_campaign_complete(&mut self, campaign: CampaignId);
    fn is_campaign_complete(&self, campaign: CampaignId) -> bool;
}

/// In-memory progress store
#[derive(Debug, Clone, Default)]
pub struct MemoryProgress {
    completed: AHashSet<CampaignId>,
}

impl PlayerProgress for MemoryProgress {
    fn mark_campaign_complete(&mut self, campaign: CampaignId) {
        self.completed.insert(campaign);
    }

    fn is_campaign_complete(&self, campaign: CampaignId) -> bool {
        self.completed.contains(&campaign)
    }
}
