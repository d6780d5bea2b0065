pub mod config;
pub mod context;
pub mod error;
pub mod types;

pub use config::{EngineConfig, PlannerIntervals, RequirementPolicy};
pub use context::{FrameContext, MemoryProgress, PlayerContext, PlayerProgress};
pub use error::{CampaignError, ConfigError, Result};
