//! External collaborators handed to a campaign

use crate::core::context::{MemoryProgress, PlayerProgress};
use crate::mission::handle::{MissionFactory, ScriptMissionFactory, SituationReporter, SummarySitrep};

#[derive(Debug)]
pub struct CampaignServices {
    pub missions: Box<dyn MissionFactory>,
    pub sitrep: Box<dyn SituationReporter>,
    pub progress: Box<dyn PlayerProgress>,
}

impl Default for CampaignServices {
    fn default() -> Self {
        Self {
            missions: Box::new(ScriptMissionFactory),
            sitrep: Box::new(SummarySitrep),
            progress: Box::new(MemoryProgress::default()),
        }
    }
}
