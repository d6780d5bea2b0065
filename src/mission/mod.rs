//! Missions as the campaign sees them: metadata, template pools and the
//! opaque handle to the mission itself

pub mod handle;
pub mod info;
pub mod mission_type;
pub mod template;

pub use handle::{
    Mission, MissionFactory, ScriptMission, ScriptMissionFactory, SituationReporter,
    SummarySitrep, SITUATION_PLACEHOLDER,
};
pub use info::MissionInfo;
pub use mission_type::MissionType;
pub use template::{TemplateCatalog, TemplateList};
