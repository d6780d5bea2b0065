use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::ActionId;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Action {0:?} fired with no remaining count")]
    ActionExhausted(ActionId),

    #[error("Save game slot not found: {0}")]
    SlotNotFound(String),

    #[error("Invalid save game slot name: {0:?}")]
    InvalidSlotName(String),

    #[error("Save game version {found} is newer than supported version {supported}")]
    IncompatibleSave { found: u32, supported: u32 },
}

/// Problems in campaign definition content, caught at load time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing definition file: {0}")]
    MissingFile(PathBuf),

    #[error("Malformed definition in {file}: {message}")]
    Malformed { file: String, message: String },

    #[error("Unknown {field} name: {value:?}")]
    UnknownName { field: &'static str, value: String },

    #[error("Action {action:?} references unknown combatant {name:?}")]
    UnknownCombatant { action: ActionId, name: String },

    #[error("Action {action:?} references unknown action {referenced:?}")]
    UnknownAction { action: ActionId, referenced: ActionId },

    #[error("{owner} references unknown group {group_type} {group_id}")]
    UnknownGroup {
        owner: String,
        group_type: String,
        group_id: i32,
    },

    #[error("Action {action:?} has a requirement without `{key}`")]
    IncompleteRequirement { action: ActionId, key: &'static str },

    #[error("Action {action:?} has invalid count {count}")]
    InvalidCount { action: ActionId, count: i32 },
}

pub type Result<T> = std::result::Result<T, CampaignError>;
