//! Save game slots
//!
//! Each slot is one pretty-printed JSON file named `<slot>.json` in the
//! store directory.

pub mod snapshot;

pub use snapshot::{CampaignSnapshot, SaveFile, SAVE_VERSION};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::campaign::{Campaign, CampaignServices};
use crate::core::config::EngineConfig;
use crate::core::error::{CampaignError, Result};

const SLOT_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct SaveGameStore {
    dir: PathBuf,
}

impl SaveGameStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.trim().is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        if !valid {
            return Err(CampaignError::InvalidSlotName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", name, SLOT_EXTENSION)))
    }

    /// Write the full campaign state to slot `name`
    pub fn save(&self, campaign: &Campaign, name: &str) -> Result<()> {
        let path = self.slot_path(name)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&SaveFile::new(campaign.snapshot()))?;
        fs::write(&path, json)?;
        info!(
            "Saved campaign '{}' at {} to slot '{}'",
            campaign.name(),
            campaign.time(),
            name
        );
        Ok(())
    }

    /// Read slot `name` and rebuild the campaign it holds
    pub fn load(
        &self,
        name: &str,
        config: EngineConfig,
        services: CampaignServices,
    ) -> Result<Campaign> {
        let path = self.slot_path(name)?;
        if !path.is_file() {
            return Err(CampaignError::SlotNotFound(name.to_string()));
        }

        let json = fs::read_to_string(&path)?;
        let file: SaveFile = serde_json::from_str(&json)?;
        if file.version > SAVE_VERSION {
            return Err(CampaignError::IncompatibleSave {
                found: file.version,
                supported: SAVE_VERSION,
            });
        }

        let campaign = Campaign::from_snapshot(file.campaign, config, services);
        info!(
            "Loaded campaign '{}' at {} from slot '{}'",
            campaign.name(),
            campaign.time(),
            name
        );
        Ok(campaign)
    }

    /// Save to the campaign's configured autosave slot
    pub fn save_auto(&self, campaign: &Campaign) -> Result<()> {
        self.save(campaign, &campaign.config().autosave_slot)
    }

    pub fn load_auto(&self, config: EngineConfig, services: CampaignServices) -> Result<Campaign> {
        let slot = config.autosave_slot.clone();
        self.load(&slot, config, services)
    }

    /// Slot names in the store, sorted, without reading them
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == SLOT_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove slot `name`. False when there was nothing to remove.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.slot_path(name)?;
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        debug!("Deleted save slot '{}'", name);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CampaignId;

    fn campaign() -> Campaign {
        Campaign::new(
            CampaignId(2),
            "/nonexistent",
            EngineConfig::default(),
            CampaignServices::default(),
        )
    }

    #[test]
    fn test_slot_names() {
        let store = SaveGameStore::new("/tmp/saves");
        assert!(store.slot_path("Campaign 1").is_ok());
        for bad in ["", "  ", "a/b", "a\\b", ".."] {
            assert!(matches!(
                store.slot_path(bad),
                Err(CampaignError::InvalidSlotName(_))
            ));
        }
    }

    #[test]
    fn test_list_and_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveGameStore::new(tmp.path().join("saves"));
        assert!(store.list().unwrap().is_empty());

        let c = campaign();
        store.save(&c, "beta").unwrap();
        store.save(&c, "alpha").unwrap();
        std::fs::write(tmp.path().join("saves").join("notes.txt"), "x").unwrap();
        assert_eq!(store.list().unwrap(), vec!["alpha", "beta"]);

        assert!(store.delete("alpha").unwrap());
        assert!(!store.delete("alpha").unwrap());
        assert_eq!(store.list().unwrap(), vec!["beta"]);
    }

    #[test]
    fn test_missing_slot() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveGameStore::new(tmp.path());
        let err = store
            .load("nothing", EngineConfig::default(), CampaignServices::default())
            .unwrap_err();
        assert!(matches!(err, CampaignError::SlotNotFound(_)));
    }

    #[test]
    fn test_newer_version_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveGameStore::new(tmp.path());
        let mut file = SaveFile::new(campaign().snapshot());
        file.version = SAVE_VERSION + 1;
        std::fs::write(
            tmp.path().join("future.json"),
            serde_json::to_string(&file).unwrap(),
        )
        .unwrap();

        let err = store
            .load("future", EngineConfig::default(), CampaignServices::default())
            .unwrap_err();
        assert!(matches!(err, CampaignError::IncompatibleSave { found: 2, supported: 1 }));
    }

    #[test]
    fn test_auto_slot() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveGameStore::new(tmp.path());
        store.save_auto(&campaign()).unwrap();
        assert_eq!(store.list().unwrap(), vec!["AutoSave"]);
        let restored = store
            .load_auto(EngineConfig::default(), CampaignServices::default())
            .unwrap();
        assert!(restored.loaded_from_savegame());
    }
}
