//! Campaigns available on disk
//!
//! Each campaign lives in its own directory under the data directory. The
//! directory name is the campaign id; the directory must contain a
//! `campaign.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::campaign::loader::CAMPAIGN_FILE;
use crate::campaign::{Campaign, CampaignServices};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::CampaignId;
use crate::defs::campaign::load_campaign_def;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CampaignId,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignCatalog {
    entries: Vec<CatalogEntry>,
}

impl CampaignCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `data_dir` for numbered campaign directories. Directories
    /// without a readable `campaign.toml` are skipped.
    pub fn scan(data_dir: &Path) -> Result<Self> {
        let mut catalog = Self::new();
        if !data_dir.is_dir() {
            warn!("Campaign directory {} not found", data_dir.display());
            return Ok(catalog);
        }

        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(id) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.parse::<i32>().ok())
            else {
                continue;
            };

            match load_campaign_def(&path.join(CAMPAIGN_FILE)) {
                Ok(def) => {
                    debug!("Found campaign {} '{}'", id, def.name);
                    catalog.entries.push(CatalogEntry {
                        id: CampaignId(id),
                        name: def.name,
                        path,
                    });
                }
                Err(e) => warn!("Skipping campaign directory {}: {}", path.display(), e),
            }
        }

        catalog.entries.sort_by_key(|e| e.id);
        info!("Found {} campaigns in {}", catalog.entries.len(), data_dir.display());
        Ok(catalog)
    }

    pub fn campaigns(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: CampaignId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Case-insensitive lookup by display name
    pub fn select(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Highest known campaign id, 0 when empty
    pub fn last_id(&self) -> CampaignId {
        self.entries
            .iter()
            .map(|e| e.id)
            .max()
            .unwrap_or(CampaignId(0))
    }

    /// Register a new custom campaign. Custom ids start at
    /// `CampaignId::CUSTOM_MISSIONS` and grow from the highest known id.
    pub fn create_custom(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> CampaignId {
        let id = CampaignId(self.last_id().0.max(CampaignId::CUSTOM_MISSIONS.0 - 1) + 1);
        let entry = CatalogEntry {
            id,
            name: name.into(),
            path: path.into(),
        };
        info!("Created custom campaign {} '{}'", id.0, entry.name);
        self.entries.push(entry);
        id
    }

    /// Build and load the campaign for `entry`
    pub fn open(
        &self,
        entry: &CatalogEntry,
        config: EngineConfig,
        services: CampaignServices,
    ) -> Result<Campaign> {
        let mut campaign = Campaign::new(entry.id, &entry.path, config, services);
        campaign.load()?;
        Ok(campaign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_campaign(root: &Path, dir: &str, name: &str) {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join(CAMPAIGN_FILE), format!("name = {:?}\n", name)).unwrap();
    }

    #[test]
    fn test_scan_numbered_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        write_campaign(tmp.path(), "3", "Operation Highland");
        write_campaign(tmp.path(), "2", "Operation Shining Fortress");
        write_campaign(tmp.path(), "notes", "Ignored");
        std::fs::create_dir_all(tmp.path().join("4")).unwrap();

        let catalog = CampaignCatalog::scan(tmp.path()).unwrap();
        let ids: Vec<i32> = catalog.campaigns().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(catalog.select("operation highland").unwrap().id, CampaignId(3));
        assert_eq!(catalog.last_id(), CampaignId(3));
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let catalog = CampaignCatalog::scan(Path::new("/nonexistent/campaigns")).unwrap();
        assert!(catalog.campaigns().is_empty());
    }

    #[test]
    fn test_custom_ids() {
        let mut catalog = CampaignCatalog::new();
        assert_eq!(catalog.create_custom("Mine", "/tmp/a"), CampaignId::CUSTOM_MISSIONS);
        assert_eq!(catalog.create_custom("Also Mine", "/tmp/b"), CampaignId(1003));
    }

    #[test]
    fn test_open_loads_campaign() {
        let tmp = tempfile::tempdir().unwrap();
        write_campaign(tmp.path(), "2", "Operation Shining Fortress");
        let catalog = CampaignCatalog::scan(tmp.path()).unwrap();
        let entry = catalog.get(CampaignId(2)).unwrap();
        let campaign = catalog
            .open(entry, EngineConfig::default(), CampaignServices::default())
            .unwrap();
        assert_eq!(campaign.name(), "Operation Shining Fortress");
    }
}
