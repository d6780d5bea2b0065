//! `campaign.toml`: campaign text, combatants and combat actions

use std::path::Path;

use serde::Deserialize;

use crate::core::error::Result;
use crate::core::types::{Seconds, MAX_RANK, TIME_NEVER};
use crate::defs::{line_list, label, parse_def, rank, read_def, text_block, window, ExtraKeys};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CampaignDef {
    pub name: String,
    pub desc: String,
    #[serde(deserialize_with = "text_block")]
    pub situation: String,
    #[serde(deserialize_with = "text_block")]
    pub orders: String,
    pub scripted: bool,
    pub sequential: bool,
    #[serde(rename = "combatant")]
    pub combatants: Vec<CombatantDef>,
    #[serde(rename = "action")]
    pub actions: Vec<ActionDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CombatantDef {
    pub name: String,
    pub iff: Option<i32>,
    /// Groups overriding the stock order of battle
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupSpec>,
}

impl CombatantDef {
    /// Every override group, parents before their components, in file order
    pub fn group_specs(&self) -> Vec<&GroupSpec> {
        fn walk<'a>(specs: &'a [GroupSpec], out: &mut Vec<&'a GroupSpec>) {
            for spec in specs {
                out.push(spec);
                walk(&spec.groups, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.groups, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupSpec {
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActionDef {
    pub id: i32,
    #[serde(rename = "type")]
    pub action_type: String,
    pub subtype: Option<String>,
    pub opp_type: Option<String>,
    pub source: Option<String>,
    #[serde(alias = "team")]
    pub iff: i32,
    pub count: i32,
    /// Filled from the `*_before` / `*_after` keys after decoding
    #[serde(skip)]
    pub start_before: Seconds,
    #[serde(skip)]
    pub start_after: Seconds,
    #[serde(deserialize_with = "rank")]
    pub min_rank: i32,
    #[serde(deserialize_with = "rank")]
    pub max_rank: i32,
    pub delay: Seconds,
    pub probability: i32,
    pub asset_type: Option<String>,
    pub asset_id: i32,
    pub target_type: Option<String>,
    pub target_id: i32,
    pub target_iff: i32,
    #[serde(rename = "asset_kill", deserialize_with = "line_list")]
    pub asset_kills: Vec<String>,
    #[serde(rename = "target_kill", deserialize_with = "line_list")]
    pub target_kills: Vec<String>,
    #[serde(rename = "req")]
    pub requirements: Vec<RequirementDef>,
    #[serde(alias = "loc")]
    pub location: Option<[f64; 3]>,
    #[serde(alias = "sys")]
    pub system: String,
    #[serde(alias = "rgn", alias = "zone")]
    pub region: String,
    pub file: String,
    pub image: String,
    pub scene: String,
    #[serde(deserialize_with = "text_block")]
    pub text: String,
    #[serde(flatten)]
    pub extra: ExtraKeys,
}

impl Default for ActionDef {
    fn default() -> Self {
        Self {
            id: 0,
            action_type: String::new(),
            subtype: None,
            opp_type: None,
            source: None,
            iff: 0,
            count: 1,
            start_before: TIME_NEVER,
            start_after: 0,
            min_rank: 0,
            max_rank: MAX_RANK,
            delay: 0,
            probability: 100,
            asset_type: None,
            asset_id: 0,
            target_type: None,
            target_id: 0,
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
            extra: ExtraKeys::new(),
        }
    }
}

/// One `[[action.req]]` record. Which variant it becomes depends on the
/// keys present: `action` first, then `group_type`, else a score test.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequirementDef {
    pub action: Option<i32>,
    #[serde(deserialize_with = "label")]
    pub status: Option<String>,
    #[serde(rename = "not")]
    pub negate: bool,
    pub c1: Option<String>,
    pub c2: Option<String>,
    pub comp: Option<String>,
    pub score: i32,
    pub intel: Option<String>,
    pub group_type: Option<String>,
    pub group_id: i32,
}

pub fn load_campaign_def(path: &Path) -> Result<CampaignDef> {
    let def: CampaignDef = read_def(path)?;
    def.with_windows(&path.display().to_string())
}

pub fn parse_campaign_str(content: &str, file: &str) -> Result<CampaignDef> {
    let def: CampaignDef = parse_def(content, file)?;
    def.with_windows(file)
}

impl CampaignDef {
    fn with_windows(mut self, file: &str) -> Result<Self> {
        for action in &mut self.actions {
            let (before, after) = window(&action.extra, file)?;
            if let Some(t) = before {
                action.start_before = t;
            }
            if let Some(t) = after {
                action.start_after = t;
            }
        }
        Ok(self)
    }
}
