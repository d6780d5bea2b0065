//! Campaign definition files
//!
//! Serde records for the TOML content that describes a campaign: the
//! campaign file itself, combat zones, mission lists, custom missions,
//! mission templates and stock orders of battle. Records only check shape;
//! names are resolved against the live campaign by `campaign::loader`.

pub mod campaign;
pub mod missions;
pub mod roster;
pub mod templates;
pub mod zones;

pub use campaign::{ActionDef, CampaignDef, CombatantDef, GroupSpec, RequirementDef};
pub use missions::MissionDef;
pub use roster::{RosterDef, RosterGroupDef, UnitDef};
pub use templates::TemplateDef;
pub use zones::ZoneDef;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

use crate::core::error::{ConfigError, Result};
use crate::core::types::{parse_clock, rank_from_name, Seconds, ONE_DAY};

/// Read one definition file and decode it into `T`
pub fn read_def<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }
    let content = fs::read_to_string(path)?;
    parse_def(&content, &path.display().to_string())
}

pub fn parse_def<T: DeserializeOwned>(content: &str, file: &str) -> Result<T> {
    toml::from_str(content).map_err(|e| {
        ConfigError::Malformed {
            file: file.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

pub(crate) fn malformed(file: &str, key: &str, expected: &str) -> ConfigError {
    ConfigError::Malformed {
        file: file.to_string(),
        message: format!("`{}` must be {}", key, expected),
    }
}

/// Time in campaign seconds or as clock text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Seconds(i64),
    Clock(String),
}

impl TimeValue {
    /// Seconds as written. Clock text is read as-is.
    pub fn absolute(&self) -> Option<Seconds> {
        match self {
            Self::Seconds(n) => Some(*n),
            Self::Clock(text) => parse_clock(text),
        }
    }

    /// Window bound in seconds. Clock text is shifted back one day.
    pub fn window_bound(&self) -> Option<Seconds> {
        match self {
            Self::Seconds(n) => Some(*n),
            Self::Clock(text) => parse_clock(text).map(|t| t - ONE_DAY),
        }
    }
}

/// Keys a record did not name, kept for the window bound scan
pub type ExtraKeys = BTreeMap<String, toml::Value>;

/// Window bounds are any extra key naming `before` / `after`. Returns
/// `(before, after)`.
pub(crate) fn window(extra: &ExtraKeys, file: &str) -> Result<(Option<Seconds>, Option<Seconds>)> {
    let mut before = None;
    let mut after = None;
    for (key, value) in extra {
        let slot = if key.contains("before") {
            &mut before
        } else if key.contains("after") {
            &mut after
        } else {
            continue;
        };
        let time = value
            .clone()
            .try_into::<TimeValue>()
            .ok()
            .and_then(|t| t.window_bound())
            .ok_or_else(|| malformed(file, key, "a time"))?;
        *slot = Some(time);
    }
    Ok((before, after))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextBlock {
    Line(String),
    Lines(Vec<String>),
}

/// Text that may also be written as an array of lines
pub(crate) fn text_block<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(match TextBlock::deserialize(d)? {
        TextBlock::Line(s) => s,
        TextBlock::Lines(lines) => lines.join("\n"),
    })
}

/// One entry per line, from text or an array
pub(crate) fn line_list<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    Ok(match TextBlock::deserialize(d)? {
        TextBlock::Line(s) => s.lines().map(str::to_string).collect(),
        TextBlock::Lines(lines) => lines,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Name(String),
    Number(i64),
}

/// A name that content sometimes writes as its number
pub(crate) fn label<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Label::deserialize(d)? {
        Label::Name(s) => Some(s),
        Label::Number(n) => Some(n.to_string()),
    })
}

/// Rank as a number or a rank name
pub(crate) fn rank<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<i32, D::Error> {
    match Label::deserialize(d)? {
        Label::Number(n) => Ok(n as i32),
        Label::Name(s) => rank_from_name(&s).ok_or_else(|| D::Error::custom(format!("unknown rank `{}`", s))),
    }
}

/// Start time with clock text taken as-is
pub(crate) fn start_time<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Seconds, D::Error> {
    let value = TimeValue::deserialize(d)?;
    value
        .absolute()
        .ok_or_else(|| D::Error::custom(format!("invalid time {:?}", value)))
}
