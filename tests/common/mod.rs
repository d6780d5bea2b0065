//! Campaign fixtures written to a temp directory

use std::fs;
use std::path::{Path, PathBuf};

use campaign_engine::campaign::{Campaign, CampaignCatalog, CampaignServices};
use campaign_engine::core::config::EngineConfig;
use campaign_engine::core::types::CampaignId;

pub const DYNAMIC_CAMPAIGN: &str = r#"
name = "Operation Highland"
desc = "Hold the Ostara line"
situation = "Hegemony forces are massing at Korius."
orders = ["Defend Ostara.", "Strike Korius when able."]

[[combatant]]
name = "Alliance"
iff = 1

[[combatant]]
name = "Hegemony"
iff = 2

[[action]]
id = 1
type = "event"
subtype = "campaign_start"
source = "forcom"
team = 1
text = "The war begins."

[[action]]
id = 3
type = "marker"
start_after = 7200
"#;

pub const ZONES: &str = r#"
[[zone]]
name = "Ostara Front"
system = "Ostara"
region = ["Ostara", "Janus"]

[[zone]]
name = "Korius"
system = "Korius"
region = "Korius"
"#;

pub const TEMPLATES: &str = r#"
[[mission]]
id = 10
name = "Ostara Patrol"
rgn = "Ostara"
type = "patrol"
group = "wing"

[[mission]]
id = 11
name = "Raid on Korius"
type = "strike"
group = "wing"
action_id = 3
action_status = "complete"
"#;

pub const ALLIANCE_ROSTER: &str = r#"
name = "Alliance"
iff = 1

[[group]]
type = "fleet"
id = 1
name = "Second Fleet"
intel = "known"
region = "Ostara"

[[group]]
type = "wing"
id = 12
name = "Atlas Wing"
intel = "known"
region = "Ostara"
parent_type = "fleet"
parent_id = 1

[[group.unit]]
name = "Viper"
design = "viper"
count = 8
value = 5
"#;

pub const HEGEMONY_ROSTER: &str = r#"
name = "Hegemony"
iff = 2

[[group]]
type = "fleet"
id = 1
name = "Korius Fleet"
intel = "known"
region = "Korius"

[[group]]
type = "starbase"
id = 4
name = "Korius Station"
intel = "known"
region = "Korius"
parent_type = "fleet"
parent_id = 1

[[group.unit]]
name = "Station"
design = "station"
count = 1
value = 50
"#;

pub const SCRIPTED_CAMPAIGN: &str = r#"
name = "Basic Training"
desc = "Learn to fly"
scripted = true

[[action]]
id = 1
type = "event"
subtype = "campaign_start"
team = 1
text = "Welcome aboard."

[[action]]
id = 2
type = "event"
subtype = "story"
team = 1
start_after = 3600
text = "Report to the flight deck."
"#;

pub const SCRIPTED_MISSIONS: &str = r#"
[[mission]]
id = 1
name = "First Flight"
type = "patrol"
start = 1800
"#;

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Write a dynamic campaign (id 2) and a scripted one (id 1) under `root`
pub fn write_campaigns(root: &Path) -> PathBuf {
    let data = root.join("campaigns");

    let dynamic = data.join("2");
    write(&dynamic.join("campaign.toml"), DYNAMIC_CAMPAIGN);
    write(&dynamic.join("zones.toml"), ZONES);
    write(&dynamic.join("templates.toml"), TEMPLATES);
    write(&dynamic.join("roster").join("alliance.toml"), ALLIANCE_ROSTER);
    write(&dynamic.join("roster").join("hegemony.toml"), HEGEMONY_ROSTER);

    let scripted = data.join("1");
    write(&scripted.join("campaign.toml"), SCRIPTED_CAMPAIGN);
    write(&scripted.join("missions.toml"), SCRIPTED_MISSIONS);

    data
}

pub fn config(root: &Path) -> EngineConfig {
    EngineConfig {
        save_dir: root.join("saves"),
        rng_seed: Some(7),
        ..EngineConfig::default()
    }
}

/// Open and start campaign `id` from the fixture under `root`
pub fn start_campaign(root: &Path, id: i32) -> Campaign {
    let data = write_campaigns(root);
    let catalog = CampaignCatalog::scan(&data).unwrap();
    let entry = catalog.get(CampaignId(id)).unwrap();
    let mut campaign = catalog
        .open(entry, config(root), CampaignServices::default())
        .unwrap();
    campaign.start().unwrap();
    campaign
}
