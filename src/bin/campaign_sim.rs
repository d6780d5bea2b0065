//! Campaign simulation
//! Runs a campaign headless for a number of frames and reports what the
//! planners did

use std::path::PathBuf;

use campaign_engine::campaign::{Campaign, CampaignCatalog, CampaignServices};
use campaign_engine::core::config::EngineConfig;
use campaign_engine::core::context::{FrameContext, PlayerContext};
use campaign_engine::core::error::{CampaignError, ConfigError, Result};
use campaign_engine::core::types::{format_clock, CampaignId, Stardate};
use campaign_engine::save::SaveGameStore;
use clap::Parser;
use tracing::{info, warn};

/// Campaign Sim - step a campaign without flying its missions
#[derive(Parser, Debug)]
#[command(name = "campaign_sim")]
#[command(about = "Run a campaign headless and report generated missions")]
struct Args {
    /// Directory holding numbered campaign directories
    #[arg(long, default_value = "data/campaigns")]
    data: PathBuf,

    /// Campaign to open, by name
    #[arg(long)]
    campaign: Option<String>,

    /// Campaign to open, by id
    #[arg(long)]
    id: Option<i32>,

    /// Resume from a save slot instead of opening a campaign
    #[arg(long)]
    load: Option<String>,

    /// Frames to run
    #[arg(long, default_value_t = 500)]
    ticks: u32,

    /// Game seconds per frame
    #[arg(long, default_value_t = 60.0)]
    step: f64,

    /// Player rank used for template eligibility
    #[arg(long, default_value_t = 0)]
    rank: i32,

    /// Mark each live mission complete once its start time passes
    #[arg(long, default_value_t = false)]
    fly: bool,

    /// Save slot written at the end of the run
    #[arg(long)]
    save: Option<String>,

    /// Engine configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn open_campaign(args: &Args, config: EngineConfig) -> Result<Campaign> {
    if let Some(slot) = &args.load {
        let store = SaveGameStore::new(&config.save_dir);
        return store.load(slot, config, CampaignServices::default());
    }

    let catalog = CampaignCatalog::scan(&args.data)?;
    let entry = match (&args.campaign, args.id) {
        (Some(name), _) => catalog.select(name),
        (None, Some(id)) => catalog.get(CampaignId(id)),
        (None, None) => catalog.campaigns().first(),
    };
    let Some(entry) = entry else {
        return Err(ConfigError::MissingFile(args.data.clone()).into());
    };

    let mut campaign = catalog.open(entry, config, CampaignServices::default())?;
    campaign.start()?;
    Ok(campaign)
}

/// Complete the first live mission whose start time has passed
fn fly_due_mission(campaign: &mut Campaign) {
    let now = campaign.time();
    let Some(id) = campaign
        .missions()
        .iter()
        .find(|m| m.start <= now && !m.is_complete())
        .map(|m| m.id)
    else {
        return;
    };

    if let Some(mission) = campaign.get_mission(id) {
        mission.set_complete(true);
        info!("Flew mission {} '{}'", id.0, mission.name());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("campaign_engine=info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let mut campaign = open_campaign(&args, config)?;
    campaign.set_player(PlayerContext {
        rank: args.rank,
        ..campaign.player()
    });

    println!("Campaign {} '{}'", campaign.id().0, campaign.name());
    println!("{}\n", campaign.description());

    let mut generated = 0;
    let mut seen = Vec::new();
    for tick in 0..args.ticks {
        let now = tick as Stardate * args.step;
        campaign.exec_frame(FrameContext::at(now));

        for m in campaign.missions() {
            if !seen.contains(&m.id) {
                seen.push(m.id);
                generated += 1;
                println!(
                    "[{}] {} {:?} '{}' in {}",
                    format_clock(campaign.time()),
                    m.id.0,
                    m.mission_type,
                    m.name,
                    if m.region.is_empty() { "-" } else { m.region.as_str() }
                );
            }
        }

        if args.fly {
            fly_due_mission(&mut campaign);
        }

        if !campaign.is_active() {
            break;
        }
    }

    println!("\nFinal clock:       {}", format_clock(campaign.time()));
    println!("Status:            {:?}", campaign.status());
    println!("Missions offered:  {}", generated);
    println!("Player team score: {}", campaign.player_team_score());
    if let Some(group) = campaign.player_group_info() {
        println!("Player group:      {}", group.description());
    }

    if let Some(slot) = &args.save {
        match SaveGameStore::new(&campaign.config().save_dir).save(&campaign, slot) {
            Ok(()) => println!("Saved to slot '{}'", slot),
            Err(CampaignError::InvalidSlotName(name)) => warn!("Not saved: bad slot name {:?}", name),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
