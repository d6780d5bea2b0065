//! The campaign orchestrator
//!
//! `Campaign` owns the clock, the combatants and their forces, the combat
//! actions, the live missions, the template catalog and the planner
//! pipeline. Behavior is split by concern:
//!
//! - `loader`: reading definition files and resolving names
//! - `frame`: lifecycle, clock and the per-tick pipeline
//! - `missions`: mission retrieval and template selection
//! - `player`: the player's group and unit
//! - `groups`: order-of-battle and action queries used by planners
//! - `restore`: save game snapshots

pub mod catalog;
pub mod frame;
pub mod groups;
pub mod loader;
pub mod missions;
pub mod player;
pub mod restore;
pub mod services;

pub use catalog::{CampaignCatalog, CatalogEntry};
pub use services::CampaignServices;

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::action::CombatAction;
use crate::combat::{CombatEvent, CombatZone, Combatant, GroupRef, UnitRef};
use crate::core::config::EngineConfig;
use crate::core::context::PlayerContext;
use crate::core::types::{CampaignId, CampaignKind, MissionId, Seconds, Stardate};
use crate::mission::{MissionInfo, TemplateCatalog};
use crate::plan::PlanPipeline;

/// Campaign lifecycle. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum CampaignStatus {
    #[default]
    Init,
    Active,
    Success,
    Failure,
}

#[derive(Debug)]
pub struct Campaign {
    id: CampaignId,
    name: String,
    description: String,
    situation: String,
    orders: String,
    path: PathBuf,
    scripted: bool,
    sequential: bool,
    loaded_from_savegame: bool,
    status: CampaignStatus,

    // === CLOCK ===
    time: Seconds,
    start_time: Option<Stardate>,
    load_time: Option<Stardate>,
    lockout: Seconds,

    // === CONTENT ===
    combatants: Vec<Combatant>,
    zones: Vec<CombatZone>,
    actions: Vec<CombatAction>,
    events: Vec<CombatEvent>,
    missions: Vec<MissionInfo>,
    templates: TemplateCatalog,
    mission_id: Option<MissionId>,
    next_mission_id: i32,

    // === PLAYER ===
    player: PlayerContext,
    player_group: Option<GroupRef>,
    player_unit: Option<UnitRef>,

    planners: Option<PlanPipeline>,
    rng: ChaCha8Rng,
    config: EngineConfig,
    services: CampaignServices,
}

impl Campaign {
    /// An empty campaign rooted at `path`. Call `load` to read its content.
    pub fn new(
        id: CampaignId,
        path: impl Into<PathBuf>,
        config: EngineConfig,
        services: CampaignServices,
    ) -> Self {
        let seed = config.rng_seed.unwrap_or(id.0 as u64);
        Self {
            id,
            name: String::new(),
            description: String::new(),
            situation: String::new(),
            orders: String::new(),
            path: path.into(),
            scripted: false,
            sequential: false,
            loaded_from_savegame: false,
            status: CampaignStatus::Init,
            time: 0,
            start_time: None,
            load_time: None,
            lockout: 0,
            combatants: Vec::new(),
            zones: Vec::new(),
            actions: Vec::new(),
            events: Vec::new(),
            missions: Vec::new(),
            templates: TemplateCatalog::new(),
            mission_id: None,
            next_mission_id: 1,
            player: PlayerContext::default(),
            player_group: None,
            player_unit: None,
            planners: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            services,
        }
    }

    // === IDENTITY ===

    pub fn id(&self) -> CampaignId {
        self.id
    }

    pub fn kind(&self) -> CampaignKind {
        self.id.kind()
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind() == CampaignKind::Dynamic
    }

    pub fn is_training(&self) -> bool {
        self.kind() == CampaignKind::Training
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn situation(&self) -> &str {
        &self.situation
    }

    pub fn set_situation(&mut self, text: impl Into<String>) {
        self.situation = text.into();
    }

    pub fn orders(&self) -> &str {
        &self.orders
    }

    pub fn set_orders(&mut self, text: impl Into<String>) {
        self.orders = text.into();
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_scripted(&self) -> bool {
        self.scripted
    }

    pub fn is_sequential(&self) -> bool {
        self.sequential
    }

    pub fn loaded_from_savegame(&self) -> bool {
        self.loaded_from_savegame
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    // === CLOCK ===

    /// Seconds since the campaign started
    pub fn time(&self) -> Seconds {
        self.time
    }

    pub fn start_time(&self) -> Option<Stardate> {
        self.start_time
    }

    pub fn load_time(&self) -> Option<Stardate> {
        self.load_time
    }

    pub fn lockout(&self) -> Seconds {
        self.lockout
    }

    pub fn is_locked_out(&self) -> bool {
        self.lockout > 0
    }

    // === CONTENT ===

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatants_mut(&mut self) -> &mut [Combatant] {
        &mut self.combatants
    }

    /// Add a combatant and return its index
    pub fn add_combatant(&mut self, combatant: Combatant) -> usize {
        self.combatants.push(combatant);
        self.combatants.len() - 1
    }

    pub fn zones(&self) -> &[CombatZone] {
        &self.zones
    }

    pub fn add_zone(&mut self, zone: CombatZone) {
        self.zones.push(zone);
    }

    pub fn actions(&self) -> &[CombatAction] {
        &self.actions
    }

    pub fn add_action(&mut self, action: CombatAction) {
        self.actions.push(action);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn add_event(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn missions(&self) -> &[MissionInfo] {
        &self.missions
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateCatalog {
        &mut self.templates
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn player(&self) -> PlayerContext {
        self.player
    }

    pub fn set_player(&mut self, player: PlayerContext) {
        self.player = player;
    }

    pub fn planners(&self) -> Option<&PlanPipeline> {
        self.planners.as_ref()
    }

    pub fn services(&self) -> &CampaignServices {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut CampaignServices {
        &mut self.services
    }

    /// Resolve a campaign-relative file reference
    pub fn resolve_path(&self, file: &str) -> PathBuf {
        let p = Path::new(file);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.path.join(p)
        }
    }
}
