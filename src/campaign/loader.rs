//! Reading campaign content and resolving its names
//!
//! `load` reads the campaign text, zones and one mission source: a flat
//! mission list, the template catalog or per-file custom missions, in that
//! order of preference. `load_full` additionally builds the combatants
//! from the stock roster and decodes every combat action. Dangling
//! references are handled according to the configured requirement policy.

use tracing::{error, info, warn};

use crate::action::{ActionKind, ActionStatus, CombatAction, Comparator, Requirement};
use crate::campaign::Campaign;
use crate::combat::roster::CombatRoster;
use crate::combat::{Combatant, Force, GroupType, IntelLevel};
use crate::core::config::RequirementPolicy;
use crate::core::error::{ConfigError, Result};
use crate::core::types::{ActionId, MissionId};
use crate::defs::campaign::load_campaign_def;
use crate::defs::missions::{load_mission_list, scan_custom_missions};
use crate::defs::templates::load_templates;
use crate::defs::zones::load_zones;
use crate::defs::{ActionDef, CampaignDef, MissionDef, RequirementDef, TemplateDef};
use crate::mission::{MissionInfo, MissionType};

pub const CAMPAIGN_FILE: &str = "campaign.toml";
pub const ZONES_FILE: &str = "zones.toml";
pub const MISSIONS_FILE: &str = "missions.toml";
pub const TEMPLATES_FILE: &str = "templates.toml";
pub const CUSTOM_MISSIONS_DIR: &str = "missions";
pub const ROSTER_DIR: &str = "roster";

/// Applies the requirement policy to a dangling reference
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolver {
    policy: RequirementPolicy,
}

impl Resolver {
    pub(crate) fn new(policy: RequirementPolicy) -> Self {
        Self { policy }
    }

    /// Strict: the error. Lenient: a warning.
    pub(crate) fn check(&self, err: ConfigError) -> Result<()> {
        match self.policy {
            RequirementPolicy::Strict => Err(err.into()),
            RequirementPolicy::Lenient => {
                warn!("Ignoring definition problem: {}", err);
                Ok(())
            }
        }
    }

    /// Decode a name, reporting unknown ones through `check`
    pub(crate) fn name<T>(
        &self,
        field: &'static str,
        value: &str,
        decode: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        match decode(value) {
            Some(v) => Ok(Some(v)),
            None => {
                self.check(ConfigError::UnknownName {
                    field,
                    value: value.to_string(),
                })?;
                Ok(None)
            }
        }
    }
}

fn status_from_text(text: &str) -> Option<ActionStatus> {
    ActionStatus::from_name(text).or_else(|| match text.trim().parse::<i32>().ok()? {
        0 => Some(ActionStatus::Pending),
        1 => Some(ActionStatus::Active),
        2 => Some(ActionStatus::Skipped),
        3 => Some(ActionStatus::Failed),
        4 => Some(ActionStatus::Complete),
        _ => None,
    })
}

impl Campaign {
    /// Read campaign text, zones and missions. On failure the campaign is
    /// left empty and the error is returned.
    pub fn load(&mut self) -> Result<()> {
        self.clear();
        match self.load_content() {
            Ok(()) => {
                info!(
                    "Loaded campaign {} '{}' ({} missions, {} template pools)",
                    self.id.0,
                    self.name,
                    self.missions.len(),
                    self.templates.lists().len()
                );
                Ok(())
            }
            Err(e) => {
                error!("Failed to load campaign from {}: {}", self.path.display(), e);
                self.clear();
                Err(e)
            }
        }
    }

    fn load_content(&mut self) -> Result<()> {
        let def = load_campaign_def(&self.path.join(CAMPAIGN_FILE))?;
        self.apply_campaign_text(&def);

        let zones_path = self.path.join(ZONES_FILE);
        if zones_path.exists() {
            self.zones = load_zones(&zones_path)?;
        }

        let resolver = Resolver::new(self.config.requirement_policy);
        let missions_path = self.path.join(MISSIONS_FILE);
        let templates_path = self.path.join(TEMPLATES_FILE);
        let custom_dir = self.path.join(CUSTOM_MISSIONS_DIR);

        if missions_path.exists() {
            for def in load_mission_list(&missions_path)? {
                let info = mission_from_def(&def, resolver)?;
                self.missions.push(info);
            }
        } else if templates_path.exists() {
            for def in load_templates(&templates_path)? {
                if let Some((group_type, info)) = template_from_def(&def, resolver)? {
                    self.templates.add(group_type, info);
                }
            }
        } else if custom_dir.is_dir() {
            for def in scan_custom_missions(&custom_dir)? {
                let info = mission_from_def(&def, resolver)?;
                self.missions.push(info);
            }
        }

        self.next_mission_id = self.highest_mission_id() + 1;
        Ok(())
    }

    /// Load everything including combatants and combat actions
    pub fn load_full(&mut self) -> Result<()> {
        let result = self.load_forces_and_actions();
        if let Err(e) = &result {
            error!("Failed to load campaign forces from {}: {}", self.path.display(), e);
            self.combatants.clear();
            self.actions.clear();
        }
        result
    }

    fn load_forces_and_actions(&mut self) -> Result<()> {
        let def = load_campaign_def(&self.path.join(CAMPAIGN_FILE))?;
        self.apply_campaign_text(&def);

        let resolver = Resolver::new(self.config.requirement_policy);
        let roster_dir = self
            .config
            .roster_dir
            .clone()
            .unwrap_or_else(|| self.path.join(ROSTER_DIR));
        let roster = CombatRoster::load(&roster_dir, self.config.requirement_policy)?;

        self.combatants = build_combatants(&def, &roster, resolver)?;
        self.actions = def
            .actions
            .iter()
            .map(|a| build_action(a, &self.combatants, resolver))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();

        self.validate_action_references(resolver)?;

        info!(
            "Loaded {} combatants and {} actions for campaign '{}'",
            self.combatants.len(),
            self.actions.len(),
            self.name
        );
        Ok(())
    }

    fn apply_campaign_text(&mut self, def: &CampaignDef) {
        self.name = def.name.clone();
        self.description = def.desc.clone();
        self.situation = def.situation.clone();
        self.orders = def.orders.clone();
        self.scripted = def.scripted;
        self.sequential = def.sequential;
    }

    fn validate_action_references(&self, resolver: Resolver) -> Result<()> {
        let known = |id: ActionId| self.actions.iter().any(|a| a.id == id);

        for action in &self.actions {
            for req in &action.requirements {
                if let Requirement::Action { action: referenced, .. } = req {
                    if !known(*referenced) {
                        resolver.check(ConfigError::UnknownAction {
                            action: action.id,
                            referenced: *referenced,
                        })?;
                    }
                }
            }
        }

        for list in self.templates.lists() {
            for info in &list.missions {
                if let Some(referenced) = info.action_id {
                    if !known(referenced) {
                        resolver.check(ConfigError::UnknownAction {
                            action: ActionId(info.id.0),
                            referenced,
                        })?;
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn highest_mission_id(&self) -> i32 {
        let live = self.missions.iter().map(|m| m.id.0);
        let templates = self
            .templates
            .lists()
            .iter()
            .flat_map(|l| l.missions.iter().map(|m| m.id.0));
        live.chain(templates).max().unwrap_or(0)
    }

    /// Materialize what `start` needs: forces for a new dynamic campaign,
    /// or actions and every mission for a scripted one.
    pub fn prep(&mut self) -> Result<()> {
        if self.is_dynamic() && self.combatants.is_empty() {
            self.load_full()?;
        } else if !self.is_dynamic() && self.actions.is_empty() {
            self.load_full()?;
            let ids: Vec<MissionId> = self.missions.iter().map(|m| m.id).collect();
            for id in ids {
                if self.get_mission(id).is_none() {
                    warn!("Mission {} of campaign '{}' could not be loaded", id.0, self.name);
                }
            }
        }

        self.check_player_group();
        Ok(())
    }

    /// Drop all content. Identity, configuration and services are kept.
    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
        self.situation.clear();
        self.orders.clear();
        self.scripted = false;
        self.sequential = false;
        self.combatants.clear();
        self.zones.clear();
        self.actions.clear();
        self.events.clear();
        self.missions.clear();
        self.templates.clear();
        self.mission_id = None;
        self.next_mission_id = 1;
        self.player_group = None;
        self.player_unit = None;
        self.planners = None;
    }
}

fn build_combatants(
    def: &CampaignDef,
    roster: &CombatRoster,
    resolver: Resolver,
) -> Result<Vec<Combatant>> {
    let mut combatants = Vec::new();

    for cdef in &def.combatants {
        let Some(stock) = roster.get_force(&cdef.name) else {
            resolver.check(ConfigError::UnknownName {
                field: "combatant",
                value: cdef.name.clone(),
            })?;
            let iff = cdef.iff.unwrap_or(0);
            combatants.push(Combatant::new(cdef.name.clone(), iff, Force::new(cdef.name.clone(), iff)));
            continue;
        };

        let force = if cdef.groups.is_empty() {
            stock.clone()
        } else {
            let mut clone = stock.shallow_clone();
            for spec in cdef.group_specs() {
                let Some(group_type) = resolver.name("group type", &spec.group_type, GroupType::from_name)?
                else {
                    continue;
                };
                match stock.find_group(group_type, Some(spec.id)) {
                    Some(key) => {
                        clone.clone_over(stock, key);
                    }
                    None => resolver.check(ConfigError::UnknownGroup {
                        owner: cdef.name.clone(),
                        group_type: group_type.name().to_string(),
                        group_id: spec.id,
                    })?,
                }
            }
            clone
        };

        let iff = cdef.iff.unwrap_or_else(|| stock.iff());
        combatants.push(Combatant::new(cdef.name.clone(), iff, force));
    }

    Ok(combatants)
}

fn combatant_index(combatants: &[Combatant], name: &str) -> Option<usize> {
    combatants
        .iter()
        .position(|c| c.name.eq_ignore_ascii_case(name))
}

/// Decode one action. `None` when a lenient load drops it.
fn build_action(
    def: &ActionDef,
    combatants: &[Combatant],
    resolver: Resolver,
) -> Result<Option<CombatAction>> {
    let id = ActionId(def.id);
    let kind = match ActionKind::decode(
        &def.action_type,
        def.subtype.as_deref(),
        def.opp_type.as_deref(),
        def.source.as_deref(),
    ) {
        Ok(kind) => kind,
        Err(e) => {
            resolver.check(e)?;
            return Ok(None);
        }
    };

    if def.count < 1 {
        resolver.check(ConfigError::InvalidCount {
            action: id,
            count: def.count,
        })?;
    }

    let mut action = CombatAction::new(id, kind, def.iff);
    action.count = def.count;
    action.start_after = def.start_after;
    action.start_before = def.start_before;
    action.min_rank = def.min_rank;
    action.max_rank = def.max_rank;
    action.delay = def.delay;
    action.probability = def.probability;
    action.target_iff = def.target_iff;
    action.asset_kills = def.asset_kills.clone();
    action.target_kills = def.target_kills.clone();
    action.location = def.location;
    action.system = def.system.clone();
    action.region = def.region.clone();
    action.file = def.file.clone();
    action.image = def.image.clone();
    action.scene = def.scene.clone();
    action.text = def.text.clone();

    if let Some(name) = &def.asset_type {
        if let Some(t) = resolver.name("group type", name, GroupType::from_name)? {
            action.asset = Some((t, def.asset_id));
        }
    }
    if let Some(name) = &def.target_type {
        if let Some(t) = resolver.name("group type", name, GroupType::from_name)? {
            action.target = Some((t, def.target_id));
        }
    }

    let needs_asset = matches!(
        kind,
        ActionKind::IntelEvent { .. }
            | ActionKind::StrategicDirective
            | ActionKind::ZoneAssignment
            | ActionKind::SystemAssignment
    );
    if let (true, Some((group_type, group_id))) = (needs_asset, action.asset) {
        let found = combatants
            .iter()
            .filter(|c| c.iff == action.iff)
            .any(|c| c.find_group(group_type, Some(group_id)).is_some());
        if !found {
            resolver.check(ConfigError::UnknownGroup {
                owner: format!("action {}", def.id),
                group_type: group_type.name().to_string(),
                group_id,
            })?;
        }
    }

    for rdef in &def.requirements {
        action
            .requirements
            .push(build_requirement(id, rdef, combatants, resolver)?);
    }

    Ok(Some(action))
}

/// Decode one requirement. Lenient loads keep a requirement with an
/// unknown name as `Requirement::Unresolved`.
fn build_requirement(
    action: ActionId,
    def: &RequirementDef,
    combatants: &[Combatant],
    resolver: Resolver,
) -> Result<Requirement> {
    if let Some(referenced) = def.action.filter(|a| *a != 0) {
        let status = match &def.status {
            Some(name) => match resolver.name("action status", name, status_from_text)? {
                Some(s) => s,
                None => return Ok(Requirement::Unresolved),
            },
            None => ActionStatus::Complete,
        };
        return Ok(Requirement::Action {
            action: ActionId(referenced),
            status,
            negate: def.negate,
        });
    }

    let comp = match &def.comp {
        Some(name) => match resolver.name("comparator", name, Comparator::from_name)? {
            Some(c) => c,
            None => return Ok(Requirement::Unresolved),
        },
        None => Comparator::default(),
    };

    let require = |value: &Option<String>, key: &'static str| -> Result<()> {
        if value.is_none() {
            resolver.check(ConfigError::IncompleteRequirement { action, key })?;
        }
        Ok(())
    };

    let resolve = |name: &Option<String>| -> Result<Option<usize>> {
        let Some(name) = name else {
            return Ok(None);
        };
        match combatant_index(combatants, name) {
            Some(i) => Ok(Some(i)),
            None => {
                resolver.check(ConfigError::UnknownCombatant {
                    action,
                    name: name.clone(),
                })?;
                Ok(None)
            }
        }
    };

    if let Some(type_name) = &def.group_type {
        let Some(group_type) = resolver.name("group type", type_name, GroupType::from_name)? else {
            return Ok(Requirement::Unresolved);
        };
        let intel = match &def.intel {
            Some(name) => match resolver.name("intel level", name, IntelLevel::from_name)? {
                Some(level) => Some(level),
                None => return Ok(Requirement::Unresolved),
            },
            None => None,
        };

        require(&def.c1, "c1")?;
        let c1 = resolve(&def.c1)?;
        if let Some(c) = c1.and_then(|i| combatants.get(i)) {
            if c.find_group(group_type, Some(def.group_id)).is_none() {
                resolver.check(ConfigError::UnknownGroup {
                    owner: format!("action {}", action.0),
                    group_type: group_type.name().to_string(),
                    group_id: def.group_id,
                })?;
            }
        }
        return Ok(Requirement::Group {
            combatant: c1,
            group_type,
            group_id: def.group_id,
            comp,
            score: def.score,
            intel,
        });
    }

    require(&def.c1, "c1")?;
    let c1 = resolve(&def.c1)?;
    if comp.is_relative() {
        require(&def.c2, "c2")?;
    }
    let c2 = resolve(&def.c2)?;
    Ok(Requirement::Score {
        c1,
        c2,
        comp,
        score: def.score,
    })
}

fn mission_from_def(def: &MissionDef, resolver: Resolver) -> Result<MissionInfo> {
    let mission_type = if def.mission_type.is_empty() {
        MissionType::default()
    } else {
        resolver
            .name("mission type", &def.mission_type, MissionType::from_name)?
            .unwrap_or_default()
    };

    let mut info = MissionInfo::new(MissionId(def.id), def.name.clone(), mission_type);
    info.description = def.desc.clone();
    info.start = def.start;
    info.system = def.system.clone();
    info.region = def.region.clone();
    info.script = def.script.clone();
    Ok(info)
}

fn template_from_def(
    def: &TemplateDef,
    resolver: Resolver,
) -> Result<Option<(GroupType, MissionInfo)>> {
    let Some(mission_type) = resolver.name("mission type", &def.mission_type, MissionType::from_name)?
    else {
        return Ok(None);
    };
    let Some(group_type) = resolver.name("group type", &def.group_type, GroupType::from_name)? else {
        return Ok(None);
    };

    let mut info = MissionInfo::new(MissionId(def.id), def.name.clone(), mission_type);
    info.script = def.script.clone();
    info.region = def.region.clone();
    info.min_rank = def.min_rank;
    info.max_rank = def.max_rank;
    info.exec_once = def.exec_once;
    info.start_after = def.start_after;
    info.start_before = def.start_before;

    if def.action_id != 0 {
        info.action_id = Some(ActionId(def.action_id));
        info.action_status = match &def.action_status {
            Some(name) => resolver
                .name("action status", name, status_from_text)?
                .unwrap_or_default(),
            None => ActionStatus::Pending,
        };
    }

    Ok(Some((group_type, info)))
}
