//! Lifecycle, clock and the per-tick planner pipeline

use tracing::{debug, info, warn};

use crate::campaign::{Campaign, CampaignStatus};
use crate::core::context::FrameContext;
use crate::core::error::Result;
use crate::core::types::{format_clock, Seconds, Stardate};
use crate::plan::PlanPipeline;
use crate::save::SaveGameStore;

impl Campaign {
    /// Prepare content, build the planner pipeline and go ACTIVE
    pub fn start(&mut self) -> Result<()> {
        self.prep()?;
        self.planners = Some(PlanPipeline::standard(&self.config));
        self.set_status(CampaignStatus::Active);
        info!("Campaign '{}' started", self.name);
        Ok(())
    }

    /// Tear down the planner pipeline. The campaign keeps its state.
    pub fn stop(&mut self) {
        self.planners = None;
        info!("Campaign '{}' stopped", self.name);
    }

    /// Drop all content and reset the clock and lifecycle
    pub fn unload(&mut self) {
        self.clear();
        self.status = CampaignStatus::Init;
        self.time = 0;
        self.start_time = None;
        self.load_time = None;
        self.lockout = 0;
        self.loaded_from_savegame = false;
    }

    /// Move the lifecycle forward. Backward moves and moves out of a
    /// terminal status are ignored, and a terminal status is only reached
    /// from ACTIVE. SUCCESS records the campaign as complete; any terminal
    /// status drops the live missions.
    pub fn set_status(&mut self, status: CampaignStatus) {
        if status <= self.status || self.status > CampaignStatus::Active {
            return;
        }
        if status > CampaignStatus::Active && self.status != CampaignStatus::Active {
            debug!("Campaign '{}' ignored {:?} while {:?}", self.name, status, self.status);
            return;
        }

        info!("Campaign '{}' status {:?} -> {:?}", self.name, self.status, status);
        self.status = status;

        if status == CampaignStatus::Success {
            self.services.progress.mark_campaign_complete(self.id);
        }

        if status > CampaignStatus::Active {
            self.missions.clear();
        }
    }

    /// Suppress new events and missions for `seconds` of campaign time
    pub fn lockout_events(&mut self, seconds: Seconds) {
        self.lockout = seconds.max(0);
        if let Some(planners) = self.planners.as_mut() {
            planners.set_lockout(self.time, self.lockout);
        }
    }

    /// Advance the campaign by one external tick
    pub fn exec_frame(&mut self, frame: FrameContext) {
        if frame.in_cutscene || self.status < CampaignStatus::Active {
            return;
        }

        self.advance_clock(frame.now);

        if !self.is_dynamic() {
            self.loaded_from_savegame = false;
            self.with_planners(|planners, campaign| {
                planners.event_mut().exec_scripted_events(campaign);
            });
            return;
        }

        let completed = self.missions.iter().any(|m| m.is_complete());
        if completed {
            self.missions.clear();
            let downtime = self.downtime();
            self.skip_time(downtime);
            info!(
                "Mission complete; campaign clock advanced {}s to {}",
                downtime,
                format_clock(self.time)
            );
        } else {
            let now = self.time;
            let before = self.missions.len();
            self.missions.retain(|m| !(m.start < now && !m.is_active()));
            if self.missions.len() < before {
                debug!("Pruned {} expired missions", before - self.missions.len());
            }
        }

        if self.loaded_from_savegame {
            self.loaded_from_savegame = false;
            self.with_planners(|planners, campaign| {
                planners.event_mut().exec_scripted_events(campaign);
            });
        }

        self.with_planners(|planners, campaign| {
            for plan in planners.plans_mut() {
                plan.exec_frame(campaign);
                campaign.check_player_group();
            }
        });

        if completed {
            self.autosave();
        }
    }

    /// Run `f` with the pipeline detached so planners can take the
    /// campaign mutably
    fn with_planners<F>(&mut self, f: F)
    where
        F: FnOnce(&mut PlanPipeline, &mut Campaign),
    {
        if let Some(mut planners) = self.planners.take() {
            f(&mut planners, self);
            if self.planners.is_none() {
                self.planners = Some(planners);
            }
        }
    }

    fn advance_clock(&mut self, now: Stardate) {
        let start = *self.start_time.get_or_insert(now - self.time as Stardate);
        if self.load_time.is_none() {
            self.load_time = Some(now);
        }

        let elapsed = ((now - start).floor() as Seconds).max(self.time);
        let delta = elapsed - self.time;
        self.time = elapsed;
        if self.lockout > 0 {
            self.lockout = (self.lockout - delta).max(0);
        }
    }

    /// Push the clock forward without waiting for the game clock
    pub fn skip_time(&mut self, seconds: Seconds) {
        if seconds <= 0 {
            return;
        }
        if let Some(start) = self.start_time.as_mut() {
            *start -= seconds as Stardate;
        }
        self.time += seconds;
        self.lockout = (self.lockout - seconds).max(0);
    }

    fn downtime(&self) -> Seconds {
        match self.player_group_info() {
            Some(g) if g.is_fighter_group() => self.config.fighter_downtime,
            _ => self.config.starship_downtime,
        }
    }

    fn autosave(&self) {
        let store = SaveGameStore::new(&self.config.save_dir);
        if let Err(e) = store.save_auto(self) {
            warn!("Autosave of campaign '{}' failed: {}", self.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::CampaignServices;
    use crate::combat::{CombatGroup, CombatUnit, Combatant, Force, GroupRef, GroupType};
    use crate::core::config::EngineConfig;
    use crate::core::types::{CampaignId, MissionId};
    use crate::mission::{MissionInfo, MissionType};

    fn campaign(id: i32) -> Campaign {
        Campaign::new(CampaignId(id), "/nonexistent", EngineConfig::default(), CampaignServices::default())
    }

    /// Active dynamic campaign flying `group_type` as the player group
    fn flying(group_type: GroupType) -> Campaign {
        let mut c = campaign(2);
        let mut force = Force::new("Alliance", 1);
        let root = force.root();
        let mut group = CombatGroup::new(group_type, 3, "Player Group", 1);
        group.units.push(CombatUnit::new("Aegis", "destroyer", 2, 40));
        let key = force.add_component(root, group).unwrap();
        let index = c.add_combatant(Combatant::new("Alliance", 1, force));
        c.set_player_group(Some(GroupRef::new(index, key)));
        c.set_status(CampaignStatus::Active);
        c
    }

    fn mission(id: i32, start: Seconds) -> MissionInfo {
        let mut info = MissionInfo::new(MissionId(id), format!("mission {}", id), MissionType::Patrol);
        info.start = start;
        info
    }

    #[test]
    fn test_status_is_monotonic() {
        let mut c = campaign(2);
        c.set_status(CampaignStatus::Active);
        c.set_status(CampaignStatus::Init);
        assert_eq!(c.status(), CampaignStatus::Active);

        c.set_status(CampaignStatus::Failure);
        c.set_status(CampaignStatus::Success);
        c.set_status(CampaignStatus::Active);
        assert_eq!(c.status(), CampaignStatus::Failure);
        assert!(!c.services().progress.is_campaign_complete(CampaignId(2)));
    }

    #[test]
    fn test_terminal_status_needs_active() {
        let mut c = campaign(3);
        c.set_status(CampaignStatus::Success);
        assert_eq!(c.status(), CampaignStatus::Init);
        assert!(!c.services().progress.is_campaign_complete(CampaignId(3)));

        c.set_status(CampaignStatus::Active);
        c.set_status(CampaignStatus::Success);
        assert_eq!(c.status(), CampaignStatus::Success);
    }

    #[test]
    fn test_success_marks_progress() {
        let mut c = campaign(3);
        c.set_status(CampaignStatus::Active);
        c.set_status(CampaignStatus::Success);
        assert!(c.services().progress.is_campaign_complete(CampaignId(3)));
    }

    #[test]
    fn test_inactive_campaign_ignores_frames() {
        let mut c = campaign(2);
        c.exec_frame(FrameContext::at(5000.0));
        assert_eq!(c.time(), 0);
        assert_eq!(c.start_time(), None);
    }

    #[test]
    fn test_clock_anchors_on_first_frame() {
        let mut c = campaign(1000);
        c.set_status(CampaignStatus::Active);
        c.exec_frame(FrameContext::at(1000.0));
        assert_eq!(c.time(), 0);
        c.exec_frame(FrameContext::at(1060.5));
        assert_eq!(c.time(), 60);
        c.exec_frame(FrameContext::at(900.0));
        assert_eq!(c.time(), 60);
    }

    #[test]
    fn test_lockout_counts_down() {
        let mut c = campaign(1000);
        c.set_status(CampaignStatus::Active);
        c.exec_frame(FrameContext::at(0.0));
        c.lockout_events(100);
        assert!(c.is_locked_out());
        c.exec_frame(FrameContext::at(60.0));
        assert_eq!(c.lockout(), 40);
        c.exec_frame(FrameContext::at(200.0));
        assert!(!c.is_locked_out());
    }

    #[test]
    fn test_cutscene_holds_clock() {
        let mut c = campaign(1000);
        c.set_status(CampaignStatus::Active);
        c.exec_frame(FrameContext::at(0.0));
        c.exec_frame(FrameContext {
            now: 500.0,
            in_cutscene: true,
        });
        assert_eq!(c.time(), 0);
    }

    #[test]
    fn test_starship_downtime_after_completion() {
        let mut c = flying(GroupType::DestroyerSquadron);
        c.exec_frame(FrameContext::at(0.0));
        let mut done = mission(1, 3600);
        done.complete = true;
        c.add_mission(done);

        c.exec_frame(FrameContext::at(30.0));
        assert_eq!(c.time(), 30 + c.config.starship_downtime);
        assert!(c.missions().is_empty());

        c.exec_frame(FrameContext::at(90.0));
        assert_eq!(c.time(), 90 + 72_000);
    }

    #[test]
    fn test_fighter_downtime_after_completion() {
        let mut c = flying(GroupType::Wing);
        c.exec_frame(FrameContext::at(0.0));
        let mut done = mission(1, 3600);
        done.complete = true;
        c.add_mission(done);

        c.exec_frame(FrameContext::at(0.0));
        assert_eq!(c.time(), 36_000);
    }

    #[test]
    fn test_expired_inactive_missions_are_pruned() {
        let mut c = flying(GroupType::Wing);
        c.exec_frame(FrameContext::at(0.0));
        c.add_mission(mission(1, 10));
        let mut flying_now = mission(2, 10);
        flying_now.active = true;
        c.add_mission(flying_now);
        c.add_mission(mission(3, 5000));

        c.exec_frame(FrameContext::at(60.0));
        let ids: Vec<_> = c.missions().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_terminal_status_clears_live_missions() {
        let mut c = flying(GroupType::Wing);
        c.exec_frame(FrameContext::at(0.0));
        c.add_mission(mission(1, 3600));
        c.add_mission(mission(2, 7200));
        assert_eq!(c.missions().len(), 2);

        c.set_status(CampaignStatus::Failure);
        assert!(c.missions().is_empty());

        c.exec_frame(FrameContext::at(60.0));
        c.exec_frame(FrameContext::at(120.0));
        assert!(c.missions().is_empty());
        assert_eq!(c.status(), CampaignStatus::Failure);
    }

    #[test]
    fn test_restore_flag_cleared_on_scripted_campaign() {
        let mut c = campaign(1000);
        assert!(!c.is_dynamic());
        c.set_status(CampaignStatus::Active);
        c.loaded_from_savegame = true;

        c.exec_frame(FrameContext::at(0.0));
        assert!(!c.loaded_from_savegame());
    }
}
