//! Rotating pools of candidate missions

use serde::{Deserialize, Serialize};

use crate::combat::group::GroupType;
use crate::core::types::MissionId;
use crate::mission::info::MissionInfo;
use crate::mission::mission_type::MissionType;

/// Candidates for one (mission type, group type) pair. `index` is the
/// rotation cursor and persists across selections and save games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateList {
    pub mission_type: MissionType,
    pub group_type: GroupType,
    pub index: usize,
    pub missions: Vec<MissionInfo>,
}

impl TemplateList {
    pub fn new(mission_type: MissionType, group_type: GroupType) -> Self {
        Self {
            mission_type,
            group_type,
            index: 0,
            missions: Vec::new(),
        }
    }

    /// Try at most one full rotation starting at the cursor. The cursor
    /// advances on every candidate tried, accepted or not. Returns the
    /// position of the first candidate `accept` passes.
    pub fn rotate<F>(&mut self, mut accept: F) -> Option<usize>
    where
        F: FnMut(&MissionInfo) -> bool,
    {
        let size = self.missions.len();
        if size == 0 {
            return None;
        }

        for _ in 0..size {
            let pos = self.index % size;
            self.index = (pos + 1) % size;
            if accept(&self.missions[pos]) {
                return Some(pos);
            }
        }
        None
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateCatalog {
    lists: Vec<TemplateList>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn lists(&self) -> &[TemplateList] {
        &self.lists
    }

    pub fn get(&self, mission_type: MissionType, group_type: GroupType) -> Option<&TemplateList> {
        self.lists
            .iter()
            .find(|l| l.mission_type == mission_type && l.group_type == group_type)
    }

    pub fn get_mut(
        &mut self,
        mission_type: MissionType,
        group_type: GroupType,
    ) -> Option<&mut TemplateList> {
        self.lists
            .iter_mut()
            .find(|l| l.mission_type == mission_type && l.group_type == group_type)
    }

    /// File a candidate under its pool, creating the pool on first use
    pub fn add(&mut self, group_type: GroupType, info: MissionInfo) {
        let mission_type = info.mission_type;
        match self.get_mut(mission_type, group_type) {
            Some(list) => list.missions.push(info),
            None => {
                let mut list = TemplateList::new(mission_type, group_type);
                list.missions.push(info);
                self.lists.push(list);
            }
        }
    }

    /// Use up a one-shot candidate once it has been launched. False when
    /// the pool or candidate is gone.
    pub fn consume(&mut self, mission_type: MissionType, group_type: GroupType, id: MissionId) -> bool {
        let Some(list) = self.get_mut(mission_type, group_type) else {
            return false;
        };
        match list.missions.iter_mut().find(|m| m.id == id) {
            Some(info) => {
                info.consume();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lists.clear();
    }
}
