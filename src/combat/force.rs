//! Arena-backed order-of-battle tree
//!
//! A `Force` owns every group of one combatant in a flat, append-only
//! vector. Parent and component links are `GroupKey` handles into that
//! vector, so subtrees can be cloned and serialized without pointer
//! cycles. The root group (index 0) is always a `GroupType::Force`.

use serde::{Deserialize, Serialize};

use crate::combat::group::{CombatGroup, GroupKey, GroupType, IntelLevel};
use crate::combat::unit::CombatUnit;
use crate::core::types::Iff;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Force {
    groups: Vec<CombatGroup>,
}

impl Force {
    pub fn new(name: impl Into<String>, iff: Iff) -> Self {
        Self::from_root(CombatGroup::new(GroupType::Force, 0, name, iff))
    }

    pub fn from_root(root: CombatGroup) -> Self {
        Self {
            groups: vec![root.detached()],
        }
    }

    pub fn root(&self) -> GroupKey {
        GroupKey(0)
    }

    pub fn name(&self) -> &str {
        &self.groups[0].name
    }

    pub fn iff(&self) -> Iff {
        self.groups[0].iff
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: GroupKey) -> Option<&CombatGroup> {
        self.groups.get(key.index())
    }

    pub fn get_mut(&mut self, key: GroupKey) -> Option<&mut CombatGroup> {
        self.groups.get_mut(key.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &CombatGroup)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (GroupKey(i as u32), g))
    }

    /// Attach a group under `parent`. Returns `None` if the parent is not
    /// part of this force.
    pub fn add_component(&mut self, parent: GroupKey, group: CombatGroup) -> Option<GroupKey> {
        self.get(parent)?;

        let key = GroupKey(self.groups.len() as u32);
        let mut group = group.detached();
        group.parent = Some(parent);
        self.groups.push(group);
        self.groups[parent.index()].components.push(key);
        Some(key)
    }

    pub fn parent(&self, key: GroupKey) -> Option<GroupKey> {
        self.get(key).and_then(|g| g.parent)
    }

    pub fn components(&self, key: GroupKey) -> &[GroupKey] {
        self.get(key).map(|g| g.components.as_slice()).unwrap_or(&[])
    }

    /// Pre-order walk of the subtree rooted at `start`
    pub fn walk(&self, start: GroupKey) -> Vec<GroupKey> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(key) = stack.pop() {
            if self.get(key).is_none() {
                continue;
            }
            out.push(key);
            stack.extend(self.components(key).iter().rev().copied());
        }
        out
    }

    /// Depth-first search for a group by type and id. `None` for id
    /// matches any group of that type.
    pub fn find_group(&self, group_type: GroupType, id: Option<i32>) -> Option<GroupKey> {
        self.find_group_from(self.root(), group_type, id)
    }

    pub fn find_group_from(
        &self,
        start: GroupKey,
        group_type: GroupType,
        id: Option<i32>,
    ) -> Option<GroupKey> {
        self.walk(start)
            .into_iter()
            .find(|k| self.groups[k.index()].matches(group_type, id))
    }

    /// First group of a type operating in `zone` that the enemy has not
    /// written off as reserve. `None` for zone matches any zone.
    pub fn find_group_near(&self, group_type: GroupType, zone: Option<&str>) -> Option<GroupKey> {
        self.walk(self.root()).into_iter().find(|&k| {
            let g = &self.groups[k.index()];
            g.group_type == group_type
                && !self.is_reserve(k)
                && zone.map_or(true, |z| g.assigned_zone.as_deref() == Some(z))
        })
    }

    /// Value of a group and all of its components
    pub fn calc_value(&self, key: GroupKey) -> i32 {
        self.walk(key)
            .into_iter()
            .map(|k| self.groups[k.index()].unit_value())
            .sum()
    }

    /// A group is reserve if it or any ancestor is held in reserve
    pub fn is_reserve(&self, key: GroupKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            match self.get(k) {
                Some(g) if g.intel <= IntelLevel::Reserve => return true,
                Some(g) => current = g.parent,
                None => break,
            }
        }
        false
    }

    /// Set the enemy's knowledge of a group. Discovering a group above
    /// SECRET exposes its chain of command as at least KNOWN.
    pub fn set_intel_level(&mut self, key: GroupKey, level: IntelLevel) {
        let Some(group) = self.get_mut(key) else {
            return;
        };
        group.intel = level;

        if level <= IntelLevel::Secret {
            return;
        }

        let mut current = self.parent(key);
        while let Some(k) = current {
            let g = &mut self.groups[k.index()];
            if g.intel < IntelLevel::Known {
                g.intel = IntelLevel::Known;
            }
            current = g.parent;
        }
    }

    /// Copy of the root group and its units with no components
    pub fn shallow_clone(&self) -> Force {
        Force::from_root(self.groups[0].clone())
    }

    /// Copy `group` from `source` into this force, creating every missing
    /// ancestor first. Groups already present (matched by type and id) are
    /// reused, so repeated calls for one lineage add nothing new.
    pub fn clone_over(&mut self, source: &Force, group: GroupKey) -> Option<GroupKey> {
        let original = source.get(group)?;
        let Some(original_parent) = original.parent else {
            return Some(self.root());
        };

        let parent_group = source.get(original_parent)?;
        let parent = match self.find_group(parent_group.group_type, Some(parent_group.id)) {
            Some(k) => k,
            None => self.clone_over(source, original_parent)?,
        };

        if let Some(existing) = self.find_group(original.group_type, Some(original.id)) {
            return Some(existing);
        }
        self.add_component(parent, original.detached())
    }

    /// Every unit of every group in this force
    pub fn all_units(&self) -> impl Iterator<Item = &CombatUnit> {
        self.groups.iter().flat_map(|g| g.units.iter())
    }
}
