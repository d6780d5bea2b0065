//! Leaf-level ships, batteries and stations inside a group

use serde::{Deserialize, Serialize};

/// A homogeneous batch of units of one design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatUnit {
    pub name: String,
    pub design: String,
    pub count: i32,
    pub dead_count: i32,
    /// Value of a single live unit
    pub value: i32,
}

impl CombatUnit {
    pub fn new(name: impl Into<String>, design: impl Into<String>, count: i32, value: i32) -> Self {
        Self {
            name: name.into(),
            design: design.into(),
            count,
            dead_count: 0,
            value,
        }
    }

    pub fn live_count(&self) -> i32 {
        (self.count - self.dead_count).max(0)
    }

    /// Combined value of the surviving units
    pub fn value(&self) -> i32 {
        self.value * self.live_count()
    }

    pub fn kill(&mut self, n: i32) -> i32 {
        let killed = n.clamp(0, self.live_count());
        self.dead_count += killed;
        killed
    }
}
