//! Order of battle: combatants, their force trees, zones and events

pub mod combatant;
pub mod event;
pub mod force;
pub mod group;
pub mod roster;
pub mod unit;
pub mod zone;

pub use combatant::{Combatant, GroupRef, UnitRef};
pub use event::{CombatEvent, EventKind, EventSource};
pub use force::Force;
pub use group::{CombatGroup, GroupKey, GroupType, IntelLevel};
pub use roster::CombatRoster;
pub use unit::CombatUnit;
pub use zone::CombatZone;
