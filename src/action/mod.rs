//! Combat actions: the campaign's time-windowed rule engine

pub mod combat_action;
pub mod kind;
pub mod requirement;

pub use combat_action::CombatAction;
pub use kind::{ActionKind, ActionStatus};
pub use requirement::{ActionEnv, Comparator, Requirement};
