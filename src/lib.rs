//! Campaign Engine - dynamic campaigns for a space combat game
//!
//! Owns the campaign clock, the order of battle of every combatant, the
//! scripted combat actions and the live mission list. A planner pipeline
//! runs each frame to fire events, move forces and generate missions.

pub mod action;
pub mod campaign;
pub mod combat;
pub mod core;
pub mod defs;
pub mod mission;
pub mod plan;
pub mod save;
