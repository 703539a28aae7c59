//! Warsim - turn-based divine war simulation
//!
//! A small roster of archetyped combatants fights turn by turn while three
//! deities intervene and a cosmic event reshapes every turn.

pub mod behavior;
pub mod combat;
pub mod core;
pub mod cosmic;
pub mod divine;
pub mod encounter;
pub mod entity;
