//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Encounter turn counter (1-based once the encounter is running)
pub type Turn = u32;

/// Position of a combatant in the encounter roster
///
/// Roster entries are never removed, so an id stays valid for the
/// whole encounter even after the combatant dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub usize);

impl CombatantId {
    pub fn index(&self) -> usize {
        self.0
    }
}
