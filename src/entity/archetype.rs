//! Combatant archetypes and their per-archetype state

use serde::{Deserialize, Serialize};

/// Caffeine an intern starts with and is restored to after a crash
pub const FULL_CAFFEINE: f32 = 100.0;

/// Archetype tag as it appears in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeKind {
    #[default]
    Generic,
    Priest,
    Mechanist,
    Intern,
}

/// Priest: divine-ability cooldown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriestState {
    pub cooldown: u32,
}

/// Mechanist: heat buildup plus two independent ability cooldowns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MechanistState {
    /// Grows every turn, only spent by overdrive
    pub heat: f32,
    pub overdrive_cooldown: u32,
    pub emp_cooldown: u32,
}

/// Intern: caffeine reserve and the panic-productivity flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternState {
    pub caffeine: f32,
    pub panic_mode: bool,
}

impl Default for InternState {
    fn default() -> Self {
        Self {
            caffeine: FULL_CAFFEINE,
            panic_mode: false,
        }
    }
}

/// Closed set of behavioral specializations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Archetype {
    Generic,
    Priest(PriestState),
    Mechanist(MechanistState),
    Intern(InternState),
}

impl Archetype {
    pub fn new(kind: ArchetypeKind) -> Self {
        match kind {
            ArchetypeKind::Generic => Archetype::Generic,
            ArchetypeKind::Priest => Archetype::Priest(PriestState::default()),
            ArchetypeKind::Mechanist => Archetype::Mechanist(MechanistState::default()),
            ArchetypeKind::Intern => Archetype::Intern(InternState::default()),
        }
    }

    pub fn kind(&self) -> ArchetypeKind {
        match self {
            Archetype::Generic => ArchetypeKind::Generic,
            Archetype::Priest(_) => ArchetypeKind::Priest,
            Archetype::Mechanist(_) => ArchetypeKind::Mechanist,
            Archetype::Intern(_) => ArchetypeKind::Intern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_trips_kind() {
        for kind in [
            ArchetypeKind::Generic,
            ArchetypeKind::Priest,
            ArchetypeKind::Mechanist,
            ArchetypeKind::Intern,
        ] {
            assert_eq!(Archetype::new(kind).kind(), kind);
        }
    }

    #[test]
    fn test_intern_starts_fully_caffeinated() {
        match Archetype::new(ArchetypeKind::Intern) {
            Archetype::Intern(state) => {
                assert_eq!(state.caffeine, FULL_CAFFEINE);
                assert!(!state.panic_mode);
            }
            other => panic!("expected intern, got {:?}", other),
        }
    }
}
