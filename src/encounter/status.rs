//! Read-only snapshots of an encounter

use serde::{Deserialize, Serialize};

use crate::core::{Result, Turn};
use crate::cosmic::CosmicEvent;
use crate::divine::{Deity, DeityKind};
use crate::entity::{ArchetypeKind, Combatant};

/// Coarse lifecycle of an encounter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterPhase {
    #[default]
    Idle,
    Running,
    Ended,
}

/// How the encounter finished
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncounterOutcome {
    #[default]
    Undecided,
    Victory {
        winner: crate::core::CombatantId,
        name: String,
    },
    /// Turn limit reached with several survivors, or nobody left standing
    Stalemate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantStatus {
    pub name: String,
    pub archetype: ArchetypeKind,
    pub alive: bool,
    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub stamina: f32,
    pub karma: i32,
}

impl From<&Combatant> for CombatantStatus {
    fn from(c: &Combatant) -> Self {
        Self {
            name: c.name.clone(),
            archetype: c.kind(),
            alive: c.is_alive(),
            health: c.health,
            max_health: c.max_health,
            mana: c.mana,
            stamina: c.stamina,
            karma: c.karma,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeityStatus {
    pub name: String,
    pub kind: DeityKind,
    pub energy: f32,
    pub interventions: u32,
    pub health_restored: f32,
    pub mana_granted: f32,
    pub decay_inflicted: f32,
    pub decay_cleansed: f32,
}

impl From<&Deity> for DeityStatus {
    fn from(d: &Deity) -> Self {
        Self {
            name: d.name.clone(),
            kind: d.kind,
            energy: d.energy,
            interventions: d.interventions,
            health_restored: d.health_restored,
            mana_granted: d.mana_granted,
            decay_inflicted: d.decay_inflicted,
            decay_cleansed: d.decay_cleansed,
        }
    }
}

/// Answer to a status query at any point of the encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterStatus {
    pub turn: Turn,
    pub phase: EncounterPhase,
    pub current_event: Option<CosmicEvent>,
    pub combatants: Vec<CombatantStatus>,
    pub deities: Vec<DeityStatus>,
}

/// Final summary of a finished (or abandoned) encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterReport {
    pub seed: u64,
    pub turns: Turn,
    pub max_turns: Turn,
    pub outcome: EncounterOutcome,
    pub combatants: Vec<CombatantStatus>,
    pub deities: Vec<DeityStatus>,
}

impl EncounterReport {
    pub fn winner(&self) -> Option<&str> {
        match &self.outcome {
            EncounterOutcome::Victory { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

const TABLE_WIDTH: usize = 70;

/// The per-turn status table narrated at the end of every turn
pub fn format_status_table(turn: Turn, roster: &[Combatant]) -> String {
    let rule = "=".repeat(TABLE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        format!("Turn {} Summary:", turn),
        rule.clone(),
        format!(
            "{:<20} | {:>8} | {:>8} | {:>6} | {:>8}",
            "Name", "Health", "Mana", "Karma", "Stamina"
        ),
        "-".repeat(TABLE_WIDTH),
    ];
    lines.extend(roster.iter().map(|c| {
        format!(
            "{:<20} | {:>8.1} | {:>8.1} | {:>6} | {:>8.1}",
            c.name, c.health, c.mana, c.karma, c.stamina
        )
    }));
    lines.push(rule);
    lines.join("\n")
}
