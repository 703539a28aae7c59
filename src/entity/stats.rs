//! Starting stat blocks for combatants
//!
//! A stat block is the configuration-side view of a combatant: every
//! numeric field it starts the encounter with. The live, mutable view is
//! [`crate::entity::Combatant`].

use serde::{Deserialize, Serialize};

use crate::entity::archetype::ArchetypeKind;

/// Starting numbers for one combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub max_health: f32,
    pub attack: f32,
    pub defense: f32,
    /// Zero disables every mana-gated action for good
    pub max_mana: f32,
    pub max_stamina: f32,
    /// Mana a combatant must hold before it considers a magic attack
    pub mana_cost: f32,
    pub special_attack_damage: f32,
    pub healing_ability: f32,
    pub karma: i32,
    /// Hit probability before the target's evasion (0.0 to 1.0)
    pub accuracy: f32,
    /// Subtracted from an attacker's accuracy (0.0 to 1.0)
    pub evasion: f32,
    /// Carried for reporting; no maneuver rolls critical hits
    pub critical_chance: f32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            max_health: 120.0,
            attack: 25.0,
            defense: 8.0,
            max_mana: 100.0,
            max_stamina: 100.0,
            mana_cost: 25.0,
            special_attack_damage: 45.0,
            healing_ability: 20.0,
            karma: 50,
            accuracy: 0.8,
            evasion: 0.1,
            critical_chance: 0.15,
        }
    }
}

impl StatBlock {
    /// Stats of the second primary in the canonical roster
    pub fn challenger() -> Self {
        Self {
            max_health: 110.0,
            attack: 23.0,
            defense: 10.0,
            max_mana: 110.0,
            max_stamina: 100.0,
            mana_cost: 30.0,
            special_attack_damage: 40.0,
            healing_ability: 18.0,
            karma: 50,
            accuracy: 0.82,
            evasion: 0.12,
            critical_chance: 0.12,
        }
    }

    /// No divine connection: zero mana, zero healing, no karma to speak of
    pub fn mechanist() -> Self {
        Self {
            max_health: 110.0,
            attack: 28.0,
            defense: 10.0,
            max_mana: 0.0,
            max_stamina: 120.0,
            mana_cost: 25.0,
            special_attack_damage: 45.0,
            healing_ability: 0.0,
            karma: 0,
            accuracy: 0.95,
            evasion: 0.1,
            critical_chance: 0.0,
        }
    }

    /// Preset used when a roster entry names an archetype but no stats
    pub fn for_archetype(kind: ArchetypeKind) -> Self {
        match kind {
            ArchetypeKind::Mechanist => Self::mechanist(),
            ArchetypeKind::Generic | ArchetypeKind::Priest | ArchetypeKind::Intern => {
                Self::default()
            }
        }
    }

    /// Check the block describes a combatant that can exist
    pub fn validate(&self) -> Result<(), String> {
        if self.max_health <= 0.0 {
            return Err(format!("max_health must be positive, got {}", self.max_health));
        }
        if self.max_stamina <= 0.0 {
            return Err(format!("max_stamina must be positive, got {}", self.max_stamina));
        }
        if self.max_mana < 0.0 {
            return Err(format!("max_mana must not be negative, got {}", self.max_mana));
        }
        for (field, value) in [
            ("accuracy", self.accuracy),
            ("evasion", self.evasion),
            ("critical_chance", self.critical_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [0, 1], got {}", field, value));
            }
        }
        if self.attack < 0.0 || self.defense < 0.0 || self.healing_ability < 0.0 {
            return Err("attack, defense and healing_ability must not be negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_is_valid() {
        assert!(StatBlock::default().validate().is_ok());
        assert!(StatBlock::challenger().validate().is_ok());
        assert!(StatBlock::mechanist().validate().is_ok());
    }

    #[test]
    fn test_mechanist_has_no_mana() {
        let block = StatBlock::for_archetype(ArchetypeKind::Mechanist);
        assert_eq!(block.max_mana, 0.0);
        assert_eq!(block.healing_ability, 0.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_accuracy() {
        let block = StatBlock {
            accuracy: 1.5,
            ..StatBlock::default()
        };
        assert!(block.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let block: StatBlock = toml::from_str("max_health = 90.0\nkarma = 10").unwrap();
        assert_eq!(block.max_health, 90.0);
        assert_eq!(block.karma, 10);
        assert_eq!(block.attack, 25.0);
    }
}
