//! Encounter configuration
//!
//! Everything tunable about an encounter lives here: the roster with each
//! combatant's starting numbers, the turn bound, the seed, and the handful
//! of orchestration constants. Loaded from TOML; every field has a default
//! so a file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WarError};
use crate::entity::{ArchetypeKind, Combatant, Inventory, ItemKind, StatBlock};

/// Configuration for a whole encounter
///
/// The first two roster entries are the primaries: they receive cosmic
/// events, compete for divine favor, and are the only trading partners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Hard bound on encounter length
    pub max_turns: u32,

    /// Fixed seed for reproducible runs; drawn from entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Chance the first primary is the favored candidate in the divine phase
    pub favored_weight: f32,

    /// Trades are considered on every turn divisible by this
    pub trade_interval: u32,

    /// The first primary asks for a health potion below this much health
    pub trade_health_threshold: f32,

    /// Priests pray instead of acting on every turn divisible by this
    pub priest_ability_interval: u32,

    pub roster: Vec<CombatantConfig>,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            max_turns: 50,
            seed: None,
            favored_weight: 0.6,
            trade_interval: 5,
            trade_health_threshold: 50.0,
            priest_ability_interval: 4,
            roster: vec![
                CombatantConfig::new("High Priest Tenzin", ArchetypeKind::Priest),
                CombatantConfig::new("Entity2", ArchetypeKind::Generic)
                    .with_stats(StatBlock::challenger()),
                CombatantConfig::new("Arthur 2.0", ArchetypeKind::Mechanist),
                CombatantConfig::new("Intern Greg", ArchetypeKind::Intern),
            ],
        }
    }
}

/// One roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantConfig {
    pub name: String,

    #[serde(default)]
    pub archetype: ArchetypeKind,

    /// Starting numbers; the archetype's preset when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatBlock>,

    #[serde(default)]
    pub inventory: InventoryConfig,
}

impl CombatantConfig {
    pub fn new(name: impl Into<String>, archetype: ArchetypeKind) -> Self {
        Self {
            name: name.into(),
            archetype,
            stats: None,
            inventory: InventoryConfig::default(),
        }
    }

    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_inventory(mut self, inventory: InventoryConfig) -> Self {
        self.inventory = inventory;
        self
    }

    /// Stat block in effect for this entry
    pub fn resolved_stats(&self) -> StatBlock {
        self.stats
            .clone()
            .unwrap_or_else(|| StatBlock::for_archetype(self.archetype))
    }

    pub fn build(&self) -> Combatant {
        Combatant::new(self.name.clone(), self.archetype, &self.resolved_stats())
            .with_inventory(self.inventory.to_inventory())
    }
}

/// Starting item counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub health_potion: u32,
    pub mana_potion: u32,
    pub stamina_boost: u32,
    pub karma_scroll: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            health_potion: 2,
            mana_potion: 2,
            stamina_boost: 1,
            karma_scroll: 1,
        }
    }
}

impl InventoryConfig {
    pub fn to_inventory(&self) -> Inventory {
        let mut inventory = Inventory::new();
        for &item in ItemKind::all() {
            let count = match item {
                ItemKind::HealthPotion => self.health_potion,
                ItemKind::ManaPotion => self.mana_potion,
                ItemKind::StaminaBoost => self.stamina_boost,
                ItemKind::KarmaScroll => self.karma_scroll,
            };
            if count > 0 {
                inventory.add(item, count);
            }
        }
        inventory
    }
}

impl EncounterConfig {
    /// Load and validate a configuration file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a TOML document
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| WarError::InvalidConfig(e.to_string()))
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.roster.len() < 2 {
            return Err(WarError::InvalidConfig(format!(
                "roster needs at least two combatants, got {}",
                self.roster.len()
            )));
        }
        if self.max_turns == 0 {
            return Err(WarError::InvalidConfig("max_turns must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.favored_weight) {
            return Err(WarError::InvalidConfig(format!(
                "favored_weight must be within [0, 1], got {}",
                self.favored_weight
            )));
        }
        if self.trade_interval == 0 || self.priest_ability_interval == 0 {
            return Err(WarError::InvalidConfig(
                "trade_interval and priest_ability_interval must be positive".into(),
            ));
        }

        for (i, entry) in self.roster.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(WarError::InvalidConfig(format!(
                    "roster entry {} has an empty name",
                    i
                )));
            }
            if self.roster[..i].iter().any(|other| other.name == entry.name) {
                return Err(WarError::InvalidConfig(format!(
                    "duplicate combatant name '{}'",
                    entry.name
                )));
            }
            entry
                .resolved_stats()
                .validate()
                .map_err(|reason| WarError::InvalidConfig(format!("{}: {}", entry.name, reason)))?;
        }
        Ok(())
    }

    /// Instantiate the roster in configured order
    pub fn build_roster(&self) -> Vec<Combatant> {
        self.roster.iter().map(CombatantConfig::build).collect()
    }
}

/// Read an encounter file from disk
pub fn load_encounter(path: impl AsRef<Path>) -> Result<EncounterConfig> {
    let path = path.as_ref();
    let config = EncounterConfig::load_from_toml(path)?;
    tracing::debug!(path = %path.display(), combatants = config.roster.len(), "loaded encounter");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EncounterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.roster.len(), 4);
        assert_eq!(config.roster[0].name, "High Priest Tenzin");
        assert_eq!(config.roster[2].archetype, ArchetypeKind::Mechanist);
    }

    #[test]
    fn test_minimal_toml_fills_defaults() {
        let config = EncounterConfig::parse_toml(
            r#"
            max_turns = 10

            [[roster]]
            name = "A"

            [[roster]]
            name = "B"
            archetype = "mechanist"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.max_turns, 10);
        assert_eq!(config.seed, None);
        assert_eq!(config.trade_interval, 5);
        assert_eq!(config.roster[0].archetype, ArchetypeKind::Generic);
        assert_eq!(config.roster[1].resolved_stats(), StatBlock::mechanist());
        assert_eq!(config.roster[0].inventory, InventoryConfig::default());
    }

    #[test]
    fn test_partial_stats_and_inventory() {
        let config = EncounterConfig::parse_toml(
            r#"
            seed = 7

            [[roster]]
            name = "Glass Cannon"
            [roster.stats]
            max_health = 60.0
            attack = 40.0
            [roster.inventory]
            health_potion = 0

            [[roster]]
            name = "B"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.seed, Some(7));
        let roster = config.build_roster();
        assert_eq!(roster[0].max_health, 60.0);
        assert_eq!(roster[0].attack, 40.0);
        assert_eq!(roster[0].defense, 8.0);
        assert_eq!(roster[0].inventory.count(ItemKind::HealthPotion), 0);
        assert_eq!(roster[0].inventory.count(ItemKind::ManaPotion), 2);
    }

    #[test]
    fn test_rejects_short_roster() {
        let err = EncounterConfig::parse_toml(
            r#"
            [[roster]]
            name = "Alone"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, WarError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_out_of_range_accuracy() {
        let mut config = EncounterConfig::default();
        config.roster[1].stats = Some(StatBlock {
            accuracy: 1.5,
            ..StatBlock::default()
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("accuracy"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut config = EncounterConfig::default();
        config.roster[3].name = "Entity2".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = EncounterConfig::parse_toml("max_turns = \"lots\"").unwrap_err();
        assert!(matches!(err, WarError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_roundtrip_of_default() {
        let config = EncounterConfig::default();
        let text = config.to_toml().expect("serializable");
        assert_eq!(EncounterConfig::parse_toml(&text).expect("parses"), config);
    }

    #[test]
    fn test_shipped_encounter_matches_default() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/default_encounter.toml");
        let config = load_encounter(&path).expect("shipped config loads");
        assert_eq!(config.roster, EncounterConfig::default().roster);
        assert_eq!(config.max_turns, 50);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_encounter("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, WarError::Io(_)));
    }
}
