//! Combatant - the live stat and resource container
//!
//! Every mutation clamps: health, mana and stamina stay inside `[0, max]`
//! after each operation, and inventory counts never go negative.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    DEFEND_BONUS, DEFEND_STAMINA_COST, HEALTH_POTION_AMOUNT, MANA_POTION_AMOUNT,
    REST_MANA_RANGE, REST_STAMINA_RANGE, SELF_HEAL_KARMA, SELF_HEAL_STAMINA, STAMINA_BOOST_AMOUNT,
};
use crate::encounter::narration::NarrationSink;
use crate::entity::archetype::{Archetype, ArchetypeKind};
use crate::entity::inventory::{describe_bundle, exchange, Inventory, ItemBundle, ItemKind};
use crate::entity::stats::StatBlock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub archetype: Archetype,

    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    /// Unbounded; rises with altruism, falls with aggression
    pub karma: i32,

    // Current values are derived from base by the active cosmic event
    pub base_attack: f32,
    pub attack: f32,
    pub base_defense: f32,
    pub defense: f32,
    pub base_accuracy: f32,
    pub accuracy: f32,
    pub base_evasion: f32,
    pub evasion: f32,

    pub critical_chance: f32,
    pub healing_ability: f32,
    pub special_attack_damage: f32,
    pub mana_cost: f32,

    pub inventory: Inventory,
}

impl Combatant {
    /// Create a combatant at full health, mana and stamina
    pub fn new(name: impl Into<String>, kind: ArchetypeKind, stats: &StatBlock) -> Self {
        Self {
            name: name.into(),
            archetype: Archetype::new(kind),
            health: stats.max_health,
            max_health: stats.max_health,
            mana: stats.max_mana,
            max_mana: stats.max_mana,
            stamina: stats.max_stamina,
            max_stamina: stats.max_stamina,
            karma: stats.karma,
            base_attack: stats.attack,
            attack: stats.attack,
            base_defense: stats.defense,
            defense: stats.defense,
            base_accuracy: stats.accuracy,
            accuracy: stats.accuracy,
            base_evasion: stats.evasion,
            evasion: stats.evasion,
            critical_chance: stats.critical_chance,
            healing_ability: stats.healing_ability,
            special_attack_damage: stats.special_attack_damage,
            mana_cost: stats.mana_cost,
            inventory: Inventory::starting_kit(),
        }
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn kind(&self) -> ArchetypeKind {
        self.archetype.kind()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health_ratio(&self) -> f32 {
        self.health / self.max_health
    }

    pub fn mana_ratio(&self) -> f32 {
        if self.max_mana > 0.0 {
            self.mana / self.max_mana
        } else {
            0.0
        }
    }

    pub fn stamina_ratio(&self) -> f32 {
        self.stamina / self.max_stamina
    }

    /// Apply raw damage through defense, returns the damage actually taken
    pub fn take_damage(&mut self, amount: f32, log: &mut dyn NarrationSink) -> f32 {
        let actual = (amount - self.defense).max(0.0);
        let blocked = (amount - actual).max(0.0);
        self.health = (self.health - actual).max(0.0);
        log.narrate(&format!(
            "{} takes {:.1} damage (blocked {:.1})",
            self.name, actual, blocked
        ));
        actual
    }

    /// Restore health up to the maximum, returns the amount healed
    pub fn heal(&mut self, amount: f32) -> f32 {
        let healed = amount.max(0.0).min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Restore mana up to the maximum, returns the amount restored
    pub fn restore_mana(&mut self, amount: f32) -> f32 {
        let restored = amount.max(0.0).min(self.max_mana - self.mana);
        self.mana += restored;
        restored
    }

    /// Remove mana down to zero, returns the amount drained
    pub fn drain_mana(&mut self, amount: f32) -> f32 {
        let drained = amount.max(0.0).min(self.mana);
        self.mana -= drained;
        drained
    }

    pub fn recover_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina + amount.max(0.0)).min(self.max_stamina);
    }

    pub fn spend_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina - amount).max(0.0);
    }

    /// The self-heal action: heals by healing ability, gains karma and stamina
    pub fn self_heal(&mut self, log: &mut dyn NarrationSink) {
        let healed = self.heal(self.healing_ability);
        self.karma += SELF_HEAL_KARMA;
        self.recover_stamina(SELF_HEAL_STAMINA);
        log.narrate(&format!(
            "{} heals for {:.1} (Health: {:.1}), karma now {}.",
            self.name, healed, self.health, self.karma
        ));
    }

    pub fn rest(&mut self, rng: &mut impl Rng, log: &mut dyn NarrationSink) {
        let stamina = rng.gen_range(REST_STAMINA_RANGE.0..=REST_STAMINA_RANGE.1);
        let mana = rng.gen_range(REST_MANA_RANGE.0..=REST_MANA_RANGE.1);
        self.recover_stamina(stamina);
        self.restore_mana(mana);
        log.narrate(&format!(
            "{} rests and recovers {:.1} stamina and {:.1} mana.",
            self.name, stamina, mana
        ));
    }

    /// Defensive stance: lasts until the next modifier reset
    pub fn defend(&mut self, log: &mut dyn NarrationSink) {
        self.defense += DEFEND_BONUS;
        self.spend_stamina(DEFEND_STAMINA_COST);
        log.narrate(&format!(
            "{} takes a defensive stance, boosting defense temporarily.",
            self.name
        ));
    }

    /// Revert derived combat attributes to their base values
    pub fn reset_modifiers(&mut self) {
        self.attack = self.base_attack;
        self.defense = self.base_defense;
        self.accuracy = self.base_accuracy;
        self.evasion = self.base_evasion;
    }

    pub fn use_health_potion(&mut self, log: &mut dyn NarrationSink) -> bool {
        if !self.inventory.take_one(ItemKind::HealthPotion) {
            log.narrate(&format!("{} has no health potions!", self.name));
            return false;
        }
        let healed = self.heal(HEALTH_POTION_AMOUNT);
        log.narrate(&format!(
            "{} uses a health potion and heals {:.1} HP.",
            self.name, healed
        ));
        true
    }

    pub fn use_mana_potion(&mut self, log: &mut dyn NarrationSink) -> bool {
        if !self.inventory.take_one(ItemKind::ManaPotion) {
            log.narrate(&format!("{} has no mana potions!", self.name));
            return false;
        }
        let restored = self.restore_mana(MANA_POTION_AMOUNT);
        log.narrate(&format!(
            "{} uses a mana potion and recovers {:.1} mana.",
            self.name, restored
        ));
        true
    }

    pub fn use_stamina_boost(&mut self, log: &mut dyn NarrationSink) -> bool {
        if !self.inventory.take_one(ItemKind::StaminaBoost) {
            log.narrate(&format!("{} has no stamina boosts!", self.name));
            return false;
        }
        let before = self.stamina;
        self.recover_stamina(STAMINA_BOOST_AMOUNT);
        log.narrate(&format!(
            "{} uses a stamina boost and recovers {:.1} stamina.",
            self.name,
            self.stamina - before
        ));
        true
    }

    /// Check both sides can cover the trade. Mutates nothing.
    pub fn propose_trade(
        &self,
        other: &Combatant,
        offer: &ItemBundle,
        request: &ItemBundle,
        log: &mut dyn NarrationSink,
    ) -> bool {
        if self.inventory.holds(offer) && other.inventory.holds(request) {
            log.narrate(&format!(
                "{} proposes trade to {}: {} for {}",
                self.name,
                other.name,
                describe_bundle(offer),
                describe_bundle(request)
            ));
            true
        } else {
            log.narrate(&format!(
                "{}'s trade proposal failed due to insufficient items.",
                self.name
            ));
            false
        }
    }

    /// Accept a proposal: receive `offer` from `proposer`, hand over `request`
    pub fn accept_trade(
        &mut self,
        proposer: &mut Combatant,
        offer: &ItemBundle,
        request: &ItemBundle,
        log: &mut dyn NarrationSink,
    ) -> bool {
        if !exchange(&mut proposer.inventory, &mut self.inventory, offer, request) {
            log.narrate(&format!(
                "{} could not complete the trade with {}.",
                self.name, proposer.name
            ));
            return false;
        }
        log.narrate(&format!(
            "{} accepted trade with {}: {} for {}",
            self.name,
            proposer.name,
            describe_bundle(offer),
            describe_bundle(request)
        ));
        true
    }

    /// Every bounded resource is inside its range
    pub fn within_bounds(&self) -> bool {
        (0.0..=self.max_health).contains(&self.health)
            && (0.0..=self.max_mana).contains(&self.mana)
            && (0.0..=self.max_stamina).contains(&self.stamina)
    }

    pub fn debug_check_invariants(&self) {
        debug_assert!(
            self.within_bounds(),
            "{} left its resource bounds: health {}/{}, mana {}/{}, stamina {}/{}",
            self.name,
            self.health,
            self.max_health,
            self.mana,
            self.max_mana,
            self.stamina,
            self.max_stamina
        );
    }
}

impl std::fmt::Display for Combatant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | HP: {:.1}/{} | Mana: {:.1} | Stamina: {:.1} | Karma: {}",
            self.name, self.health, self.max_health, self.mana, self.stamina, self.karma
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::narration::{NarrationLog, Silent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fighter() -> Combatant {
        Combatant::new("Fighter", ArchetypeKind::Generic, &StatBlock::default())
    }

    #[test]
    fn test_take_damage_subtracts_defense() {
        let mut c = fighter();
        let mut log = NarrationLog::new();
        let taken = c.take_damage(30.0, &mut log);
        assert_eq!(taken, 22.0);
        assert_eq!(c.health, 98.0);
        assert!(log.contains("takes 22.0 damage (blocked 8.0)"));
    }

    #[test]
    fn test_take_damage_below_defense_is_zero() {
        let mut c = fighter();
        assert_eq!(c.take_damage(5.0, &mut Silent), 0.0);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut c = fighter();
        c.take_damage(1000.0, &mut Silent);
        assert_eq!(c.health, 0.0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut c = fighter();
        c.health = 110.0;
        assert_eq!(c.heal(30.0), 10.0);
        assert_eq!(c.health, 120.0);
    }

    #[test]
    fn test_self_heal_side_effects() {
        let mut c = fighter();
        c.health = 50.0;
        c.stamina = 50.0;
        c.self_heal(&mut Silent);
        assert_eq!(c.health, 70.0);
        assert_eq!(c.karma, 55);
        assert_eq!(c.stamina, 65.0);
    }

    #[test]
    fn test_health_potion_scenario() {
        let mut c = fighter();
        c.health = 35.0;
        c.inventory = Inventory::new();
        c.inventory.add(ItemKind::HealthPotion, 1);
        assert!(c.use_health_potion(&mut Silent));
        assert_eq!(c.health, 65.0);
        assert_eq!(c.inventory.count(ItemKind::HealthPotion), 0);
    }

    #[test]
    fn test_potion_without_stock_is_noop() {
        let mut c = fighter();
        c.inventory = Inventory::new();
        c.mana = 10.0;
        let mut log = NarrationLog::new();
        assert!(!c.use_mana_potion(&mut log));
        assert_eq!(c.mana, 10.0);
        assert!(log.contains("has no mana potions"));
    }

    #[test]
    fn test_defend_is_cleared_by_reset() {
        let mut c = fighter();
        c.stamina = 3.0;
        c.defend(&mut Silent);
        assert_eq!(c.defense, 13.0);
        assert_eq!(c.stamina, 0.0);
        c.reset_modifiers();
        assert_eq!(c.defense, 8.0);
    }

    #[test]
    fn test_reset_restores_base_after_many_modifiers() {
        let mut c = fighter();
        for _ in 0..10 {
            c.attack *= 1.1;
            c.accuracy += 0.05;
            c.evasion += 0.05;
        }
        c.reset_modifiers();
        assert_eq!(c.attack, c.base_attack);
        assert_eq!(c.accuracy, c.base_accuracy);
        assert_eq!(c.evasion, c.base_evasion);
    }

    #[test]
    fn test_rest_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut c = fighter();
        c.stamina = 95.0;
        c.mana = 98.0;
        c.rest(&mut rng, &mut Silent);
        assert_eq!(c.stamina, 100.0);
        assert_eq!(c.mana, 100.0);
    }

    #[test]
    fn test_trade_rejected_when_proposer_short() {
        let mut a = fighter();
        a.inventory = Inventory::new();
        let b = fighter();
        let offer = [(ItemKind::ManaPotion, 1)];
        let request = [(ItemKind::HealthPotion, 1)];
        let mut log = NarrationLog::new();
        assert!(!a.propose_trade(&b, &offer, &request, &mut log));
        assert!(log.contains("failed due to insufficient items"));
        assert_eq!(a.inventory, Inventory::new());
        assert_eq!(b.inventory, Inventory::starting_kit());
    }

    #[test]
    fn test_accept_trade_swaps_items() {
        let mut a = fighter();
        let mut b = fighter();
        let offer = [(ItemKind::ManaPotion, 1)];
        let request = [(ItemKind::HealthPotion, 1)];
        assert!(a.propose_trade(&b, &offer, &request, &mut Silent));
        assert!(b.accept_trade(&mut a, &offer, &request, &mut Silent));
        assert_eq!(a.inventory.count(ItemKind::ManaPotion), 1);
        assert_eq!(a.inventory.count(ItemKind::HealthPotion), 3);
        assert_eq!(b.inventory.count(ItemKind::ManaPotion), 3);
        assert_eq!(b.inventory.count(ItemKind::HealthPotion), 1);
    }

    #[test]
    fn test_trade_with_repeated_offer_kind_is_rejected() {
        let mut a = fighter();
        a.inventory = Inventory::new();
        a.inventory.add(ItemKind::ManaPotion, 1);
        let mut b = fighter();
        let before = (a.inventory.clone(), b.inventory.clone());
        let offer = [(ItemKind::ManaPotion, 1), (ItemKind::ManaPotion, 1)];
        let request = [(ItemKind::HealthPotion, 1)];

        assert!(!a.propose_trade(&b, &offer, &request, &mut Silent));
        assert!(!b.accept_trade(&mut a, &offer, &request, &mut Silent));
        assert_eq!((a.inventory, b.inventory), before);
    }
}
