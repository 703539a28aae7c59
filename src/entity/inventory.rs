//! Consumable inventory and item trades

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Kinds of consumables a combatant can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    HealthPotion,
    ManaPotion,
    StaminaBoost,
    KarmaScroll,
}

impl ItemKind {
    pub fn all() -> &'static [ItemKind] {
        &[
            ItemKind::HealthPotion,
            ItemKind::ManaPotion,
            ItemKind::StaminaBoost,
            ItemKind::KarmaScroll,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::HealthPotion => "health_potion",
            ItemKind::ManaPotion => "mana_potion",
            ItemKind::StaminaBoost => "stamina_boost",
            ItemKind::KarmaScroll => "karma_scroll",
        }
    }
}

/// A bundle of items offered or requested in a trade
pub type ItemBundle = [(ItemKind, u32)];

/// Item counts held by one combatant. Counts never go negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: AHashMap<ItemKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting kit: 2 health potions, 2 mana potions, 1 stamina boost, 1 karma scroll
    pub fn starting_kit() -> Self {
        let mut inventory = Self::new();
        inventory.add(ItemKind::HealthPotion, 2);
        inventory.add(ItemKind::ManaPotion, 2);
        inventory.add(ItemKind::StaminaBoost, 1);
        inventory.add(ItemKind::KarmaScroll, 1);
        inventory
    }

    pub fn count(&self, item: ItemKind) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: ItemKind) -> bool {
        self.count(item) > 0
    }

    pub fn add(&mut self, item: ItemKind, amount: u32) {
        *self.items.entry(item).or_insert(0) += amount;
    }

    /// Try to remove items, returns amount actually removed
    pub fn remove(&mut self, item: ItemKind, amount: u32) -> u32 {
        if let Some(count) = self.items.get_mut(&item) {
            let removed = amount.min(*count);
            *count -= removed;
            removed
        } else {
            0
        }
    }

    /// Take exactly one item, returns false when none is held
    pub fn take_one(&mut self, item: ItemKind) -> bool {
        self.remove(item, 1) == 1
    }

    /// Check the inventory covers the bundle, summing repeated item kinds
    pub fn holds(&self, bundle: &ItemBundle) -> bool {
        let mut totals: AHashMap<ItemKind, u32> = AHashMap::new();
        for &(item, qty) in bundle {
            let total = totals.entry(item).or_insert(0);
            *total = total.saturating_add(qty);
        }
        totals.iter().all(|(item, total)| self.count(*item) >= *total)
    }
}

/// Exchange `offer` (from `proposer`) for `request` (from `counterparty`)
///
/// Both sides are checked before anything moves, so a failed trade leaves
/// both inventories untouched.
pub fn exchange(
    proposer: &mut Inventory,
    counterparty: &mut Inventory,
    offer: &ItemBundle,
    request: &ItemBundle,
) -> bool {
    if !proposer.holds(offer) || !counterparty.holds(request) {
        return false;
    }
    for &(item, qty) in offer {
        proposer.remove(item, qty);
        counterparty.add(item, qty);
    }
    for &(item, qty) in request {
        counterparty.remove(item, qty);
        proposer.add(item, qty);
    }
    true
}

/// Render a bundle as `{mana_potion: 1}` for narration
pub fn describe_bundle(bundle: &ItemBundle) -> String {
    let parts: Vec<String> = bundle
        .iter()
        .map(|(item, qty)| format!("{}: {}", item.label(), qty))
        .collect();
    format!("{{{}}}", parts.join(", "))
}
