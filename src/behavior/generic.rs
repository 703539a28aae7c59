//! Generic turn policy shared by every archetype
//!
//! Potions first (health, then mana, then stamina), otherwise a weighted
//! pick from whatever the combatant can currently afford.

use rand::Rng;

use crate::behavior::weighted::{weighted_choice, TurnAction};
use crate::combat::constants::TURN_STAMINA_RANGE;
use crate::combat::AttackKind;
use crate::encounter::narration::NarrationSink;
use crate::entity::{Combatant, ItemKind};

const POTION_HEALTH_RATIO: f32 = 0.4;
const POTION_MANA_RATIO: f32 = 0.3;
const POTION_STAMINA_RATIO: f32 = 0.2;

const HEAL_HEALTH_RATIO: f32 = 0.4;
const REST_STAMINA: f32 = 10.0;

const HEAL_WEIGHT: f32 = 0.6;
const REST_WEIGHT: f32 = 0.8;
const DEFEND_WEIGHT: f32 = 0.5;
const HEAVY_WEIGHT: f32 = 0.3;
const MAGIC_WEIGHT: f32 = 0.3;
const QUICK_WEIGHT: f32 = 0.3;
const NORMAL_WEIGHT: f32 = 0.4;

/// Attack entries the combatant can currently afford, with fixed weights
///
/// Magic also needs the combatant's own mana threshold, which may sit
/// above the maneuver's cost.
pub fn attack_menu(actor: &Combatant) -> Vec<(TurnAction, f32)> {
    [
        (AttackKind::Heavy, HEAVY_WEIGHT),
        (AttackKind::Magic, MAGIC_WEIGHT),
        (AttackKind::Quick, QUICK_WEIGHT),
        (AttackKind::Normal, NORMAL_WEIGHT),
    ]
    .into_iter()
    .filter(|(kind, _)| kind.affordable(actor))
    .filter(|(kind, _)| {
        *kind != AttackKind::Magic || (actor.max_mana > 0.0 && actor.mana >= actor.mana_cost)
    })
    .map(|(kind, weight)| (TurnAction::Attack(kind), weight))
    .collect()
}

/// Full menu: self-heal and rest when needed, attacks when affordable
///
/// Falls back to a lone defend entry when nothing else qualifies.
pub fn action_menu(actor: &Combatant) -> Vec<(TurnAction, f32)> {
    let mut menu = Vec::new();
    if actor.health_ratio() < HEAL_HEALTH_RATIO {
        menu.push((TurnAction::SelfHeal, HEAL_WEIGHT));
    }
    if actor.stamina < REST_STAMINA {
        menu.push((TurnAction::Rest, REST_WEIGHT));
    }
    menu.extend(attack_menu(actor));
    if menu.is_empty() {
        menu.push((TurnAction::Defend, DEFEND_WEIGHT));
    }
    menu
}

/// Pick an attack, or rest when no attack is affordable
pub fn choose_attack(actor: &Combatant, rng: &mut impl Rng) -> TurnAction {
    weighted_choice(&attack_menu(actor), rng).unwrap_or(TurnAction::Rest)
}

pub fn choose_action(actor: &Combatant, rng: &mut impl Rng) -> TurnAction {
    weighted_choice(&action_menu(actor), rng).unwrap_or(TurnAction::Defend)
}

/// Carry out a chosen action
pub fn perform(
    action: TurnAction,
    actor: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut impl Rng,
    log: &mut dyn NarrationSink,
) {
    match action {
        TurnAction::SelfHeal => super::self_heal(actor, log),
        TurnAction::Rest => actor.rest(rng, log),
        TurnAction::Defend => actor.defend(log),
        TurnAction::Attack(kind) => {
            kind.apply(actor, opponent, rng, log);
        }
    }
}

/// Drink the first potion the combatant needs, if any. Returns true if one was used.
pub fn use_needed_potion(actor: &mut Combatant, log: &mut dyn NarrationSink) -> bool {
    if actor.health_ratio() < POTION_HEALTH_RATIO && actor.inventory.has(ItemKind::HealthPotion) {
        actor.use_health_potion(log)
    } else if actor.mana_ratio() < POTION_MANA_RATIO
        && actor.max_mana > 0.0
        && actor.inventory.has(ItemKind::ManaPotion)
    {
        actor.use_mana_potion(log)
    } else if actor.stamina_ratio() < POTION_STAMINA_RATIO
        && actor.inventory.has(ItemKind::StaminaBoost)
    {
        actor.use_stamina_boost(log)
    } else {
        false
    }
}

pub fn take_turn(
    actor: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut impl Rng,
    log: &mut dyn NarrationSink,
) {
    if !use_needed_potion(actor, log) {
        let action = choose_action(actor, rng);
        perform(action, actor, opponent, rng, log);
    }

    let trickle = rng.gen_range(TURN_STAMINA_RANGE.0..=TURN_STAMINA_RANGE.1);
    actor.recover_stamina(trickle);
}
