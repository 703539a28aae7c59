//! Priest - generic fighter who periodically prays to the pantheon
//!
//! On every ability turn the priest pays mana and asks the deities, in
//! fixed order, to help its current target. The first deity that answers
//! grants the priest karma and puts the ability on cooldown.

use rand::Rng;

use crate::behavior::{generic, TurnContext};
use crate::divine::{Blessing, Pantheon};
use crate::encounter::narration::NarrationSink;
use crate::entity::{Archetype, Combatant};

pub const PRAYER_MANA_COST: f32 = 20.0;
pub const PRAYER_COOLDOWN: u32 = 3;

const RESTORER_KARMA: i32 = 10;
const BALANCER_KARMA: i32 = 8;
const PUNISHER_KARMA: i32 = 5;
/// The punisher only cleanses targets below this karma
const CLEANSE_KARMA_CEILING: i32 = 40;

/// How the prayer was answered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prayer {
    OnCooldown,
    NoMana,
    Unanswered,
    Healed(f32),
    Blessed(Blessing),
    Cleansed(f32),
}

pub fn take_turn(
    actor: &mut Combatant,
    opponent: &mut Combatant,
    ctx: &mut TurnContext<'_>,
    rng: &mut impl Rng,
    log: &mut dyn NarrationSink,
) {
    let interval = ctx.priest_ability_interval;
    if interval > 0 && ctx.turn % interval == 0 {
        divine_ability(actor, opponent, ctx.pantheon, rng, log);
    } else {
        generic::take_turn(actor, opponent, rng, log);
    }
}

fn cooldown_mut(actor: &mut Combatant) -> Option<&mut u32> {
    match &mut actor.archetype {
        Archetype::Priest(state) => Some(&mut state.cooldown),
        _ => None,
    }
}

/// Pray on behalf of `target`
pub fn divine_ability(
    actor: &mut Combatant,
    target: &mut Combatant,
    pantheon: &mut Pantheon,
    rng: &mut impl Rng,
    log: &mut dyn NarrationSink,
) -> Prayer {
    let Some(cooldown) = cooldown_mut(actor) else {
        return Prayer::Unanswered;
    };
    if *cooldown > 0 {
        let left = *cooldown;
        *cooldown -= 1;
        log.narrate(&format!(
            "{} is spiritually recharging. ({} turns left)",
            actor.name, left
        ));
        return Prayer::OnCooldown;
    }

    if actor.mana < PRAYER_MANA_COST {
        log.narrate(&format!(
            "{} whispers to the heavens... but lacks mana.",
            actor.name
        ));
        return Prayer::NoMana;
    }
    actor.drain_mana(PRAYER_MANA_COST);

    let prayer = if let Some(healed) = pantheon.restorer.heal_entity(target, rng) {
        actor.karma += RESTORER_KARMA;
        log.narrate(&format!(
            "{} calls upon {} to heal {} for {:.1} HP.",
            actor.name, pantheon.restorer.name, target.name, healed
        ));
        Prayer::Healed(healed)
    } else if let Some(blessing) = pantheon.balancer.bless_entity(target, rng) {
        actor.karma += BALANCER_KARMA;
        let (health, mana) = match blessing {
            Blessing::Health(amount) => (amount, 0.0),
            Blessing::Mana(amount) => (0.0, amount),
        };
        log.narrate(&format!(
            "{} invokes {} to bless {}: +{:.1} HP, +{:.1} Mana.",
            actor.name, pantheon.balancer.name, target.name, health, mana
        ));
        Prayer::Blessed(blessing)
    } else if target.karma < CLEANSE_KARMA_CEILING {
        match pantheon.punisher.cleanse_decay(target, rng) {
            Some(purified) => {
                actor.karma += PUNISHER_KARMA;
                log.narrate(&format!(
                    "{} begs {} to cleanse decay from {}: +{:.1} HP recovered.",
                    actor.name, pantheon.punisher.name, target.name, purified
                ));
                Prayer::Cleansed(purified)
            }
            None => Prayer::Unanswered,
        }
    } else {
        Prayer::Unanswered
    };

    if prayer == Prayer::Unanswered {
        log.narrate(&format!(
            "{} prays desperately... but no god responds.",
            actor.name
        ));
    } else if let Some(cooldown) = cooldown_mut(actor) {
        *cooldown = PRAYER_COOLDOWN;
    }
    tracing::debug!(priest = %actor.name, ?prayer, "prayer resolved");
    prayer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::narration::{NarrationLog, Silent};
    use crate::entity::{ArchetypeKind, ItemKind, StatBlock};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn priest() -> Combatant {
        Combatant::new("Tenzin", ArchetypeKind::Priest, &StatBlock::default())
    }

    fn target() -> Combatant {
        let mut t = Combatant::new("Target", ArchetypeKind::Generic, &StatBlock::default());
        t.health = 60.0;
        t
    }

    fn cooldown(actor: &Combatant) -> u32 {
        match &actor.archetype {
            Archetype::Priest(state) => state.cooldown,
            _ => panic!("not a priest"),
        }
    }

    #[test]
    fn test_restorer_answers_first() {
        let mut p = priest();
        let mut t = target();
        let mut pantheon = Pantheon::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = NarrationLog::new();

        let prayer = divine_ability(&mut p, &mut t, &mut pantheon, &mut rng, &mut log);

        assert!(matches!(prayer, Prayer::Healed(_)));
        assert_eq!(p.mana, 80.0);
        assert_eq!(p.karma, 60);
        assert_eq!(cooldown(&p), PRAYER_COOLDOWN);
        assert!(t.health > 60.0);
        assert_eq!(pantheon.restorer.interventions, 1);
        assert!(log.contains("calls upon Brahma to heal Target"));
    }

    #[test]
    fn test_balancer_answers_when_restorer_exhausted() {
        let mut p = priest();
        let mut t = target();
        let mut pantheon = Pantheon::new();
        pantheon.restorer.energy = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let prayer = divine_ability(&mut p, &mut t, &mut pantheon, &mut rng, &mut Silent);

        assert!(matches!(prayer, Prayer::Blessed(Blessing::Mana(_))));
        assert_eq!(p.karma, 58);
        assert_eq!(pantheon.balancer.interventions, 1);
    }

    #[test]
    fn test_punisher_cleanses_only_low_karma() {
        let mut pantheon = Pantheon::new();
        pantheon.restorer.energy = 0.0;
        pantheon.balancer.energy = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut p = priest();
        let mut t = target();
        t.karma = 50;
        let prayer = divine_ability(&mut p, &mut t, &mut pantheon, &mut rng, &mut Silent);
        assert_eq!(prayer, Prayer::Unanswered);
        assert_eq!(cooldown(&p), 0);
        // Mana is spent even when nobody answers
        assert_eq!(p.mana, 80.0);

        t.karma = 10;
        let prayer = divine_ability(&mut p, &mut t, &mut pantheon, &mut rng, &mut Silent);
        assert!(matches!(prayer, Prayer::Cleansed(_)));
        assert_eq!(p.karma, 55);
        assert_eq!(cooldown(&p), PRAYER_COOLDOWN);
    }

    #[test]
    fn test_cooldown_ticks_on_ability_turns() {
        let mut p = priest();
        if let Archetype::Priest(state) = &mut p.archetype {
            state.cooldown = 2;
        }
        let mut t = target();
        let mut pantheon = Pantheon::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = NarrationLog::new();

        let prayer = divine_ability(&mut p, &mut t, &mut pantheon, &mut rng, &mut log);

        assert_eq!(prayer, Prayer::OnCooldown);
        assert_eq!(cooldown(&p), 1);
        assert_eq!(p.mana, 100.0);
        assert!(log.contains("(2 turns left)"));
    }

    #[test]
    fn test_prayer_needs_mana() {
        let mut p = priest();
        p.mana = 15.0;
        let mut t = target();
        let mut pantheon = Pantheon::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let prayer = divine_ability(&mut p, &mut t, &mut pantheon, &mut rng, &mut Silent);

        assert_eq!(prayer, Prayer::NoMana);
        assert_eq!(p.mana, 15.0);
        assert_eq!(t.health, 60.0);
    }

    #[test]
    fn test_off_turns_follow_generic_policy() {
        let mut p = priest();
        p.health = 35.0;
        let mut t = target();
        let mut pantheon = Pantheon::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = TurnContext {
            turn: 3,
            priest_ability_interval: 4,
            pantheon: &mut pantheon,
        };

        take_turn(&mut p, &mut t, &mut ctx, &mut rng, &mut Silent);

        assert_eq!(p.health, 65.0);
        assert_eq!(p.inventory.count(ItemKind::HealthPotion), 1);
        assert_eq!(pantheon.restorer.interventions, 0);
    }

    #[test]
    fn test_ability_turn_skips_stamina_trickle() {
        let mut p = priest();
        p.stamina = 50.0;
        let mut t = target();
        let mut pantheon = Pantheon::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = TurnContext {
            turn: 8,
            priest_ability_interval: 4,
            pantheon: &mut pantheon,
        };

        take_turn(&mut p, &mut t, &mut ctx, &mut rng, &mut Silent);

        assert_eq!(p.stamina, 50.0);
        assert_eq!(pantheon.restorer.interventions, 1);
    }
}
