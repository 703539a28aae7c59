//! Attack maneuvers and their resolution
//!
//! Each maneuver checks its resource gate, pays its cost, rolls to hit,
//! then either pushes damage through the defender's `take_damage` or
//! charges the attacker a karma penalty for the miss. Costs are never
//! refunded on a miss.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{FATIGUE_FLOOR, FATIGUE_SPAN};
use crate::encounter::narration::NarrationSink;
use crate::entity::Combatant;

/// The four maneuvers of the action library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Normal,
    Heavy,
    Quick,
    Magic,
}

/// Static cost and karma table for a maneuver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackSpec {
    pub name: &'static str,
    pub stamina_cost: f32,
    pub mana_cost: f32,
    /// Karma lost when the attack lands
    pub karma_cost: i32,
    /// Karma lost when the attack misses
    pub miss_penalty: i32,
}

/// What happened when a maneuver was attempted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// Resource gate failed; nothing was paid
    Insufficient,
    Missed,
    Hit { damage: f32 },
}

impl AttackKind {
    pub fn all() -> &'static [AttackKind] {
        &[
            AttackKind::Normal,
            AttackKind::Heavy,
            AttackKind::Quick,
            AttackKind::Magic,
        ]
    }

    pub fn spec(&self) -> AttackSpec {
        match self {
            AttackKind::Normal => AttackSpec {
                name: "Normal Attack",
                stamina_cost: 10.0,
                mana_cost: 0.0,
                karma_cost: 5,
                miss_penalty: 2,
            },
            AttackKind::Heavy => AttackSpec {
                name: "Heavy Attack",
                stamina_cost: 20.0,
                mana_cost: 0.0,
                karma_cost: 7,
                miss_penalty: 3,
            },
            AttackKind::Quick => AttackSpec {
                name: "Quick Attack",
                stamina_cost: 5.0,
                mana_cost: 0.0,
                karma_cost: 3,
                miss_penalty: 1,
            },
            AttackKind::Magic => AttackSpec {
                name: "Magic Attack",
                stamina_cost: 0.0,
                mana_cost: 25.0,
                karma_cost: 5,
                miss_penalty: 4,
            },
        }
    }

    fn miss_verb(&self) -> &'static str {
        match self {
            AttackKind::Normal => "normal",
            AttackKind::Heavy => "heavy",
            AttackKind::Quick => "quick",
            AttackKind::Magic => "magic",
        }
    }

    /// Whether the attacker can pay for this maneuver right now
    pub fn affordable(&self, attacker: &Combatant) -> bool {
        let spec = self.spec();
        attacker.stamina >= spec.stamina_cost && attacker.mana >= spec.mana_cost
    }

    /// Probability to land, before the roll
    pub fn hit_chance(&self, attacker: &Combatant, defender: &Combatant) -> f32 {
        match self {
            AttackKind::Normal | AttackKind::Magic => attacker.accuracy - defender.evasion,
            AttackKind::Heavy => attacker.accuracy * fatigue_multiplier(attacker) - defender.evasion,
            AttackKind::Quick => (attacker.accuracy - defender.evasion) * 1.1,
        }
    }

    fn roll_damage(&self, attacker: &Combatant, rng: &mut impl Rng) -> f32 {
        match self {
            AttackKind::Normal => variable_damage(attacker.attack, 0.2, rng),
            AttackKind::Heavy => {
                variable_damage(attacker.attack * 1.5, 0.25, rng) * fatigue_multiplier(attacker)
            }
            AttackKind::Quick => attacker.attack * 0.75,
            AttackKind::Magic => attacker.special_attack_damage,
        }
    }

    /// Resolve this maneuver from `attacker` against `defender`
    pub fn apply(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        rng: &mut impl Rng,
        log: &mut dyn NarrationSink,
    ) -> AttackOutcome {
        let spec = self.spec();
        if attacker.stamina < spec.stamina_cost {
            log.narrate(&format!("{} lacks stamina for {}!", attacker.name, spec.name));
            return AttackOutcome::Insufficient;
        }
        if attacker.mana < spec.mana_cost {
            log.narrate(&format!("{} lacks mana for {}!", attacker.name, spec.name));
            return AttackOutcome::Insufficient;
        }

        attacker.spend_stamina(spec.stamina_cost);
        attacker.drain_mana(spec.mana_cost);

        let hit_chance = self.hit_chance(attacker, defender);
        let roll: f32 = rng.gen();
        if roll > hit_chance {
            attacker.karma -= spec.miss_penalty;
            log.narrate(&format!(
                "{}'s {} attack missed {}!",
                attacker.name,
                self.miss_verb(),
                defender.name
            ));
            return AttackOutcome::Missed;
        }

        let raw = self.roll_damage(attacker, rng);
        let damage = defender.take_damage(raw, log);
        attacker.karma -= spec.karma_cost;
        log.narrate(&format!(
            "{} used {} for {:.1} actual damage.",
            attacker.name, spec.name, damage
        ));
        AttackOutcome::Hit { damage }
    }
}

/// 0.5 when exhausted, 1.0 at full stamina
pub fn fatigue_multiplier(combatant: &Combatant) -> f32 {
    FATIGUE_FLOOR + FATIGUE_SPAN * combatant.stamina_ratio()
}

/// Symmetric uniform noise of `±variance` around `base`, never negative
pub fn variable_damage(base: f32, variance: f32, rng: &mut impl Rng) -> f32 {
    let spread = rng.gen_range(-variance..=variance);
    (base + base * spread).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::narration::{NarrationLog, Silent};
    use crate::entity::{ArchetypeKind, StatBlock};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pair() -> (Combatant, Combatant) {
        let a = Combatant::new("Attacker", ArchetypeKind::Generic, &StatBlock::default());
        let d = Combatant::new("Defender", ArchetypeKind::Generic, &StatBlock::default());
        (a, d)
    }

    #[test]
    fn test_insufficient_stamina_is_noop() {
        let (mut a, mut d) = pair();
        a.stamina = 15.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = NarrationLog::new();
        let outcome = AttackKind::Heavy.apply(&mut a, &mut d, &mut rng, &mut log);
        assert_eq!(outcome, AttackOutcome::Insufficient);
        assert_eq!(a.stamina, 15.0);
        assert_eq!(a.karma, 50);
        assert_eq!(d.health, d.max_health);
        assert!(log.contains("lacks stamina for Heavy Attack"));
    }

    #[test]
    fn test_magic_needs_mana() {
        let (mut a, mut d) = pair();
        a.mana = 10.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = AttackKind::Magic.apply(&mut a, &mut d, &mut rng, &mut Silent);
        assert_eq!(outcome, AttackOutcome::Insufficient);
        assert_eq!(a.mana, 10.0);
    }

    #[test]
    fn test_certain_hit_applies_damage_and_karma_cost() {
        let (mut a, mut d) = pair();
        a.accuracy = 1.0;
        d.evasion = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = AttackKind::Magic.apply(&mut a, &mut d, &mut rng, &mut Silent);
        // Special attack 45 minus defense 8
        assert_eq!(outcome, AttackOutcome::Hit { damage: 37.0 });
        assert_eq!(d.health, 83.0);
        assert_eq!(a.mana, 75.0);
        assert_eq!(a.karma, 45);
    }

    #[test]
    fn test_certain_miss_charges_penalty_without_refund() {
        let (mut a, mut d) = pair();
        a.accuracy = 0.0;
        d.evasion = 0.5;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = AttackKind::Normal.apply(&mut a, &mut d, &mut rng, &mut Silent);
        assert_eq!(outcome, AttackOutcome::Missed);
        assert_eq!(a.stamina, 90.0);
        assert_eq!(a.karma, 48);
        assert_eq!(d.health, d.max_health);
    }

    #[test]
    fn test_quick_attack_has_no_noise() {
        let (mut a, mut d) = pair();
        a.accuracy = 1.0;
        d.evasion = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let outcome = AttackKind::Quick.apply(&mut a, &mut d, &mut rng, &mut Silent);
        // 25 * 0.75 - 8
        assert_eq!(outcome, AttackOutcome::Hit { damage: 10.75 });
        assert_eq!(a.karma, 47);
    }

    #[test]
    fn test_fatigue_multiplier_bounds() {
        let (mut a, _) = pair();
        assert_eq!(fatigue_multiplier(&a), 1.0);
        a.stamina = 0.0;
        assert_eq!(fatigue_multiplier(&a), 0.5);
    }

    #[test]
    fn test_variable_damage_within_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..500 {
            let dmg = variable_damage(25.0, 0.2, &mut rng);
            assert!((19.99..=30.01).contains(&dmg));
        }
    }

    #[test]
    fn test_affordable_matches_costs() {
        let (mut a, _) = pair();
        a.stamina = 9.0;
        a.mana = 25.0;
        assert!(!AttackKind::Normal.affordable(&a));
        assert!(AttackKind::Quick.affordable(&a));
        assert!(AttackKind::Magic.affordable(&a));
        assert!(!AttackKind::Heavy.affordable(&a));
    }
}
