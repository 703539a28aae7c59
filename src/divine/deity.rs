//! Deities - independent actors with a depleting energy budget
//!
//! Every deity pays for what it delivers: energy spent is proportional to
//! the amount actually healed, granted or inflicted, scaled by the per-turn
//! cost multiplier. Energy is never replenished; at zero the deity is inert
//! for the rest of the encounter.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::divine::priority::{first_has_priority, priority_score, WORTHINESS_THRESHOLD};
use crate::encounter::narration::NarrationSink;
use crate::entity::Combatant;

const COOLDOWN_RANGE: (u32, u32) = (1, 3);

// Restorer
const RESTORER_ENERGY: f32 = 100.0;
const RESTORER_COST_RATE: f32 = 0.2;
const RESTORER_HEAL: f32 = 20.0;
const RESTORER_HEAL_NOISE: f32 = 5.0;

// Balancer
const BALANCER_ENERGY: f32 = 120.0;
const BALANCER_COST_RATE: f32 = 0.1;
const BALANCER_HEAL: f32 = 15.0;
const BALANCER_MANA: f32 = 10.0;
const BALANCER_HEAL_RATIO: f32 = 0.5;
const BALANCER_NOISE: f32 = 0.1;

// Punisher
const PUNISHER_ENERGY: f32 = 90.0;
const PUNISHER_COST_RATE: f32 = 0.05;
const DECAY_BASE: f32 = 10.0;
const DECAY_KARMA_SCALE: f32 = 0.2;
const DECAY_NOISE: f32 = 2.0;
pub const DECAY_FLOOR: f32 = 5.0;

/// Karma every karma-scaled formula is measured against
pub const NEUTRAL_KARMA: i32 = 50;

/// The three fixed roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeityKind {
    Restorer,
    Balancer,
    Punisher,
}

/// Which of the two candidates an intervention landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Candidate {
    Favored,
    Other,
}

/// Effect of one deity acting in the divine phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intervention {
    /// Cooldown or exhausted energy kept the deity still
    Idle,
    /// Nobody scored high enough to deserve help
    Declined,
    Healed { recipient: Candidate, amount: f32 },
    ManaGranted { recipient: Candidate, amount: f32 },
    Decay { recipient: Candidate, amount: f32 },
}

/// What the balancer delivered when blessing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blessing {
    Health(f32),
    Mana(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deity {
    pub kind: DeityKind,
    pub name: String,
    /// Remaining budget, never increases
    pub energy: f32,
    pub cooldown: u32,
    /// Reset to 1.0 every turn; an astral surge halves it
    pub cost_multiplier: f32,

    pub interventions: u32,
    pub health_restored: f32,
    pub mana_granted: f32,
    pub decay_inflicted: f32,
    pub decay_cleansed: f32,
}

impl Deity {
    fn new(kind: DeityKind, name: &str, energy: f32) -> Self {
        Self {
            kind,
            name: name.to_string(),
            energy,
            cooldown: 0,
            cost_multiplier: 1.0,
            interventions: 0,
            health_restored: 0.0,
            mana_granted: 0.0,
            decay_inflicted: 0.0,
            decay_cleansed: 0.0,
        }
    }

    pub fn restorer() -> Self {
        Self::new(DeityKind::Restorer, "Brahma", RESTORER_ENERGY)
    }

    pub fn balancer() -> Self {
        Self::new(DeityKind::Balancer, "Vishnu", BALANCER_ENERGY)
    }

    pub fn punisher() -> Self {
        Self::new(DeityKind::Punisher, "Shiva", PUNISHER_ENERGY)
    }

    pub fn is_exhausted(&self) -> bool {
        self.energy <= 0.0
    }

    fn cost_rate(&self) -> f32 {
        match self.kind {
            DeityKind::Restorer => RESTORER_COST_RATE,
            DeityKind::Balancer => BALANCER_COST_RATE,
            DeityKind::Punisher => PUNISHER_COST_RATE,
        }
    }

    /// Pay for `delivered` units of effect, returns the energy spent
    fn pay(&mut self, delivered: f32) -> f32 {
        let cost = delivered * self.cost_rate() * self.cost_multiplier;
        self.energy = (self.energy - cost).max(0.0);
        self.interventions += 1;
        cost
    }

    fn roll_cooldown(&mut self, rng: &mut impl Rng) {
        self.cooldown = rng.gen_range(COOLDOWN_RANGE.0..=COOLDOWN_RANGE.1);
    }

    /// Act once against the favored/other pair
    pub fn influence(
        &mut self,
        favored: &mut Combatant,
        other: &mut Combatant,
        rng: &mut impl Rng,
        log: &mut dyn NarrationSink,
    ) -> Intervention {
        if self.cooldown > 0 || self.is_exhausted() {
            self.cooldown = self.cooldown.saturating_sub(1);
            return Intervention::Idle;
        }

        let intervention = match self.kind {
            DeityKind::Restorer => self.restore(favored, other, rng, log),
            DeityKind::Balancer => self.balance(favored, other, rng, log),
            DeityKind::Punisher => self.punish(favored, other, rng, log),
        };
        tracing::debug!(deity = %self.name, ?intervention, energy = self.energy, "divine intervention");
        intervention
    }

    fn restore(
        &mut self,
        favored: &mut Combatant,
        other: &mut Combatant,
        rng: &mut impl Rng,
        log: &mut dyn NarrationSink,
    ) -> Intervention {
        let (target, recipient) = by_priority(favored, other);
        if priority_score(target) < WORTHINESS_THRESHOLD {
            log.narrate(&format!("{} finds no mortal worthy of aid.", self.name));
            return Intervention::Declined;
        }

        let amount = self.restorer_heal(target, rng);
        self.roll_cooldown(rng);
        log.narrate(&format!(
            "{} heals {} for {:.1} HP. (Energy left: {:.1})",
            self.name, target.name, amount, self.energy
        ));
        Intervention::Healed { recipient, amount }
    }

    fn balance(
        &mut self,
        favored: &mut Combatant,
        other: &mut Combatant,
        rng: &mut impl Rng,
        log: &mut dyn NarrationSink,
    ) -> Intervention {
        let (target, recipient) = by_priority(favored, other);
        let intervention = match self.balancer_gift(target, rng) {
            Blessing::Health(amount) => {
                log.narrate(&format!(
                    "{} heals {} for {:.1} health. (Energy left: {:.1})",
                    self.name, target.name, amount, self.energy
                ));
                Intervention::Healed { recipient, amount }
            }
            Blessing::Mana(amount) => {
                log.narrate(&format!(
                    "{} grants mana to {}: +{:.1} MP (Energy left: {:.1})",
                    self.name, target.name, amount, self.energy
                ));
                Intervention::ManaGranted { recipient, amount }
            }
        };
        self.roll_cooldown(rng);
        intervention
    }

    fn punish(
        &mut self,
        favored: &mut Combatant,
        other: &mut Combatant,
        rng: &mut impl Rng,
        log: &mut dyn NarrationSink,
    ) -> Intervention {
        let (target, recipient) = if favored.karma <= other.karma {
            (favored, Candidate::Favored)
        } else {
            (other, Candidate::Other)
        };

        let decay = decay_amount(target, rng);
        target.take_damage(decay, log);
        self.decay_inflicted += decay;
        self.pay(decay);
        self.roll_cooldown(rng);
        log.narrate(&format!(
            "{} inflicts decay on {}: -{:.1} HP (Energy left: {:.1})",
            self.name, target.name, decay, self.energy
        ));
        Intervention::Decay {
            recipient,
            amount: decay,
        }
    }

    fn restorer_heal(&mut self, target: &mut Combatant, rng: &mut impl Rng) -> f32 {
        let noise = rng.gen_range(-RESTORER_HEAL_NOISE..=RESTORER_HEAL_NOISE);
        let healed = target.heal(RESTORER_HEAL + noise);
        self.health_restored += healed;
        self.pay(healed);
        healed
    }

    fn balancer_gift(&mut self, target: &mut Combatant, rng: &mut impl Rng) -> Blessing {
        let karma_factor = 1.0 + (target.karma - NEUTRAL_KARMA) as f32 / 100.0;
        let noise = rng.gen_range(-BALANCER_NOISE..=BALANCER_NOISE);
        if target.health < BALANCER_HEAL_RATIO * target.max_health {
            let healed = target.heal(BALANCER_HEAL * (karma_factor + noise));
            self.health_restored += healed;
            self.pay(healed);
            Blessing::Health(healed)
        } else {
            let granted = target.restore_mana(BALANCER_MANA * (karma_factor + noise));
            self.mana_granted += granted;
            self.pay(granted);
            Blessing::Mana(granted)
        }
    }

    /// Restorer answer to a priest's prayer. `None` once energy is gone.
    pub fn heal_entity(
        &mut self,
        target: &mut Combatant,
        rng: &mut impl Rng,
    ) -> Option<f32> {
        if self.kind != DeityKind::Restorer || self.is_exhausted() {
            return None;
        }
        Some(self.restorer_heal(target, rng))
    }

    /// Balancer answer to a priest's prayer: health when hurt, mana otherwise
    pub fn bless_entity(
        &mut self,
        target: &mut Combatant,
        rng: &mut impl Rng,
    ) -> Option<Blessing> {
        if self.kind != DeityKind::Balancer || self.is_exhausted() {
            return None;
        }
        Some(self.balancer_gift(target, rng))
    }

    /// Punisher answer to a priest's prayer: undo the decay it would inflict
    pub fn cleanse_decay(
        &mut self,
        target: &mut Combatant,
        rng: &mut impl Rng,
    ) -> Option<f32> {
        if self.kind != DeityKind::Punisher || self.is_exhausted() {
            return None;
        }
        let purified = target.heal(decay_amount(target, rng));
        self.decay_cleansed += purified;
        self.pay(purified);
        Some(purified)
    }

    /// One-line report of cumulative effects
    pub fn summary(&self) -> String {
        let effects = match self.kind {
            DeityKind::Restorer => {
                format!("Total Health Restored = {:.1}", self.health_restored)
            }
            DeityKind::Balancer => format!(
                "Total Mana Granted = {:.1}, Total Health Healed = {:.1}",
                self.mana_granted, self.health_restored
            ),
            DeityKind::Punisher => format!(
                "Total Decay Inflicted = {:.1}, Total Decay Cleansed = {:.1}",
                self.decay_inflicted, self.decay_cleansed
            ),
        };
        format!(
            "{}: Interventions = {}, {}, Remaining Energy = {:.1}",
            self.name, self.interventions, effects, self.energy
        )
    }
}

fn by_priority<'c>(
    favored: &'c mut Combatant,
    other: &'c mut Combatant,
) -> (&'c mut Combatant, Candidate) {
    if first_has_priority(favored, other) {
        (favored, Candidate::Favored)
    } else {
        (other, Candidate::Other)
    }
}

/// Lower karma decays harder; never below the floor
pub fn decay_amount(target: &Combatant, rng: &mut impl Rng) -> f32 {
    let noise = rng.gen_range(-DECAY_NOISE..=DECAY_NOISE);
    let decay = DECAY_BASE + (NEUTRAL_KARMA - target.karma) as f32 * DECAY_KARMA_SCALE + noise;
    decay.max(DECAY_FLOOR)
}
