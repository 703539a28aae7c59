//! Cosmic events - one global modifier drawn every turn

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::divine::Pantheon;
use crate::encounter::narration::NarrationSink;
use crate::entity::Combatant;

const ALIGNMENT_ATTACK: f32 = 1.1;
const ALIGNMENT_MANA: f32 = 5.0;
const DROUGHT_ATTACK: f32 = 0.95;
const DROUGHT_MANA: f32 = 5.0;
const WINDS_BONUS: f32 = 0.05;
const SURGE_COST_MULTIPLIER: f32 = 0.5;
const FLUX_STAMINA: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CosmicEvent {
    CelestialAlignment,
    CosmicDrought,
    MysticWinds,
    AstralSurge,
    TemporalFlux,
}

impl CosmicEvent {
    pub fn all() -> &'static [CosmicEvent] {
        &[
            CosmicEvent::CelestialAlignment,
            CosmicEvent::CosmicDrought,
            CosmicEvent::MysticWinds,
            CosmicEvent::AstralSurge,
            CosmicEvent::TemporalFlux,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CosmicEvent::CelestialAlignment => "Celestial Alignment",
            CosmicEvent::CosmicDrought => "Cosmic Drought",
            CosmicEvent::MysticWinds => "Mystic Winds",
            CosmicEvent::AstralSurge => "Astral Surge",
            CosmicEvent::TemporalFlux => "Temporal Flux",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CosmicEvent::CelestialAlignment => "A rare alignment boosts combat effectiveness.",
            CosmicEvent::CosmicDrought => "Cosmic energies are low; mana recovery suffers.",
            CosmicEvent::MysticWinds => {
                "Evasive winds aid dodging; accuracy and evasion are slightly improved."
            }
            CosmicEvent::AstralSurge => {
                "A surge of astral energy empowers divine intervention, halving its cost this turn."
            }
            CosmicEvent::TemporalFlux => {
                "Time seems to slow, allowing better recovery of stamina."
            }
        }
    }

    /// Uniform draw over the five events
    pub fn draw(rng: &mut impl Rng) -> Self {
        let all = Self::all();
        all[rng.gen_range(0..all.len())]
    }

    /// Apply to both primaries and the pantheon
    pub fn apply(&self, primaries: [&mut Combatant; 2], pantheon: &mut Pantheon) {
        match self {
            CosmicEvent::AstralSurge => pantheon.set_cost_multiplier(SURGE_COST_MULTIPLIER),
            _ => {
                for combatant in primaries {
                    self.apply_to(combatant);
                }
            }
        }
    }

    fn apply_to(&self, combatant: &mut Combatant) {
        match self {
            CosmicEvent::CelestialAlignment => {
                combatant.attack *= ALIGNMENT_ATTACK;
                combatant.restore_mana(ALIGNMENT_MANA);
            }
            CosmicEvent::CosmicDrought => {
                combatant.attack *= DROUGHT_ATTACK;
                combatant.drain_mana(DROUGHT_MANA);
            }
            CosmicEvent::MysticWinds => {
                combatant.accuracy += WINDS_BONUS;
                combatant.evasion += WINDS_BONUS;
            }
            CosmicEvent::TemporalFlux => combatant.recover_stamina(FLUX_STAMINA),
            CosmicEvent::AstralSurge => {}
        }
    }

    pub fn announcement(&self) -> String {
        format!("*** Cosmic Event: {} - {} ***", self.name(), self.description())
    }
}

/// Draw, apply and announce this turn's event
pub fn begin_turn(
    primaries: [&mut Combatant; 2],
    pantheon: &mut Pantheon,
    rng: &mut impl Rng,
    log: &mut dyn NarrationSink,
) -> CosmicEvent {
    pantheon.reset_cost_multipliers();
    let event = CosmicEvent::draw(rng);
    event.apply(primaries, pantheon);
    tracing::debug!(event = event.name(), "cosmic event");
    log.narrate(&event.announcement());
    event
}
