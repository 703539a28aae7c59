//! Behavior policies - what each archetype does with its turn
//!
//! Every archetype shares one turn contract: `take_turn` acts against a
//! single opponent, and `on_modifier_reset` runs when the cosmic phase
//! reverts derived attributes.

pub mod generic;
pub mod intern;
pub mod mechanist;
pub mod priest;
pub mod weighted;

pub use weighted::{weighted_choice, TurnAction};

use rand::Rng;

use crate::core::Turn;
use crate::divine::Pantheon;
use crate::encounter::narration::NarrationSink;
use crate::entity::{Archetype, Combatant};

/// Encounter-wide state a turn policy may need
pub struct TurnContext<'a> {
    pub turn: Turn,
    /// Priests pray instead of acting on every turn divisible by this
    pub priest_ability_interval: u32,
    pub pantheon: &'a mut Pantheon,
}

/// Act once against `opponent`, dispatching on the actor's archetype
pub fn take_turn(
    actor: &mut Combatant,
    opponent: &mut Combatant,
    ctx: &mut TurnContext<'_>,
    rng: &mut impl Rng,
    log: &mut dyn NarrationSink,
) {
    match actor.archetype {
        Archetype::Generic => generic::take_turn(actor, opponent, rng, log),
        Archetype::Priest(_) => priest::take_turn(actor, opponent, ctx, rng, log),
        Archetype::Mechanist(_) => mechanist::take_turn(actor, opponent, rng, log),
        Archetype::Intern(_) => intern::take_turn(actor, opponent, rng, log),
    }
}

/// The self-heal action, as the actor's archetype defines it
pub fn self_heal(actor: &mut Combatant, log: &mut dyn NarrationSink) {
    match actor.archetype {
        Archetype::Mechanist(_) => mechanist::reroute_healing(actor, log),
        _ => actor.self_heal(log),
    }
}

/// Revert derived attributes, then run the archetype's reset hook
pub fn reset_modifiers(actor: &mut Combatant, log: &mut dyn NarrationSink) {
    actor.reset_modifiers();
    if let Archetype::Intern(_) = actor.archetype {
        intern::on_modifier_reset(actor, log);
    }
}
