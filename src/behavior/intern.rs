//! Intern - unreliable, caffeine-fuelled, occasionally terrifying

use rand::Rng;

use crate::behavior::{generic, self_heal};
use crate::behavior::weighted::TurnAction;
use crate::encounter::narration::NarrationSink;
use crate::entity::{Archetype, Combatant, InternState, FULL_CAFFEINE};

const FORGET_CHANCE: f32 = 0.1;
const FORGET_STAMINA: f32 = 5.0;

const PANIC_CAFFEINE: f32 = 30.0;
const PANIC_ATTACK_MULTIPLIER: f32 = 1.5;
const PANIC_ACCURACY_BONUS: f32 = 0.1;
const PANIC_STAMINA: f32 = 20.0;

const SELF_HEAL_CHANCE: f32 = 0.2;
const REST_CHANCE: f32 = 0.4;

const CAFFEINE_DECAY_RANGE: (f32, f32) = (5.0, 15.0);

fn state_mut(actor: &mut Combatant) -> Option<&mut InternState> {
    match &mut actor.archetype {
        Archetype::Intern(state) => Some(state),
        _ => None,
    }
}

pub fn take_turn(
    actor: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut impl Rng,
    log: &mut dyn NarrationSink,
) {
    if rng.gen::<f32>() < FORGET_CHANCE {
        log.narrate(&format!(
            "{}: Forgot what they were doing. Takes no action.",
            actor.name
        ));
        actor.recover_stamina(FORGET_STAMINA);
        return;
    }

    enter_panic_if_due(actor, log);

    let roll: f32 = rng.gen();
    if roll < SELF_HEAL_CHANCE {
        self_heal(actor, log);
    } else if roll < REST_CHANCE {
        actor.rest(rng, log);
    } else if let TurnAction::Attack(kind) = generic::choose_attack(actor, rng) {
        log.narrate(&format!(
            "{}: Nervously attempting {}...",
            actor.name,
            kind.spec().name
        ));
        kind.apply(actor, opponent, rng, log);
    }

    let decay = rng.gen_range(CAFFEINE_DECAY_RANGE.0..=CAFFEINE_DECAY_RANGE.1);
    if let Some(state) = state_mut(actor) {
        state.caffeine = (state.caffeine - decay).max(0.0);
    }
}

/// Low caffeine triggers panic productivity once until the next crash.
/// Returns true when panic mode engaged this call.
pub fn enter_panic_if_due(actor: &mut Combatant, log: &mut dyn NarrationSink) -> bool {
    let Some(state) = state_mut(actor) else {
        return false;
    };
    if state.caffeine >= PANIC_CAFFEINE || state.panic_mode {
        return false;
    }
    state.panic_mode = true;

    actor.attack *= PANIC_ATTACK_MULTIPLIER;
    actor.accuracy += PANIC_ACCURACY_BONUS;
    actor.recover_stamina(PANIC_STAMINA);
    log.narrate(&format!("{} enters Panic Productivity mode!", actor.name));
    true
}

/// Reset hook: a panicking intern crashes and is topped back up with caffeine
pub fn on_modifier_reset(actor: &mut Combatant, log: &mut dyn NarrationSink) {
    let Some(state) = state_mut(actor) else {
        return;
    };
    if !state.panic_mode {
        return;
    }
    state.panic_mode = false;
    state.caffeine = FULL_CAFFEINE;
    log.narrate(&format!(
        "{} crashes from caffeine overload. Back to normal.",
        actor.name
    ));
}
