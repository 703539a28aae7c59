//! Mechanist - heat-driven cyborg with no access to mana

use rand::Rng;

use crate::behavior::generic;
use crate::behavior::weighted::{weighted_choice, TurnAction};
use crate::combat::AttackKind;
use crate::encounter::narration::NarrationSink;
use crate::entity::{Archetype, Combatant, MechanistState};

const HEAT_PER_TURN: f32 = 5.0;

const OVERDRIVE_HEALTH_RATIO: f32 = 0.4;
const OVERDRIVE_BASE_DAMAGE: f32 = 40.0;
const OVERDRIVE_HEAT_SCALE: f32 = 0.2;
const OVERDRIVE_COOLDOWN: u32 = 4;

const EMP_MANA_DRAIN: f32 = 20.0;
const EMP_COOLDOWN: u32 = 3;

const REROUTE_STAMINA: f32 = 20.0;
const TURN_STAMINA_RANGE: (f32, f32) = (7.0, 12.0);

fn state_mut(actor: &mut Combatant) -> Option<&mut MechanistState> {
    match &mut actor.archetype {
        Archetype::Mechanist(state) => Some(state),
        _ => None,
    }
}

pub fn take_turn(
    actor: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut impl Rng,
    log: &mut dyn NarrationSink,
) {
    let Some(state) = state_mut(actor) else {
        return generic::take_turn(actor, opponent, rng, log);
    };
    state.heat += HEAT_PER_TURN;
    let heat = state.heat;
    let overdrive_ready = state.overdrive_cooldown == 0;
    let emp_ready = state.emp_cooldown == 0;

    if actor.health < OVERDRIVE_HEALTH_RATIO * actor.max_health && overdrive_ready {
        let damage = opponent.take_damage(OVERDRIVE_BASE_DAMAGE + heat * OVERDRIVE_HEAT_SCALE, log);
        if let Some(state) = state_mut(actor) {
            state.heat = 0.0;
            state.overdrive_cooldown = OVERDRIVE_COOLDOWN;
        }
        log.narrate(&format!(
            "{} activates Overdrive! Unleashes {:.1} damage using excess heat.",
            actor.name, damage
        ));
    } else if opponent.mana > 0.0 && emp_ready {
        opponent.drain_mana(EMP_MANA_DRAIN);
        if let Some(state) = state_mut(actor) {
            state.emp_cooldown = EMP_COOLDOWN;
        }
        log.narrate(&format!(
            "{} emits an EMP pulse, disabling {}'s magic channels!",
            actor.name, opponent.name
        ));
    } else {
        match choose_action(actor, rng) {
            TurnAction::SelfHeal => reroute_healing(actor, log),
            TurnAction::Attack(kind) => {
                kind.apply(actor, opponent, rng, log);
            }
            TurnAction::Rest | TurnAction::Defend => actor.rest(rng, log),
        }
    }

    if let Some(state) = state_mut(actor) {
        state.overdrive_cooldown = state.overdrive_cooldown.saturating_sub(1);
        state.emp_cooldown = state.emp_cooldown.saturating_sub(1);
    }
    let recovery = rng.gen_range(TURN_STAMINA_RANGE.0..=TURN_STAMINA_RANGE.1);
    actor.recover_stamina(recovery);
}

/// Generic menu without magic
fn choose_action(actor: &Combatant, rng: &mut impl Rng) -> TurnAction {
    let menu: Vec<_> = generic::action_menu(actor)
        .into_iter()
        .filter(|(action, _)| *action != TurnAction::Attack(AttackKind::Magic))
        .collect();
    weighted_choice(&menu, rng).unwrap_or(TurnAction::Rest)
}

/// Self-heal for a mechanist: healing is converted into stamina
pub fn reroute_healing(actor: &mut Combatant, log: &mut dyn NarrationSink) {
    actor.recover_stamina(REROUTE_STAMINA);
    log.narrate(&format!(
        "{} reroutes divine healing into mechanical stamina recovery.",
        actor.name
    ));
}
