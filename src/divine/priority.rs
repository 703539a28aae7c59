//! Priority scoring used by deities to decide who needs them most

use crate::entity::Combatant;

/// Score below which the restorer declines to act
pub const WORTHINESS_THRESHOLD: f32 = 0.4;

const KARMA_WEIGHT: f32 = 0.5;
const CRITICAL_HEALTH_RATIO: f32 = 0.2;
const CRITICAL_BONUS: f32 = 0.3;

/// `(1 - health ratio) + 0.5 * karma/100 + 0.3 when critically hurt`
pub fn priority_score(combatant: &Combatant) -> f32 {
    let danger = 1.0 - combatant.health_ratio();
    let karma_weight = combatant.karma as f32 / 100.0;
    let critical = if combatant.health < CRITICAL_HEALTH_RATIO * combatant.max_health {
        CRITICAL_BONUS
    } else {
        0.0
    };
    danger + karma_weight * KARMA_WEIGHT + critical
}

/// True when the first candidate wins; ties favor the first
pub fn first_has_priority(first: &Combatant, second: &Combatant) -> bool {
    priority_score(first) >= priority_score(second)
}
