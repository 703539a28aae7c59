//! Weighted random selection over a dynamically built action menu

use rand::Rng;

use crate::combat::AttackKind;

/// Everything a combatant can do with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    SelfHeal,
    Rest,
    Defend,
    Attack(AttackKind),
}

/// Draw uniform(0, total) and walk the menu until the running sum reaches it
///
/// Ties go to the first entry that reaches the draw. Returns `None` only
/// for an empty menu.
pub fn weighted_choice<T: Copy>(choices: &[(T, f32)], rng: &mut impl Rng) -> Option<T> {
    let (last, _) = *choices.last()?;
    let total: f32 = choices.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return Some(choices[0].0);
    }
    let draw = rng.gen_range(0.0..=total);
    let mut upto = 0.0;
    for &(choice, weight) in choices {
        if upto + weight >= draw {
            return Some(choice);
        }
        upto += weight;
    }
    Some(last)
}
