//! Combat constants - all tunable values in one place

// Item effects (capped at the resource maximum)
pub const HEALTH_POTION_AMOUNT: f32 = 30.0;
pub const MANA_POTION_AMOUNT: f32 = 25.0;
pub const STAMINA_BOOST_AMOUNT: f32 = 20.0;

// Self-heal side effects
pub const SELF_HEAL_KARMA: i32 = 5;
pub const SELF_HEAL_STAMINA: f32 = 15.0;

// Rest and defend
pub const REST_STAMINA_RANGE: (f32, f32) = (15.0, 25.0);
pub const REST_MANA_RANGE: (f32, f32) = (5.0, 10.0);
pub const DEFEND_BONUS: f32 = 5.0;
pub const DEFEND_STAMINA_COST: f32 = 5.0;

// End-of-turn stamina trickle for the generic policy
pub const TURN_STAMINA_RANGE: (f32, f32) = (5.0, 10.0);

// Fatigue scales heavy attacks between these bounds
pub const FATIGUE_FLOOR: f32 = 0.5;
pub const FATIGUE_SPAN: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_ordered() {
        assert!(REST_STAMINA_RANGE.0 < REST_STAMINA_RANGE.1);
        assert!(REST_MANA_RANGE.0 < REST_MANA_RANGE.1);
        assert!(TURN_STAMINA_RANGE.0 < TURN_STAMINA_RANGE.1);
    }

    #[test]
    fn test_fatigue_bounds_reasonable() {
        assert_eq!(FATIGUE_FLOOR + FATIGUE_SPAN, 1.0);
        assert!(FATIGUE_FLOOR > 0.0);
    }
}
